//! Device API port and its HTTP adapter.
//!
//! The gate and the submitter only ever see the [`DeviceApi`] trait, so tests
//! can swap the network for an in-memory device. [`DeviceClient`] is the
//! production implementation backed by `reqwest`.
//!
//! Status codes are returned raw for the probe and login calls: deciding what
//! counts as "authorized" or "rejected" belongs to the auth layer, not here.

pub mod client;
pub mod error;

#[cfg(test)]
pub(crate) mod fake;

pub use self::client::DeviceClient;
pub use self::error::DeviceError;

use reqwest::StatusCode;
use secrecy::SecretString;
use serde::Deserialize;
use std::future::Future;

pub const STATUS_PATH: &str = "/device/status";
pub const DEVICE_PATH: &str = "/device";
pub const LOGIN_LOCAL_PATH: &str = "/auth/login-local";

/// Setup state reported by the device. Fetched fresh on every gate evaluation.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub is_setup: bool,
}

/// The device endpoints consumed by the gate and the credential submitter.
pub trait DeviceApi: Send + Sync {
    /// `GET /device/status`. Any non-2xx status or undecodable body is an error.
    fn status(&self) -> impl Future<Output = Result<DeviceStatus, DeviceError>> + Send;

    /// `GET /device`. Returns the status of the completed exchange.
    fn probe_session(&self) -> impl Future<Output = Result<StatusCode, DeviceError>> + Send;

    /// `POST /auth/login-local` with `{"password": <string|null>}`.
    /// Must never log the password.
    fn login_local(
        &self,
        password: Option<&SecretString>,
    ) -> impl Future<Output = Result<StatusCode, DeviceError>> + Send;
}
