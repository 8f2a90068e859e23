//! In-memory device used by unit tests. Records every call so tests can
//! assert ordering and short-circuits.

use super::{DeviceApi, DeviceError, DeviceStatus};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Mutex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Status,
    Probe,
    Login(Option<String>),
}

pub(crate) struct FakeDevice {
    status: Result<DeviceStatus, DeviceError>,
    probe: Result<StatusCode, DeviceError>,
    login: Result<StatusCode, DeviceError>,
    calls: Mutex<Vec<Call>>,
}

impl FakeDevice {
    pub(crate) fn new(is_setup: bool) -> Self {
        Self {
            status: Ok(DeviceStatus { is_setup }),
            probe: Ok(StatusCode::UNAUTHORIZED),
            login: Ok(StatusCode::UNAUTHORIZED),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_status_error(mut self, err: DeviceError) -> Self {
        self.status = Err(err);
        self
    }

    pub(crate) fn with_probe(mut self, probe: Result<StatusCode, DeviceError>) -> Self {
        self.probe = probe;
        self
    }

    pub(crate) fn with_login(mut self, login: Result<StatusCode, DeviceError>) -> Self {
        self.login = login;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: Call) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl DeviceApi for FakeDevice {
    async fn status(&self) -> Result<DeviceStatus, DeviceError> {
        self.record(Call::Status);
        self.status.clone()
    }

    async fn probe_session(&self) -> Result<StatusCode, DeviceError> {
        self.record(Call::Probe);
        self.probe.clone()
    }

    async fn login_local(&self, password: Option<&SecretString>) -> Result<StatusCode, DeviceError> {
        self.record(Call::Login(
            password.map(|secret| secret.expose_secret().to_string()),
        ));
        self.login.clone()
    }
}
