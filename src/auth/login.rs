//! Credential Submitter: exchanges a password for a device session.
//!
//! The password is forwarded as-is (including a missing or empty value); the
//! device owns all validation. Each call is a single attempt with no retry and
//! no state carried over to the next one.
//!
//! Failure messages are fixed strings on purpose. A rejected credential never
//! says whether the password was wrong or something else refused it, and a
//! transport error never leaks its cause to the user.

use crate::device::DeviceApi;
use secrecy::SecretString;
use tracing::{error, info, instrument, warn};

pub const INVALID_PASSWORD: &str = "Invalid password";
pub const LOGIN_FAILED: &str = "An error occurred while logging in";

/// What the presentation layer receives for one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginResult {
    /// Session established; the caller must navigate home.
    Success,
    /// Display the message next to the password field and stay on the form.
    Failure(String),
}

impl LoginResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure(message) => Some(message),
        }
    }
}

/// Terminal state of a submission. `Succeeded` triggers navigation; the other
/// two surface a message and leave the form ready for another attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    RejectedCredential,
    TransportError,
}

impl From<SubmitOutcome> for LoginResult {
    fn from(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Succeeded => Self::Success,
            SubmitOutcome::RejectedCredential => Self::Failure(INVALID_PASSWORD.to_string()),
            SubmitOutcome::TransportError => Self::Failure(LOGIN_FAILED.to_string()),
        }
    }
}

/// Submit `password` to the device and classify the terminal state.
#[instrument(skip_all)]
pub async fn attempt<D: DeviceApi>(device: &D, password: Option<&SecretString>) -> SubmitOutcome {
    match device.login_local(password).await {
        Ok(status) if status.is_success() => {
            info!("local login accepted");
            SubmitOutcome::Succeeded
        }
        Ok(status) => {
            warn!(status = %status, "local login rejected");
            SubmitOutcome::RejectedCredential
        }
        Err(err) => {
            error!(error = %err, "local login request failed");
            SubmitOutcome::TransportError
        }
    }
}

/// Submit `password` and return the user-displayable result.
pub async fn submit<D: DeviceApi>(device: &D, password: Option<&SecretString>) -> LoginResult {
    attempt(device, password).await.into()
}
