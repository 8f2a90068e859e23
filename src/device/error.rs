use thiserror::Error;

/// Failures talking to the device. None of these are ever shown to an end user
/// verbatim; the auth layer maps them to fixed messages or propagates them to
/// the caller's error boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeviceError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
}

impl DeviceError {
    /// Maps a `reqwest` failure, keeping timeouts distinguishable from other network errors.
    pub(crate) fn from_request(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout("Request timed out. Please try again.".to_string())
        } else {
            Self::Network(format!("Unable to reach the device: {err}"))
        }
    }
}
