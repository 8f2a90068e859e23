use crate::device::{DeviceClient, client::DEFAULT_REQUEST_TIMEOUT};
use anyhow::Result;
use std::time::Duration;

/// Arguments shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub device_url: String,
    pub request_timeout: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(device_url: String) -> Self {
        Self {
            device_url,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the HTTP client for the configured device.
    ///
    /// # Errors
    /// Returns an error if the device URL is invalid.
    pub fn device_client(&self) -> Result<DeviceClient> {
        DeviceClient::new(&self.device_url, self.request_timeout)
    }
}
