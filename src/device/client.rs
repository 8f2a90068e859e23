//! `reqwest` adapter for the device API with consistent timeouts and error
//! mapping. The client keeps a private cookie store so a session issued by the
//! device on login is replayed on later calls made through the same client.
//! It never reads or stores the session itself.

use super::{DEVICE_PATH, DeviceApi, DeviceError, DeviceStatus, LOGIN_LOCAL_PATH, STATUS_PATH};
use crate::APP_USER_AGENT;
use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response, StatusCode, redirect::Policy};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Default request timeout applied to every device call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Maximum number of error body characters kept in `DeviceError::Http`.
const MAX_ERROR_CHARS: usize = 200;
/// Upper bound on error body bytes read off the wire.
const MAX_ERROR_BYTES: usize = 4096;

#[derive(Serialize)]
struct LoginLocalRequest<'a> {
    password: Option<&'a str>,
}

#[derive(Clone, Debug)]
pub struct DeviceClient {
    client: Client,
    base_url: String,
}

impl DeviceClient {
    /// Build a client for the device at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the base URL is not an absolute http(s) URL or the
    /// HTTP client cannot be constructed.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url.trim())
            .with_context(|| format!("invalid device URL: {base_url}"))?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => return Err(anyhow!("invalid device URL: unsupported scheme {scheme}")),
        }

        if parsed.host().is_none() {
            return Err(anyhow!("invalid device URL: no host specified"));
        }

        // Endpoint paths are appended to the base, so a query or fragment would swallow them.
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(anyhow!(
                "invalid device URL: query and fragment are not allowed"
            ));
        }

        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_store(true)
            // A redirect away from /device must not read as an authorized probe
            .redirect(Policy::none())
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim().to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }
}

impl DeviceApi for DeviceClient {
    #[instrument(skip(self), fields(device = %self.base_url))]
    async fn status(&self) -> Result<DeviceStatus, DeviceError> {
        let response = self
            .client
            .get(self.url(STATUS_PATH))
            .send()
            .await
            .map_err(|err| DeviceError::from_request(&err))?;

        let response = error_for_status(response).await?;
        let status = response
            .json::<DeviceStatus>()
            .await
            .map_err(|err| DeviceError::Parse(format!("Failed to decode device status: {err}")))?;

        debug!(is_setup = status.is_setup, "device status");
        Ok(status)
    }

    #[instrument(skip(self), fields(device = %self.base_url))]
    async fn probe_session(&self) -> Result<StatusCode, DeviceError> {
        let response = self
            .client
            .get(self.url(DEVICE_PATH))
            .send()
            .await
            .map_err(|err| DeviceError::from_request(&err))?;

        debug!(status = %response.status(), "session probe");
        Ok(response.status())
    }

    #[instrument(skip_all, fields(device = %self.base_url))]
    async fn login_local(&self, password: Option<&SecretString>) -> Result<StatusCode, DeviceError> {
        let body = LoginLocalRequest {
            password: password.map(ExposeSecret::expose_secret),
        };

        let response = self
            .client
            .post(self.url(LOGIN_LOCAL_PATH))
            .json(&body)
            .send()
            .await
            .map_err(|err| DeviceError::from_request(&err))?;

        debug!(status = %response.status(), "local login");
        Ok(response.status())
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    format!("{}/{}", base, path.trim_start_matches('/'))
}

/// Turns non-2xx responses into `DeviceError::Http` with a sanitized body.
async fn error_for_status(response: Response) -> Result<Response, DeviceError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = read_capped(response, MAX_ERROR_BYTES).await;
    Err(DeviceError::Http {
        status,
        message: sanitize_body(&String::from_utf8_lossy(&body)),
    })
}

/// Reads at most `cap` bytes of the body. Read errors end the body early.
async fn read_capped(mut response: Response, cap: usize) -> Vec<u8> {
    let mut body = Vec::new();
    while body.len() < cap {
        match response.chunk().await {
            Ok(Some(chunk)) => {
                let take = chunk.len().min(cap - body.len());
                body.extend_from_slice(&chunk[..take]);
            }
            Ok(None) | Err(_) => break,
        }
    }
    body
}

fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
