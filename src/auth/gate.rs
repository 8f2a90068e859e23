//! Entry Gate: decides, before any UI is shown, whether the client goes to
//! setup, straight to the home view, or sees the login form.

use crate::device::{DeviceApi, DeviceError};
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// First-time setup has not completed. Authoritative regardless of session.
    RedirectToSetup,
    /// A valid session already exists.
    RedirectToHome,
    /// Render the login form.
    PermitLogin,
}

/// Failures of the gate's own queries. These are not routing outcomes and are
/// left to the caller's error boundary.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("failed to query device setup status: {0}")]
    StatusQuery(#[source] DeviceError),
    #[error("failed to probe device session: {0}")]
    SessionProbe(#[source] DeviceError),
}

/// Evaluate the gate against `device`.
///
/// The setup-status query always runs first; the session probe is skipped
/// entirely when setup is incomplete.
///
/// # Errors
/// Returns `GateError` if either request fails to complete or the status
/// query does not return a decodable OK response. A completed probe with a
/// non-success status is not an error: it permits login.
#[instrument(skip_all)]
pub async fn evaluate<D: DeviceApi>(device: &D) -> Result<AuthOutcome, GateError> {
    let status = device.status().await.map_err(GateError::StatusQuery)?;

    if !status.is_setup {
        info!("device setup incomplete");
        return Ok(AuthOutcome::RedirectToSetup);
    }

    let probe = device
        .probe_session()
        .await
        .map_err(GateError::SessionProbe)?;

    let outcome = if probe.is_success() {
        AuthOutcome::RedirectToHome
    } else {
        AuthOutcome::PermitLogin
    };

    debug!(probe = %probe, ?outcome, "gate evaluated");
    Ok(outcome)
}
