//! # kvmgate (local authentication gate)
//!
//! `kvmgate` decides whether a client may reach a KVM device's main interface.
//! It talks to the device's HTTP API and never owns any session state itself;
//! the device issues and validates sessions, this crate only observes the
//! outcome of each exchange.
//!
//! ## Entry Gate
//!
//! Before anything is rendered the gate asks the device whether first-time
//! setup has completed (`GET /device/status`). An unconfigured device always
//! routes to the setup flow and no further call is made. Otherwise the gate
//! probes an authenticated-only resource (`GET /device`): a successful probe
//! means an existing session, so the login form is skipped.
//!
//! ## Credential Submitter
//!
//! A submitted password is forwarded untouched to `POST /auth/login-local`.
//! Failures are reported with one of two fixed messages so the client never
//! learns *why* a credential was rejected. Transport errors are logged for
//! diagnostics and never shown to the user.
//!
//! ## Routing
//!
//! [`routes`] maps both procedures onto the loader/action contract consumed by
//! a routing layer: redirects to `/welcome` or `/`, a `null` "render the form"
//! result, or `{"error": ...}` bound to the password field.

pub mod auth;
pub mod cli;
pub mod device;
pub mod routes;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with("kvmgate/"));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
