//! Loader/action contract for the local login route.
//!
//! `loader` runs on route entry and either redirects or returns `None`
//! (render the form). `action` runs on form submission and either redirects
//! home or returns an error string for the password field. Both serialize to
//! the JSON shapes a routing layer expects: `{"redirect":"/"}`, `null`, or
//! `{"error":"Invalid password"}`.

use crate::auth::{self, AuthOutcome, GateError, LoginResult};
use crate::device::DeviceApi;
use secrecy::SecretString;
use serde::Serialize;
use url::form_urlencoded;

pub const SETUP: &str = "/welcome";
pub const HOME: &str = "/";
pub const LOGIN: &str = "/login-local";
/// Where a user is sent when they have forgotten the device password.
pub const RESET_PASSWORD_URL: &str =
    "https://jetkvm.com/docs/networking/local-access#reset-password";

const PASSWORD_FIELD: &str = "password";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub redirect: &'static str,
}

impl Redirect {
    #[must_use]
    pub const fn to(path: &'static str) -> Self {
        Self { redirect: path }
    }
}

/// Navigation for a gate outcome; `None` means render the login form.
#[must_use]
pub const fn navigation(outcome: AuthOutcome) -> Option<Redirect> {
    match outcome {
        AuthOutcome::RedirectToSetup => Some(Redirect::to(SETUP)),
        AuthOutcome::RedirectToHome => Some(Redirect::to(HOME)),
        AuthOutcome::PermitLogin => None,
    }
}

/// Pre-render loader for the login route.
///
/// # Errors
/// Propagates `GateError` to the caller's error boundary.
pub async fn loader<D: DeviceApi>(device: &D) -> Result<Option<Redirect>, GateError> {
    auth::evaluate(device).await.map(navigation)
}

/// Submitted login form. Only the password field is read.
#[derive(Debug, Default)]
pub struct LoginForm {
    password: Option<SecretString>,
}

impl LoginForm {
    #[must_use]
    pub fn new(password: Option<SecretString>) -> Self {
        Self { password }
    }

    /// Parse an `application/x-www-form-urlencoded` body. A missing field is
    /// kept as `None` and an empty one as `""`; the first occurrence wins.
    #[must_use]
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let password = form_urlencoded::parse(body)
            .find(|(name, _)| name == PASSWORD_FIELD)
            .map(|(_, value)| SecretString::from(value.into_owned()));

        Self { password }
    }

    #[must_use]
    pub fn password(&self) -> Option<&SecretString> {
        self.password.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionResponse {
    Redirect(Redirect),
    Error { error: String },
}

impl From<LoginResult> for ActionResponse {
    fn from(result: LoginResult) -> Self {
        match result {
            LoginResult::Success => Self::Redirect(Redirect::to(HOME)),
            LoginResult::Failure(error) => Self::Error { error },
        }
    }
}

/// Form-submission action for the login route.
pub async fn action<D: DeviceApi>(device: &D, form: &LoginForm) -> ActionResponse {
    auth::submit(device, form.password()).await.into()
}
