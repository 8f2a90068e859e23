use super::{interrupted, print_json, until_interrupted};
use crate::{
    auth::{self, AuthOutcome, INVALID_PASSWORD},
    cli::{commands::login::PasswordSource, globals::GlobalArgs},
    routes::{self, ActionResponse, LoginForm},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Exit status when the device still needs first-time setup.
const EXIT_SETUP_REQUIRED: u8 = 2;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub password: PasswordSource,
}

/// Gate first; submit the password only when the gate permits the form.
///
/// # Errors
/// Returns an error if the device URL is invalid, the gate's queries fail, or
/// stdin cannot be read.
pub async fn execute(args: Args) -> Result<ExitCode> {
    let device = args.globals.device_client()?;

    let Some(result) = until_interrupted(auth::evaluate(&device)).await else {
        return Ok(interrupted());
    };
    let outcome = result.with_context(|| format!("entry gate failed for {}", device.base_url()))?;

    match outcome {
        AuthOutcome::RedirectToSetup => {
            print_json(&routes::navigation(outcome))?;
            return Ok(ExitCode::from(EXIT_SETUP_REQUIRED));
        }
        AuthOutcome::RedirectToHome => {
            print_json(&routes::navigation(outcome))?;
            return Ok(ExitCode::SUCCESS);
        }
        AuthOutcome::PermitLogin => debug!("login form permitted"),
    }

    let form = LoginForm::new(resolve_password(args.password).await?);

    let Some(response) = until_interrupted(routes::action(&device, &form)).await else {
        return Ok(interrupted());
    };
    print_json(&response)?;

    match response {
        ActionResponse::Redirect(_) => Ok(ExitCode::SUCCESS),
        ActionResponse::Error { error } => {
            if let Some(hint) = forgot_password_hint(&error) {
                eprintln!("{hint}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Only a rejected password points at the reset page.
fn forgot_password_hint(error: &str) -> Option<String> {
    (error == INVALID_PASSWORD).then(|| format!("Forgot password? {}", routes::RESET_PASSWORD_URL))
}

async fn resolve_password(source: PasswordSource) -> Result<Option<SecretString>> {
    match source {
        PasswordSource::Value(secret) => Ok(Some(secret)),
        PasswordSource::Missing => Ok(None),
        PasswordSource::Stdin => {
            let mut line = String::new();
            let read = BufReader::new(tokio::io::stdin())
                .read_line(&mut line)
                .await
                .context("failed to read password from stdin")?;

            if read == 0 {
                return Ok(None);
            }
            Ok(Some(SecretString::from(strip_line_ending(line))))
        }
    }
}

/// Drops the trailing newline only; other whitespace is part of the password.
fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
