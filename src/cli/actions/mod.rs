pub mod check;
pub mod login;

use anyhow::Result;
use serde::Serialize;
use std::{future::Future, process::ExitCode};
use tracing::warn;

/// Exit status after Ctrl-C, matching the shell convention for SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

#[derive(Debug)]
pub enum Action {
    Check(check::Args),
    Login(login::Args),
}

impl Action {
    /// Execute the action.
    ///
    /// # Errors
    /// Returns an error if the device client cannot be built or the entry
    /// gate's own queries fail.
    pub async fn execute(self) -> Result<ExitCode> {
        match self {
            Self::Check(args) => check::execute(args).await,
            Self::Login(args) => login::execute(args).await,
        }
    }
}

/// Run `fut` unless the user interrupts first. An interrupted request is
/// simply dropped; nothing is sent to the device.
pub(crate) async fn until_interrupted<F: Future>(fut: F) -> Option<F::Output> {
    tokio::select! {
        output = fut => Some(output),
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, discarding in-flight device request");
            None
        }
    }
}

pub(crate) fn interrupted() -> ExitCode {
    ExitCode::from(EXIT_INTERRUPTED)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
