//! Maps validated CLI matches to the action the binary executes.

use crate::cli::actions::{Action, check, login};
use crate::cli::commands::{self, device, login::PasswordSource};
use crate::cli::globals::GlobalArgs;
use anyhow::{Result, anyhow};

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if required arguments are missing or the subcommand is unknown.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let device_opts = device::Options::parse(matches)?;
    let globals =
        GlobalArgs::new(device_opts.url).with_request_timeout(device_opts.request_timeout);

    match matches.subcommand() {
        Some((commands::CMD_CHECK, _)) => Ok(Action::Check(check::Args { globals })),
        Some((commands::CMD_LOGIN, sub_m)) => Ok(Action::Login(login::Args {
            globals,
            password: PasswordSource::parse(sub_m),
        })),
        Some((name, _)) => Err(anyhow!("unknown subcommand: {name}")),
        None => Err(anyhow!("missing subcommand")),
    }
}
