use super::{interrupted, print_json, until_interrupted};
use crate::{cli::globals::GlobalArgs, routes};
use anyhow::{Context, Result};
use std::process::ExitCode;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
}

/// Run the loader and print `{"redirect": ...}` or `null`.
///
/// # Errors
/// Returns an error if the device URL is invalid or the gate's queries fail.
pub async fn execute(args: Args) -> Result<ExitCode> {
    let device = args.globals.device_client()?;

    let Some(result) = until_interrupted(routes::loader(&device)).await else {
        return Ok(interrupted());
    };
    let redirect = result.with_context(|| format!("entry gate failed for {}", device.base_url()))?;

    print_json(&redirect)?;
    Ok(ExitCode::SUCCESS)
}
