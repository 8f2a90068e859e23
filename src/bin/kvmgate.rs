use anyhow::Result;
use kvmgate::cli::{self, telemetry};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let action = cli::start()?;

    let result = action.execute().await;

    telemetry::shutdown_tracer();

    result
}
