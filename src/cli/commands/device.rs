use clap::{Arg, ArgMatches, Command};
use std::time::Duration;

pub const ARG_DEVICE_URL: &str = "device-url";
pub const ARG_REQUEST_TIMEOUT: &str = "request-timeout";

#[derive(Debug)]
pub struct Options {
    pub url: String,
    pub request_timeout: Duration,
}

impl Options {
    /// Parse device arguments from matches.
    ///
    /// # Errors
    /// Returns an error if the device URL is missing or blank.
    pub fn parse(matches: &ArgMatches) -> anyhow::Result<Self> {
        let url = matches
            .get_one::<String>(ARG_DEVICE_URL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --{ARG_DEVICE_URL}"))?;

        let seconds = matches
            .get_one::<u64>(ARG_REQUEST_TIMEOUT)
            .copied()
            .unwrap_or(10);

        Ok(Self {
            url,
            request_timeout: Duration::from_secs(seconds),
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_DEVICE_URL)
                .short('d')
                .long(ARG_DEVICE_URL)
                .help("Device API base URL, example: http://192.168.1.50")
                .env("KVMGATE_DEVICE_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_REQUEST_TIMEOUT)
                .long(ARG_REQUEST_TIMEOUT)
                .help("Per-request timeout in seconds")
                .env("KVMGATE_REQUEST_TIMEOUT")
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}
