use clap::{Arg, ArgAction, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_PASSWORD: &str = "password";
pub const ARG_PASSWORD_STDIN: &str = "password-stdin";

/// Where the submitted password comes from.
#[derive(Debug)]
pub enum PasswordSource {
    /// Read one line from stdin after the gate permits login.
    Stdin,
    Value(SecretString),
    /// Nothing supplied; forwarded to the device as `null`.
    Missing,
}

impl PasswordSource {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        if matches.get_flag(ARG_PASSWORD_STDIN) {
            return Self::Stdin;
        }

        matches
            .get_one::<String>(ARG_PASSWORD)
            .map_or(Self::Missing, |value| {
                Self::Value(SecretString::from(value.clone()))
            })
    }
}

#[must_use]
pub fn command() -> Command {
    Command::new("login")
        .about("Run the entry gate, then submit a password if the login form is permitted")
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Device password (prefer --password-stdin or the environment)")
                .env("KVMGATE_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD_STDIN)
                .long(ARG_PASSWORD_STDIN)
                .help("Read the password from stdin")
                .action(ArgAction::SetTrue)
                .conflicts_with(ARG_PASSWORD),
        )
}
