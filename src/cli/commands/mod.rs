pub mod device;
pub mod logging;
pub mod login;

use clap::{
    ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const CMD_CHECK: &str = "check";
pub const CMD_LOGIN: &str = "login";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("kvmgate")
        .about("Local authentication gate for KVM devices")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new(CMD_CHECK)
                .about("Run the entry gate and print where the client should go"),
        )
        .subcommand(login::command());

    let command = device::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "kvmgate");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Local authentication gate for KVM devices".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_device_url_and_timeout() {
        temp_env::with_vars(
            [
                ("KVMGATE_DEVICE_URL", None::<&str>),
                ("KVMGATE_REQUEST_TIMEOUT", None),
            ],
            || {
                let matches = new().get_matches_from(vec![
                    "kvmgate",
                    "--device-url",
                    "http://192.168.1.50",
                    "--request-timeout",
                    "3",
                    "check",
                ]);

                let options = device::Options::parse(&matches).unwrap();
                assert_eq!(options.url, "http://192.168.1.50");
                assert_eq!(options.request_timeout, Duration::from_secs(3));
                assert_eq!(matches.subcommand_name(), Some(CMD_CHECK));
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("KVMGATE_DEVICE_URL", Some("http://kvm.local")),
                ("KVMGATE_REQUEST_TIMEOUT", None),
                ("KVMGATE_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["kvmgate", "check"]);
                let options = device::Options::parse(&matches).unwrap();
                assert_eq!(options.url, "http://kvm.local");
                assert_eq!(options.request_timeout, Duration::from_secs(10));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_device_url_required() {
        temp_env::with_vars([("KVMGATE_DEVICE_URL", None::<&str>)], || {
            let result = new().try_get_matches_from(vec!["kvmgate", "check"]);
            assert_eq!(
                result.map_err(|e| e.kind()).err(),
                Some(clap::error::ErrorKind::MissingRequiredArgument)
            );
        });
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = new().try_get_matches_from(vec![
            "kvmgate",
            "-d",
            "http://kvm.local",
            "--request-timeout",
            "0",
            "check",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        temp_env::with_vars([("KVMGATE_DEVICE_URL", Some("http://kvm.local"))], || {
            assert!(new().try_get_matches_from(vec!["kvmgate"]).is_err());
        });
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("KVMGATE_LOG_LEVEL", Some(level)),
                    ("KVMGATE_DEVICE_URL", Some("http://kvm.local")),
                ],
                || {
                    let matches = new().get_matches_from(vec!["kvmgate", "check"]);
                    assert_eq!(
                        matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                        u8::try_from(index).ok()
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("KVMGATE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "kvmgate".to_string(),
                    "--device-url".to_string(),
                    "http://kvm.local".to_string(),
                    "check".to_string(),
                ];

                // -v is global, so it is accepted after the subcommand too
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_login_password_sources() {
        temp_env::with_vars(
            [
                ("KVMGATE_DEVICE_URL", Some("http://kvm.local")),
                ("KVMGATE_PASSWORD", None),
            ],
            || {
                let matches = new().get_matches_from(vec!["kvmgate", "login"]);
                let (_, sub) = matches.subcommand().unwrap();
                assert!(matches!(
                    login::PasswordSource::parse(sub),
                    login::PasswordSource::Missing
                ));

                let matches =
                    new().get_matches_from(vec!["kvmgate", "login", "--password-stdin"]);
                let (_, sub) = matches.subcommand().unwrap();
                assert!(matches!(
                    login::PasswordSource::parse(sub),
                    login::PasswordSource::Stdin
                ));

                let matches =
                    new().get_matches_from(vec!["kvmgate", "login", "--password", "hunter2"]);
                let (_, sub) = matches.subcommand().unwrap();
                assert!(matches!(
                    login::PasswordSource::parse(sub),
                    login::PasswordSource::Value(_)
                ));
            },
        );
    }

    #[test]
    fn test_login_password_from_env() {
        temp_env::with_vars(
            [
                ("KVMGATE_DEVICE_URL", Some("http://kvm.local")),
                ("KVMGATE_PASSWORD", Some("from-env")),
            ],
            || {
                use secrecy::ExposeSecret;

                let matches = new().get_matches_from(vec!["kvmgate", "login"]);
                let (_, sub) = matches.subcommand().unwrap();
                match login::PasswordSource::parse(sub) {
                    login::PasswordSource::Value(secret) => {
                        assert_eq!(secret.expose_secret(), "from-env");
                    }
                    other => panic!("unexpected password source: {other:?}"),
                }
            },
        );
    }

    #[test]
    fn test_password_flags_conflict() {
        temp_env::with_vars(
            [
                ("KVMGATE_DEVICE_URL", Some("http://kvm.local")),
                ("KVMGATE_PASSWORD", None),
            ],
            || {
                let result = new().try_get_matches_from(vec![
                    "kvmgate",
                    "login",
                    "--password",
                    "a",
                    "--password-stdin",
                ]);
                assert_eq!(
                    result.map_err(|e| e.kind()).err(),
                    Some(clap::error::ErrorKind::ArgumentConflict)
                );
            },
        );
    }
}
