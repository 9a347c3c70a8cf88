use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

use super::errors::AppError;

/// Command-line options. Built once at startup and passed by reference afterwards.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "scriptshell", version, about = "Configuration-driven command-line shell")]
pub struct Options {
    /// Show error backtraces as extra debugging output
    #[arg(long, default_value_t = false)]
    pub backtrace: bool,

    /// Extra debugging output
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, value_name = "PATH")]
    pub config: PathBuf,
}

/// Parse `argv` (program name first) into [`Options`].
///
/// Missing `--config`, a repeated `--config`, or an unknown flag yields
/// [`AppError::Usage`]; so do `--help` and `--version`, which the caller renders.
pub fn parse_arguments<I, T>(argv: I) -> Result<Options, AppError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Ok(Options::try_parse_from(argv)?)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    fn usage_kind(argv: &[&str]) -> ErrorKind {
        match parse_arguments(argv) {
            Err(AppError::Usage(e)) => e.kind(),
            other => panic!("expected a usage error, got {other:?}"),
        }
    }

    #[test]
    fn flags_default_to_off() {
        let options = parse_arguments(["scriptshell", "--config", "app.ini"]).unwrap();
        assert_eq!(
            options,
            Options {
                backtrace: false,
                debug: false,
                config: PathBuf::from("app.ini"),
            }
        );
    }

    #[test]
    fn all_flags_are_recognised() {
        let options =
            parse_arguments(["scriptshell", "--debug", "--config=app.ini", "--backtrace"]).unwrap();
        assert!(options.backtrace);
        assert!(options.debug);
        assert_eq!(options.config, PathBuf::from("app.ini"));
    }

    #[test]
    fn config_is_required() {
        assert_eq!(
            usage_kind(&["scriptshell"]),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            usage_kind(&["scriptshell", "--debug", "--backtrace"]),
            ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn config_needs_a_value() {
        assert_eq!(
            usage_kind(&["scriptshell", "--config"]),
            ErrorKind::InvalidValue
        );
    }

    #[test]
    fn config_takes_exactly_one_value() {
        assert_eq!(
            usage_kind(&["scriptshell", "--config", "a.ini", "--config", "b.ini"]),
            ErrorKind::ArgumentConflict
        );
        assert_eq!(
            usage_kind(&["scriptshell", "--config", "a.ini", "b.ini"]),
            ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert_eq!(
            usage_kind(&["scriptshell", "--config", "a.ini", "--verbose"]),
            ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn help_is_reported_through_usage() {
        assert_eq!(usage_kind(&["scriptshell", "--help"]), ErrorKind::DisplayHelp);
    }
}
