//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Suggest nicely spaced labels for a chart axis.
///
/// Prints at least N values from X_MIN to X_MAX, spaced by a power of ten
/// times 1, 2 or 5, each formatted with the printf-style pattern FMT.
#[derive(Parser, Debug)]
#[command(name = "axislbl")]
#[command(author, version, about, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file (default: $XDG_CONFIG_HOME/axislbl/axislbl.toml)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Text written after each label (default: a single space)
    #[arg(short, long, allow_hyphen_values = true)]
    pub separator: Option<String>,

    /// Keep refining the step while all labels fit into COLS characters
    #[arg(short, long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    /// Start of the axis
    #[arg(value_name = "X_MIN", required_unless_present = "completions")]
    pub x_min: Option<String>,

    /// End of the axis, greater than X_MIN
    #[arg(value_name = "X_MAX", required_unless_present = "completions")]
    pub x_max: Option<String>,

    /// Desired minimum number of labels
    #[arg(value_name = "N", required_unless_present = "completions")]
    pub n: Option<String>,

    /// printf-style pattern for one value (default: %g)
    #[arg(value_name = "FMT", allow_hyphen_values = true)]
    pub fmt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positionals_with_negative_numbers() {
        let cli = Cli::try_parse_from(["axislbl", "-10", "-2.5e1", "4"]).unwrap();
        assert_eq!(cli.x_min.as_deref(), Some("-10"));
        assert_eq!(cli.x_max.as_deref(), Some("-2.5e1"));
        assert_eq!(cli.n.as_deref(), Some("4"));
        assert_eq!(cli.fmt, None);
    }

    #[test]
    fn test_options_and_format() {
        let cli =
            Cli::try_parse_from(["axislbl", "-vv", "-w", "40", "0", "1", "3", "%.2f"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.width, Some(40));
        assert_eq!(cli.fmt.as_deref(), Some("%.2f"));
    }

    #[test]
    fn test_too_few_positionals_is_an_error() {
        let err = Cli::try_parse_from(["axislbl", "0", "1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_too_many_positionals_is_an_error() {
        let result = Cli::try_parse_from(["axislbl", "0", "1", "3", "%g", "extra"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_completions_need_no_positionals() {
        let cli = Cli::try_parse_from(["axislbl", "--completions", "bash"]).unwrap();
        assert_eq!(cli.completions, Some(clap_complete::Shell::Bash));
        assert!(cli.x_min.is_none());
    }
}
