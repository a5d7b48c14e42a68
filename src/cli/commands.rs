//! Command execution

use std::io::Write;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::AxisLabelService;
use crate::application::{LabelLayout, TickFormat};
use crate::cli::args::Cli;
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::{AxisRange, DesiredCount, TickPlanner};

/// Execute the CLI invocation, writing labels to `out`.
///
/// Arguments are validated before the configuration is loaded, and nothing
/// is written to `out` unless every input is valid.
pub fn execute_command(cli: &Cli, out: &mut dyn Write) -> CliResult<()> {
    if let Some(shell) = cli.completions {
        return print_completions(shell, out);
    }

    let (Some(x_min), Some(x_max), Some(n)) = (&cli.x_min, &cli.x_max, &cli.n) else {
        return Err(CliError::Usage(
            "usage: axislbl x_min x_max n [fmt]".to_string(),
        ));
    };
    label_axis(cli, x_min, x_max, n, out)
}

#[instrument(skip(cli, out))]
fn label_axis(
    cli: &Cli,
    x_min: &str,
    x_max: &str,
    n: &str,
    out: &mut dyn Write,
) -> CliResult<()> {
    let min = parse_float("x_min", x_min)?;
    let max = parse_float("x_max", x_max)?;
    let desired = parse_count(n)?;
    let range = AxisRange::new(min, max)?;
    let settings = Settings::load(cli.config.as_deref())?;

    if desired < 1 {
        output::warning(&format!("number of labels {} treated as 1", desired));
    }

    let pattern = cli.fmt.as_deref().unwrap_or(&settings.format);
    let format = TickFormat::parse(pattern)?;
    let separator = cli.separator.as_deref().unwrap_or(&settings.separator);
    debug!(
        "pattern={:?} separator={:?} max_ticks={:?}",
        pattern, separator, settings.max_ticks
    );

    let service = AxisLabelService::new(
        TickPlanner::new(settings.max_ticks),
        LabelLayout::new(format, separator),
    );
    let labels = service.label(&range, DesiredCount::from(desired), cli.width)?;

    out.write_all(labels.line.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|e| CliError::io("write labels", e))
}

fn print_completions(shell: Shell, out: &mut dyn Write) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, out);
    Ok(())
}

/// Parse a finite float argument.
pub fn parse_float(role: &'static str, literal: &str) -> CliResult<f64> {
    match literal.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CliError::Parse {
            role,
            expected: "float value",
            literal: literal.to_string(),
        }),
    }
}

/// Parse the desired label count.
pub fn parse_count(literal: &str) -> CliResult<i64> {
    literal.trim().parse::<i64>().map_err(|_| CliError::Parse {
        role: "number of labels",
        expected: "integer",
        literal: literal.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_accepts_exponents_and_signs() {
        assert_eq!(parse_float("x_min", "-1.5e2").unwrap(), -150.0);
        assert_eq!(parse_float("x_min", " +3 ").unwrap(), 3.0);
        assert_eq!(parse_float("x_min", ".5").unwrap(), 0.5);
    }

    #[test]
    fn test_parse_float_rejects_non_finite() {
        for literal in ["inf", "-infinity", "NaN", "", "1.2.3", "abc"] {
            assert!(parse_float("x_max", literal).is_err(), "{literal}");
        }
    }

    #[test]
    fn test_parse_error_names_role_and_literal() {
        let err = parse_float("x_min", "abc").unwrap_err();
        assert_eq!(err.to_string(), "expected float value for x_min, got abc");
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("5").unwrap(), 5);
        assert_eq!(parse_count("-2").unwrap(), -2);
        let err = parse_count("2.5").unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected integer for number of labels, got 2.5"
        );
    }
}
