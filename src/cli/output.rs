//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Name used to prefix diagnostics.
pub const PROGRAM: &str = env!("CARGO_PKG_NAME");

/// Print error (red bold "error:" prefix after the program name) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}: {}", PROGRAM, "error".red().bold(), msg);
}

/// Print warning (yellow "warning:" prefix after the program name) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}: {}", PROGRAM, "warning".yellow(), msg);
}
