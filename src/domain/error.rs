//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the planning rules.
/// These are independent of argument parsing and output concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("x_max must be greater than x_min (x_min={min}, x_max={max})")]
    InvalidRange { min: f64, max: f64 },

    #[error("axis span is not finite (x_min={min}, x_max={max})")]
    NonFiniteSpan { min: f64, max: f64 },

    #[error("no representable step size for a span of {magnitude}")]
    StepOutOfRange { magnitude: f64 },

    #[error("{count} tick positions exceed the limit of {limit}")]
    TooManyTicks { count: u64, limit: u64 },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
