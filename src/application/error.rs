//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add rendering and config concerns.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("invalid format '{pattern}': {message}")]
    InvalidFormat { pattern: String, message: String },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    pub fn invalid_format(pattern: &str, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            pattern: pattern.to_string(),
            message: message.into(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
