//! Application layer: label rendering and use cases
//!
//! This layer turns planned ticks into text and orchestrates the domain planner.

pub mod error;
pub mod format;
pub mod layout;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use format::{TickFormat, DEFAULT_PATTERN};
pub use layout::{LabelLayout, DEFAULT_SEPARATOR};
