//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod labels;

pub use labels::{AxisLabelService, AxisLabels};
