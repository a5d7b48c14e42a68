//! axislbl: nicely spaced tick labels for a chart axis.
//!
//! Given an axis range and a desired minimum number of labels, the planner
//! walks the 10 → 5 → 2 cadence of step sizes from the power of ten covering
//! the range down to the first step that yields enough intervals, and lays
//! out every multiple of that step inside the range.
//!
//! ```
//! let plan = axislbl::domain::plan(0.0, 100.0, 5).unwrap();
//! assert_eq!(plan.step_size(), 20.0);
//! assert_eq!(plan.ticks(), &[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::{ApplicationError, LabelLayout, TickFormat};
pub use domain::{plan, AxisRange, DesiredCount, DomainError, TickPlan, TickPlanner};
