//! Domain layer: the tick planner
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod cadence;
pub mod error;
pub mod planner;

pub use cadence::{Cadence, NiceStep};
pub use error::{DomainError, DomainResult};
pub use planner::{plan, AxisRange, DesiredCount, TickPlan, TickPlanner, REFINE_MAX_TICKS};
