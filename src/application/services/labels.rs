//! Axis label service
//!
//! Plans ticks for a range and renders them into the output line.

use tracing::{debug, info};

use crate::application::layout::LabelLayout;
use crate::application::ApplicationResult;
use crate::domain::{AxisRange, DesiredCount, TickPlan, TickPlanner};

/// Output from labeling one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabels {
    /// The chosen plan (step and tick values)
    pub plan: TickPlan,
    /// Rendered labels, separator after each, newline terminated
    pub line: String,
}

/// Service combining the tick planner with label rendering.
#[derive(Debug, Clone)]
pub struct AxisLabelService {
    planner: TickPlanner,
    layout: LabelLayout,
}

impl AxisLabelService {
    /// Create a new label service.
    pub fn new(planner: TickPlanner, layout: LabelLayout) -> Self {
        Self { planner, layout }
    }

    pub fn layout(&self) -> &LabelLayout {
        &self.layout
    }

    /// Label `range` with at least `desired` intervals.
    ///
    /// With `width`, finer steps are taken while the joined labels still fit
    /// into that many characters.
    pub fn label(
        &self,
        range: &AxisRange,
        desired: DesiredCount,
        width: Option<usize>,
    ) -> ApplicationResult<AxisLabels> {
        let plan = match width {
            Some(width) => {
                debug!("label: fitting labels into {} columns", width);
                self.planner.refine_while(range, desired, |candidate| {
                    self.layout.width(candidate.ticks()) <= width
                })?
            }
            None => self.planner.plan(range, desired)?,
        };
        info!(
            "step {} gives {} ticks over [{}, {}]",
            plan.step_size(),
            plan.ticks().len(),
            range.min(),
            range.max()
        );
        let line = self.layout.line(plan.ticks());
        Ok(AxisLabels { plan, line })
    }
}
