//! Tick planning: step-size search along the cadence and tick layout.

use tracing::{debug, instrument, trace};

use crate::domain::cadence::NiceStep;
use crate::domain::error::{DomainError, DomainResult};

/// Bound on intervals while refining to a width, when no tick limit is set.
pub const REFINE_MAX_TICKS: u64 = 100_000;

/// A validated axis range with `min < max` and a finite span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    min: f64,
    max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> DomainResult<Self> {
        // also rejects NaN on either side
        if !(max > min) {
            return Err(DomainError::InvalidRange { min, max });
        }
        if !(max - min).is_finite() {
            return Err(DomainError::NonFiniteSpan { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn magnitude(&self) -> f64 {
        self.max - self.min
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Desired minimum number of labels. Anything below one counts as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DesiredCount(u64);

impl DesiredCount {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<i64> for DesiredCount {
    fn from(n: i64) -> Self {
        if n < 1 {
            debug!("desired count {} clamped to 1", n);
            Self(1)
        } else {
            Self(n as u64)
        }
    }
}

/// Result of planning: the chosen step and the ticks inside the range.
#[derive(Debug, Clone, PartialEq)]
pub struct TickPlan {
    step: NiceStep,
    intervals: u64,
    ticks: Vec<f64>,
}

impl TickPlan {
    pub fn step(&self) -> NiceStep {
        self.step
    }

    pub fn step_size(&self) -> f64 {
        self.step.value()
    }

    /// `ceil((max - min) / step)` for the chosen step.
    pub fn intervals(&self) -> u64 {
        self.intervals
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    pub fn into_ticks(self) -> Vec<f64> {
        self.ticks
    }
}

/// Plans ticks, optionally refusing plans with more than `max_ticks`
/// intervals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickPlanner {
    max_ticks: Option<u64>,
}

impl TickPlanner {
    pub fn new(max_ticks: Option<u64>) -> Self {
        Self { max_ticks }
    }

    pub fn max_ticks(&self) -> Option<u64> {
        self.max_ticks
    }

    /// Plan the coarsest cadence step giving at least `desired` intervals.
    #[instrument(level = "debug", skip(self))]
    pub fn plan(&self, range: &AxisRange, desired: DesiredCount) -> DomainResult<TickPlan> {
        let step = self.search(range, desired)?;
        self.layout(range, step, self.max_ticks)
    }

    /// Plan as [`TickPlanner::plan`], then keep moving to finer steps while
    /// `fits` accepts the finer plan.
    ///
    /// The plan meeting `desired` is returned even when `fits` rejects it.
    /// Refinement stops at the tick limit (or [`REFINE_MAX_TICKS`] without
    /// one) instead of failing.
    pub fn refine_while<F>(
        &self,
        range: &AxisRange,
        desired: DesiredCount,
        mut fits: F,
    ) -> DomainResult<TickPlan>
    where
        F: FnMut(&TickPlan) -> bool,
    {
        let mut current = self.plan(range, desired)?;
        let limit = self.max_ticks.unwrap_or(REFINE_MAX_TICKS);
        loop {
            let candidate = match self.layout(range, current.step.finer(), Some(limit)) {
                Ok(candidate) => candidate,
                Err(DomainError::TooManyTicks { .. } | DomainError::StepOutOfRange { .. }) => {
                    debug!("refinement stopped at tick limit, step={}", current.step);
                    return Ok(current);
                }
                Err(e) => return Err(e),
            };
            if !fits(&candidate) {
                debug!("refinement stopped, step={} no longer fits", candidate.step);
                return Ok(current);
            }
            trace!("refined to step={}", candidate.step);
            current = candidate;
        }
    }

    fn search(&self, range: &AxisRange, desired: DesiredCount) -> DomainResult<NiceStep> {
        if let Some(limit) = self.max_ticks.filter(|&limit| desired.get() > limit) {
            return Err(DomainError::TooManyTicks {
                count: desired.get(),
                limit,
            });
        }

        let magnitude = range.magnitude();
        let wanted = desired.get() as f64;
        let mut step = NiceStep::covering(magnitude);
        loop {
            let size = step.value();
            if !(size > 0.0) {
                return Err(DomainError::StepOutOfRange { magnitude });
            }
            let intervals = (magnitude / size).ceil();
            trace!("candidate step={} intervals={}", step, intervals);
            if intervals >= wanted {
                debug!("selected step={} ({}) intervals={}", step, size, intervals);
                return Ok(step);
            }
            step = step.finer();
        }
    }

    fn layout(
        &self,
        range: &AxisRange,
        step: NiceStep,
        max_ticks: Option<u64>,
    ) -> DomainResult<TickPlan> {
        let size = step.value();
        if !(size > 0.0) {
            return Err(DomainError::StepOutOfRange {
                magnitude: range.magnitude(),
            });
        }
        let intervals = (range.magnitude() / size).ceil();
        if let Some(limit) = max_ticks.filter(|&limit| intervals > limit as f64) {
            return Err(DomainError::TooManyTicks {
                count: intervals as u64,
                limit,
            });
        }
        let intervals = intervals as u64;

        // anchor: largest multiple of the step not above min
        let start = (range.min / size).floor() * size;
        let ticks = (0..=intervals)
            .map(|i| start + i as f64 * size)
            .filter(|&value| range.contains(value))
            .collect();

        Ok(TickPlan {
            step,
            intervals,
            ticks,
        })
    }
}

/// Plan ticks for `[min, max]` with at least `desired_count` intervals.
pub fn plan(min: f64, max: f64, desired_count: i64) -> DomainResult<TickPlan> {
    let range = AxisRange::new(min, max)?;
    TickPlanner::default().plan(&range, DesiredCount::from(desired_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cadence::Cadence;

    #[test]
    fn test_range_rejects_equal_bounds() {
        assert_eq!(
            AxisRange::new(5.0, 5.0),
            Err(DomainError::InvalidRange { min: 5.0, max: 5.0 })
        );
    }

    #[test]
    fn test_range_rejects_nan() {
        assert!(matches!(
            AxisRange::new(f64::NAN, 1.0),
            Err(DomainError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_range_rejects_overflowing_span() {
        assert!(matches!(
            AxisRange::new(-f64::MAX, f64::MAX),
            Err(DomainError::NonFiniteSpan { .. })
        ));
        assert!(matches!(
            AxisRange::new(0.0, f64::INFINITY),
            Err(DomainError::NonFiniteSpan { .. })
        ));
    }

    #[test]
    fn test_desired_count_clamps_to_one() {
        assert_eq!(DesiredCount::from(0).get(), 1);
        assert_eq!(DesiredCount::from(-7).get(), 1);
        assert_eq!(DesiredCount::from(4).get(), 4);
    }

    #[test]
    fn test_search_stops_at_first_sufficient_step() {
        let planner = TickPlanner::default();
        let range = AxisRange::new(0.0, 100.0).unwrap();
        let step = planner.search(&range, DesiredCount::from(5)).unwrap();
        assert_eq!(step, NiceStep::new(Cadence::Two, 2));
    }

    #[test]
    fn test_desired_above_limit_fails_early() {
        let planner = TickPlanner::new(Some(10));
        let range = AxisRange::new(0.0, 1.0).unwrap();
        assert_eq!(
            planner.plan(&range, DesiredCount::from(11)),
            Err(DomainError::TooManyTicks {
                count: 11,
                limit: 10
            })
        );
    }

    #[test]
    fn test_unlimited_planner_accepts_large_counts() {
        let range = AxisRange::new(0.0, 1.0).unwrap();
        let plan = TickPlanner::default()
            .plan(&range, DesiredCount::from(200_000))
            .unwrap();
        assert_eq!(plan.step(), NiceStep::new(Cadence::Five, -5));
        assert_eq!(plan.intervals(), 200_000);
    }

    #[test]
    fn test_refine_while_without_limit_uses_refine_bound() {
        let range = AxisRange::new(0.0, 100.0).unwrap();
        let plan = TickPlanner::default()
            .refine_while(&range, DesiredCount::from(1), |_| true)
            .unwrap();
        // 0.001 gives 100000 intervals, 0.0005 would give 200000
        assert_eq!(plan.step(), NiceStep::new(Cadence::Ten, -3));
    }

    #[test]
    fn test_refine_while_keeps_last_accepted_plan() {
        let planner = TickPlanner::default();
        let range = AxisRange::new(0.0, 100.0).unwrap();
        // 20 → 10 → 5; accept up to 11 ticks
        let plan = planner
            .refine_while(&range, DesiredCount::from(5), |p| p.ticks().len() <= 11)
            .unwrap();
        assert_eq!(plan.step_size(), 10.0);
        assert_eq!(plan.ticks().len(), 11);
    }

    #[test]
    fn test_refine_while_returns_base_plan_when_nothing_fits() {
        let planner = TickPlanner::default();
        let range = AxisRange::new(0.0, 100.0).unwrap();
        let plan = planner
            .refine_while(&range, DesiredCount::from(5), |_| false)
            .unwrap();
        assert_eq!(plan.step_size(), 20.0);
    }

    #[test]
    fn test_refine_while_stops_at_tick_limit() {
        let planner = TickPlanner::new(Some(50));
        let range = AxisRange::new(0.0, 100.0).unwrap();
        let plan = planner
            .refine_while(&range, DesiredCount::from(1), |_| true)
            .unwrap();
        // 2 would need 50 intervals, 1 would need 100
        assert_eq!(plan.step_size(), 2.0);
        assert_eq!(plan.intervals(), 50);
    }
}
