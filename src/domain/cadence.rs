//! The 10 → 5 → 2 cadence of "nice" step sizes.
//!
//! A step is kept as a cadence position plus a decade exponent, so its numeric
//! value is always an integer mantissa times an exact power of ten:
//!
//! | cadence | value           |
//! |---------|-----------------|
//! | `Ten`   | `10^k`          |
//! | `Five`  | `5 · 10^(k-1)`  |
//! | `Two`   | `2 · 10^(k-1)`  |

use std::fmt;

/// Position within one decade of the cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cadence {
    Ten,
    Five,
    Two,
}

impl Cadence {
    /// Integer mantissa of the step, relative to `10^(k-1)`.
    pub fn mantissa(self) -> u8 {
        match self {
            Cadence::Ten => 10,
            Cadence::Five => 5,
            Cadence::Two => 2,
        }
    }

    /// Multiplier that takes a step at this position to the next finer one.
    pub fn shrink_factor(self) -> f64 {
        match self {
            Cadence::Ten => 0.5,
            Cadence::Five => 0.4,
            Cadence::Two => 0.5,
        }
    }
}

/// A step size on the 10/5/2 cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NiceStep {
    cadence: Cadence,
    decade: i32,
}

impl NiceStep {
    pub fn new(cadence: Cadence, decade: i32) -> Self {
        Self { cadence, decade }
    }

    /// Smallest power of ten at or above `|magnitude|`.
    ///
    /// A zero magnitude maps to the smallest decimal exponent of `f64`.
    pub fn covering(magnitude: f64) -> Self {
        let decade = if magnitude == 0.0 {
            f64::MIN_10_EXP
        } else {
            magnitude.abs().log10().ceil() as i32
        };
        Self::new(Cadence::Ten, decade)
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn decade(&self) -> i32 {
        self.decade
    }

    /// Next finer step: 10 → 5 → 2 → 1 (the ten of the lower decade).
    pub fn finer(self) -> Self {
        match self.cadence {
            Cadence::Ten => Self::new(Cadence::Five, self.decade),
            Cadence::Five => Self::new(Cadence::Two, self.decade),
            Cadence::Two => Self::new(Cadence::Ten, self.decade - 1),
        }
    }

    /// Numeric step size.
    pub fn value(&self) -> f64 {
        scaled(self.cadence.mantissa(), self.decade - 1)
    }
}

impl fmt::Display for NiceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cadence {
            Cadence::Ten => write!(f, "1e{}", self.decade),
            c => write!(f, "{}e{}", c.mantissa(), self.decade - 1),
        }
    }
}

/// `mantissa · 10^exponent`, correctly rounded, by parsing its decimal form.
///
/// Exponents past the `f64` range give `inf` or `0.0`; subnormal results are
/// kept.
fn scaled(mantissa: u8, exponent: i32) -> f64 {
    format!("{mantissa}e{exponent}").parse().unwrap_or(0.0)
}
