//! Interpolation schemes for discount-factor pillars.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a [`YieldCurve`](crate::YieldCurve) fills the gaps between pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Interpolation {
    /// Linear in `ln(DF)` from `(reference date, 1.0)`: piecewise flat
    /// continuously-compounded forwards.
    #[default]
    LogLinearDiscount,
    /// Linear in continuously-compounded zero rate, flat before the first
    /// pillar.
    LinearZero,
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpolation::LogLinearDiscount => write!(f, "Log-Linear Discount"),
            Interpolation::LinearZero => write!(f, "Linear Zero"),
        }
    }
}
