//! Interest rates with an explicit day count and compounding.
//!
//! Conversions between a quoted rate and a compound (or discount) factor
//! over a period are the common currency of helpers, curves and bonds.

use serde::{Deserialize, Serialize};

use super::{Compounding, Date};
use crate::daycounts::DayCountConvention;
use crate::error::{CoreError, CoreResult};

/// Growth factor of one unit at `rate` over `t` years.
#[must_use]
pub fn compound_factor(rate: f64, t: f64, compounding: Compounding) -> f64 {
    match compounding.periods_per_year() {
        Some(n) => {
            let n = f64::from(n);
            (1.0 + rate / n).powf(n * t)
        }
        None if compounding.is_simple() => 1.0 + rate * t,
        None => (rate * t).exp(),
    }
}

/// Rate that grows one unit into `compound` over `t` years.
///
/// # Errors
///
/// Returns `CoreError::InvalidRate` if `compound` is not positive or `t` is
/// not positive.
pub fn implied_rate(compound: f64, t: f64, compounding: Compounding) -> CoreResult<f64> {
    if compound.is_nan() || compound <= 0.0 {
        return Err(CoreError::invalid_rate(format!(
            "compound factor must be positive, got {compound}"
        )));
    }
    if t.is_nan() || t <= 0.0 {
        return Err(CoreError::invalid_rate(format!(
            "period must be positive, got {t} years"
        )));
    }

    Ok(match compounding.periods_per_year() {
        Some(n) => {
            let n = f64::from(n);
            n * (compound.powf(1.0 / (n * t)) - 1.0)
        }
        None if compounding.is_simple() => (compound - 1.0) / t,
        None => compound.ln() / t,
    })
}

/// An interest rate quoted under a day count and compounding convention.
///
/// # Example
///
/// ```rust
/// use ratekit_core::prelude::*;
///
/// let rate = InterestRate::new(0.10, DayCountConvention::Act365Fixed, Compounding::Annual);
/// assert!((rate.compound_factor_for(2.0) - 1.21).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestRate {
    /// The rate as a decimal (0.05 = 5%).
    pub rate: f64,
    /// Day count used to measure periods.
    pub day_count: DayCountConvention,
    /// Compounding convention.
    pub compounding: Compounding,
}

impl InterestRate {
    /// Creates a new interest rate.
    #[must_use]
    pub fn new(rate: f64, day_count: DayCountConvention, compounding: Compounding) -> Self {
        Self {
            rate,
            day_count,
            compounding,
        }
    }

    /// Compound factor over `t` years.
    #[must_use]
    pub fn compound_factor_for(&self, t: f64) -> f64 {
        compound_factor(self.rate, t, self.compounding)
    }

    /// Discount factor over `t` years.
    #[must_use]
    pub fn discount_factor_for(&self, t: f64) -> f64 {
        1.0 / self.compound_factor_for(t)
    }

    /// Compound factor between two dates, measured with this rate's day count.
    pub fn compound_factor(&self, start: Date, end: Date) -> CoreResult<f64> {
        let t = self.day_count.year_fraction(start, end)?;
        Ok(self.compound_factor_for(t))
    }

    /// Discount factor between two dates, measured with this rate's day count.
    pub fn discount_factor(&self, start: Date, end: Date) -> CoreResult<f64> {
        Ok(1.0 / self.compound_factor(start, end)?)
    }

    /// The rate in `day_count`/`compounding` that produces `compound` between the dates.
    pub fn implied(
        compound: f64,
        day_count: DayCountConvention,
        compounding: Compounding,
        start: Date,
        end: Date,
    ) -> CoreResult<Self> {
        let t = day_count.year_fraction(start, end)?;
        Ok(Self::new(implied_rate(compound, t, compounding)?, day_count, compounding))
    }

    /// Re-expresses this rate in another convention over the same date range.
    pub fn equivalent(
        &self,
        day_count: DayCountConvention,
        compounding: Compounding,
        start: Date,
        end: Date,
    ) -> CoreResult<Self> {
        let compound = self.compound_factor(start, end)?;
        Self::implied(compound, day_count, compounding, start, end)
    }
}
