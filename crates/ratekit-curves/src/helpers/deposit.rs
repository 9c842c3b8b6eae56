//! Money-market deposit.

use serde::{Deserialize, Serialize};

use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::Date;

use super::{BootstrapHelper, HelperKind};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A simple-rate deposit from `start` to `end`.
///
/// ```text
/// implied = (DF(start) / DF(end) - 1) / τ(start, end)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    id: String,
    start: Date,
    end: Date,
    rate: f64,
    day_count: DayCountConvention,
}

impl Deposit {
    /// Creates a deposit quoted ACT/360.
    #[must_use]
    pub fn new(id: impl Into<String>, start: Date, end: Date, rate: f64) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            rate,
            day_count: DayCountConvention::Act360,
        }
    }

    /// Sets the accrual day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Start date.
    pub fn start(&self) -> Date {
        self.start
    }

    /// Accrual day count.
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }
}

impl BootstrapHelper for Deposit {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> HelperKind {
        HelperKind::Deposit
    }

    fn maturity(&self) -> Date {
        self.end
    }

    fn quote(&self) -> f64 {
        self.rate
    }

    fn implied_quote(&self, curve: &dyn Curve) -> CurveResult<f64> {
        let tau = self.day_count.year_fraction(self.start, self.end)?;
        if tau <= 0.0 {
            return Err(CurveError::invalid_helper(&self.id, "zero-length accrual period"));
        }
        let df_start = curve.discount_factor(self.start)?;
        let df_end = curve.discount_factor(self.end)?;
        Ok((df_start / df_end - 1.0) / tau)
    }
}
