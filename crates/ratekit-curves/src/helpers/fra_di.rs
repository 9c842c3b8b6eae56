//! Forward rate agreements, DI convention by default.

use serde::{Deserialize, Serialize};

use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::{Compounding, Date, InterestRate};

use super::{BootstrapHelper, HelperKind};
use crate::error::CurveResult;
use crate::traits::Curve;

/// Forward rate between two dates.
///
/// The implied quote is the rate that compounds `DF(start)/DF(end)` over
/// the period in the helper's convention, BUS/252 annually compounded
/// unless overridden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraDi {
    id: String,
    start: Date,
    end: Date,
    rate: f64,
    day_count: DayCountConvention,
    compounding: Compounding,
}

impl FraDi {
    /// Creates a FRA in the DI convention.
    #[must_use]
    pub fn new(id: impl Into<String>, start: Date, end: Date, rate: f64) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            rate,
            day_count: DayCountConvention::Business252,
            compounding: Compounding::Annual,
        }
    }

    /// Overrides the quoting convention.
    #[must_use]
    pub fn with_convention(mut self, day_count: DayCountConvention, compounding: Compounding) -> Self {
        self.day_count = day_count;
        self.compounding = compounding;
        self
    }

    /// Start of the forward period.
    pub fn start(&self) -> Date {
        self.start
    }
}

impl BootstrapHelper for FraDi {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> HelperKind {
        HelperKind::FraDi
    }

    fn maturity(&self) -> Date {
        self.end
    }

    fn quote(&self) -> f64 {
        self.rate
    }

    fn implied_quote(&self, curve: &dyn Curve) -> CurveResult<f64> {
        let df_start = curve.discount_factor(self.start)?;
        let df_end = curve.discount_factor(self.end)?;
        let rate = InterestRate::implied(
            df_start / df_end,
            self.day_count,
            self.compounding,
            self.start,
            self.end,
        )?;
        Ok(rate.rate)
    }
}
