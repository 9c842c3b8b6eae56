//! Overnight index swaps.

use serde::{Deserialize, Serialize};

use ratekit_core::calendars::CalendarId;
use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::{Date, Frequency};

use super::{BootstrapHelper, FixedLeg, HelperKind};
use crate::error::CurveResult;
use crate::traits::Curve;

/// OIS par rate.
///
/// With the overnight index discounted on the same curve the floating leg
/// is worth `DF(start) - DF(T)`, so
///
/// ```text
/// implied = (DF(start) - DF(T)) / Σ τᵢ DF(tᵢ)
/// ```
///
/// Annual ACT/360 by default. Short OIS quoted as a single period use
/// [`Frequency::Zero`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ois {
    id: String,
    start: Date,
    maturity: Date,
    rate: f64,
    leg: FixedLeg,
}

impl Ois {
    /// Creates an OIS with an annual ACT/360 fixed leg.
    #[must_use]
    pub fn new(id: impl Into<String>, start: Date, maturity: Date, rate: f64) -> Self {
        Self {
            id: id.into(),
            start,
            maturity,
            rate,
            leg: FixedLeg::new(Frequency::Annual, DayCountConvention::Act360),
        }
    }

    /// Sets fixed-leg frequency and day count.
    #[must_use]
    pub fn with_fixed_leg(mut self, frequency: Frequency, day_count: DayCountConvention) -> Self {
        self.leg.frequency = frequency;
        self.leg.day_count = day_count;
        self
    }

    /// Sets the adjustment calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarId) -> Self {
        self.leg = self.leg.with_calendar(calendar);
        self
    }

    /// Fixed leg conventions.
    pub fn fixed_leg(&self) -> &FixedLeg {
        &self.leg
    }
}

impl BootstrapHelper for Ois {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> HelperKind {
        HelperKind::Ois
    }

    fn maturity(&self) -> Date {
        self.maturity
    }

    fn quote(&self) -> f64 {
        self.rate
    }

    fn implied_quote(&self, curve: &dyn Curve) -> CurveResult<f64> {
        self.leg.par_rate(curve, self.start, self.maturity)
    }
}
