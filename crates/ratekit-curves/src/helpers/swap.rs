//! Vanilla fixed/float swaps on a single curve.

use serde::{Deserialize, Serialize};

use ratekit_core::calendars::CalendarId;
use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::{Date, Frequency};

use super::{BootstrapHelper, FixedLeg, HelperKind};
use crate::error::CurveResult;
use crate::traits::Curve;

/// Swap par rate, projecting and discounting on the same curve.
///
/// Semi-annual 30/360 US fixed leg by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRate {
    id: String,
    start: Date,
    maturity: Date,
    rate: f64,
    leg: FixedLeg,
}

impl SwapRate {
    /// Creates a swap with a semi-annual 30/360 fixed leg.
    #[must_use]
    pub fn new(id: impl Into<String>, start: Date, maturity: Date, rate: f64) -> Self {
        Self {
            id: id.into(),
            start,
            maturity,
            rate,
            leg: FixedLeg::new(Frequency::SemiAnnual, DayCountConvention::Thirty360US),
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

    /// Effective date.
    pub fn start(&self) -> Date {
        self.start
    }
}

impl BootstrapHelper for SwapRate {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> HelperKind {
        HelperKind::SwapRate
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatForwardCurve;
    use approx::assert_relative_eq;

    #[test]
    fn test_semiannual_par_rate() {
        let today = Date::from_ymd(2025, 1, 15).unwrap();
        let maturity = Date::from_ymd(2026, 1, 15).unwrap();
        let curve = FlatForwardCurve::new(today, 0.04);
        let swap = SwapRate::new("SWAP1Y", today, maturity, 0.0);

        let mid = Date::from_ymd(2025, 7, 15).unwrap();
        let df_mid = curve.discount_factor(mid).unwrap();
        let df_end = curve.discount_factor(maturity).unwrap();
        let expected = (1.0 - df_end) / (0.5 * df_mid + 0.5 * df_end);
        assert_relative_eq!(swap.implied_quote(&curve).unwrap(), expected, epsilon = 1e-12);
        assert_eq!(swap.kind(), HelperKind::SwapRate);
    }
}
