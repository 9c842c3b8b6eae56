//! Fixed-leg schedule and annuity shared by the swap helpers.

use serde::{Deserialize, Serialize};

use ratekit_core::calendars::{BusinessDayConvention, CalendarId};
use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::{implied_rate, Compounding, Date, Frequency};

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Fixed leg conventions of a par swap quote.
///
/// The schedule is rolled backward from maturity, so any stub is at the
/// front. Intermediate dates are adjusted ModifiedFollowing on the
/// calendar; start and maturity are used as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedLeg {
    /// Payment frequency. [`Frequency::Zero`] gives a single period.
    pub frequency: Frequency,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Calendar for date adjustment.
    pub calendar: CalendarId,
}

impl FixedLeg {
    /// Creates fixed leg conventions on a weekends-only calendar.
    #[must_use]
    pub fn new(frequency: Frequency, day_count: DayCountConvention) -> Self {
        Self {
            frequency,
            day_count,
            calendar: CalendarId::WeekendsOnly,
        }
    }

    /// Sets the adjustment calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarId) -> Self {
        self.calendar = calendar;
        self
    }

    /// Period boundaries from `start` to `maturity`, both included.
    pub fn schedule(&self, start: Date, maturity: Date) -> CurveResult<Vec<Date>> {
        if maturity <= start {
            return Err(CurveError::invalid_pillar(format!(
                "swap maturity {maturity} is not after start {start}"
            )));
        }
        let months = self.frequency.months_per_period() as i32;
        if months == 0 {
            return Ok(vec![start, maturity]);
        }

        let calendar = self.calendar.calendar();
        let mut dates = vec![maturity];
        let mut k = 1;
        loop {
            let unadjusted = maturity.add_months(-months * k)?;
            if unadjusted <= start {
                break;
            }
            let adjusted = calendar.adjust(unadjusted, BusinessDayConvention::ModifiedFollowing)?;
            if adjusted > start && dates.last().is_some_and(|last| adjusted < *last) {
                dates.push(adjusted);
            }
            k += 1;
        }
        dates.push(start);
        dates.reverse();
        Ok(dates)
    }

    /// `Σ τᵢ · DF(tᵢ)` over the fixed leg.
    pub fn annuity(&self, curve: &dyn Curve, schedule: &[Date]) -> CurveResult<f64> {
        let mut annuity = 0.0;
        for period in schedule.windows(2) {
            let tau = self.day_count.year_fraction(period[0], period[1])?;
            annuity += tau * curve.discount_factor(period[1])?;
        }
        Ok(annuity)
    }

    /// Par fixed rate for a swap from `start` to `maturity`.
    ///
    /// Single-period legs return the rate compounding `DF(start)/DF(maturity)`
    /// in the day count's natural convention: annual for BUS/252, simple
    /// otherwise.
    pub fn par_rate(&self, curve: &dyn Curve, start: Date, maturity: Date) -> CurveResult<f64> {
        let df_start = curve.discount_factor(start)?;
        let df_end = curve.discount_factor(maturity)?;

        if self.frequency.is_zero() {
            let tau = self.day_count.year_fraction(start, maturity)?;
            let compounding = if self.day_count == DayCountConvention::Business252 {
                Compounding::Annual
            } else {
                Compounding::Simple
            };
            return Ok(implied_rate(df_start / df_end, tau, compounding)?);
        }

        let schedule = self.schedule(start, maturity)?;
        let annuity = self.annuity(curve, &schedule)?;
        if annuity <= 0.0 {
            return Err(CurveError::invalid_pillar(format!(
                "non-positive annuity for swap maturing {maturity}"
            )));
        }
        Ok((df_start - df_end) / annuity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatForwardCurve;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_backward_schedule_with_front_stub() {
        let leg = FixedLeg::new(Frequency::SemiAnnual, DayCountConvention::Thirty360US);
        let dates = leg.schedule(d(2025, 1, 15), d(2026, 3, 16)).unwrap();
        // 2025-03-16 is a Sunday and rolls to Monday
        assert_eq!(
            dates,
            vec![d(2025, 1, 15), d(2025, 3, 17), d(2025, 9, 16), d(2026, 3, 16)]
        );
    }

    #[test]
    fn test_zero_frequency_single_period() {
        let leg = FixedLeg::new(Frequency::Zero, DayCountConvention::Act360);
        let dates = leg.schedule(d(2025, 1, 15), d(2025, 7, 15)).unwrap();
        assert_eq!(dates.len(), 2);

        let curve = FlatForwardCurve::new(d(2025, 1, 15), 0.04);
        let rate = leg.par_rate(&curve, d(2025, 1, 15), d(2025, 7, 15)).unwrap();
        let expected = ((0.04 * 181.0 / 365.0f64).exp() - 1.0) * 360.0 / 181.0;
        assert_relative_eq!(rate, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_par_rate_annual_flat_curve() {
        // Annual 1Y/1Y schedule on ACT/365F reproduces the annual equivalent rate
        let start = d(2025, 1, 15);
        let curve = FlatForwardCurve::new(start, 0.05);
        let leg = FixedLeg::new(Frequency::Annual, DayCountConvention::Act365Fixed);
        let rate = leg.par_rate(&curve, start, d(2027, 1, 15)).unwrap();
        assert_relative_eq!(rate, 0.05f64.exp() - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_reversed_dates() {
        let leg = FixedLeg::new(Frequency::Annual, DayCountConvention::Act360);
        assert!(leg.schedule(d(2025, 1, 15), d(2025, 1, 15)).is_err());
    }
}
