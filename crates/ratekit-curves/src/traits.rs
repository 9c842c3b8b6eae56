//! The discounting interface shared by every curve.

use std::sync::Arc;

use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::{Compounding, Date, InterestRate};

use crate::error::CurveResult;

/// Curve time of `date`: ACT/365F years from the reference date.
///
/// Negative for dates before the reference date.
#[must_use]
pub fn curve_time(reference_date: Date, date: Date) -> f64 {
    reference_date.days_between(&date) as f64 / 365.0
}

/// A discount curve anchored at a reference date.
///
/// Every implementation returns exactly `1.0` at its reference date and
/// rejects dates before it with `DateOutOfRange`. Curves are immutable and
/// shared across threads.
pub trait Curve: Send + Sync {
    /// The valuation date the curve is anchored at.
    fn reference_date(&self) -> Date;

    /// Discount factor from the reference date to `date`.
    fn discount_factor(&self, date: Date) -> CurveResult<f64>;

    /// Last date covered without extrapolation.
    fn max_date(&self) -> Date;

    /// Day count used by [`forward_rate`](Curve::forward_rate).
    fn day_count(&self) -> DayCountConvention {
        DayCountConvention::Act365Fixed
    }

    /// Curve time of `date`.
    fn time(&self, date: Date) -> f64 {
        curve_time(self.reference_date(), date)
    }

    /// Zero rate to `date` in ACT/365F years and the given compounding.
    ///
    /// At the reference date the one-day rate is returned.
    fn zero_rate(&self, date: Date, compounding: Compounding) -> CurveResult<f64> {
        let date = if date == self.reference_date() {
            date.add_days(1)
        } else {
            date
        };
        let df = self.discount_factor(date)?;
        let t = self.time(date);
        Ok(ratekit_core::types::implied_rate(1.0 / df, t, compounding)?)
    }

    /// Simple forward rate between two dates under the curve's day count.
    fn forward_rate(&self, start: Date, end: Date) -> CurveResult<f64> {
        self.forward_rate_with(start, end, self.day_count(), Compounding::Simple)
    }

    /// Forward rate between two dates in an explicit convention.
    fn forward_rate_with(
        &self,
        start: Date,
        end: Date,
        day_count: DayCountConvention,
        compounding: Compounding,
    ) -> CurveResult<f64> {
        let df_start = self.discount_factor(start)?;
        let df_end = self.discount_factor(end)?;
        let rate = InterestRate::implied(df_start / df_end, day_count, compounding, start, end)?;
        Ok(rate.rate)
    }
}

macro_rules! forward_curve_impl {
    ($($ptr:ty),*) => {$(
        impl<C: Curve + ?Sized> Curve for $ptr {
            fn reference_date(&self) -> Date {
                (**self).reference_date()
            }

            fn discount_factor(&self, date: Date) -> CurveResult<f64> {
                (**self).discount_factor(date)
            }

            fn max_date(&self) -> Date {
                (**self).max_date()
            }

            fn day_count(&self) -> DayCountConvention {
                (**self).day_count()
            }
        }
    )*};
}

forward_curve_impl!(&C, Box<C>, Arc<C>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatForwardCurve;
    use approx::assert_relative_eq;

    #[test]
    fn test_curve_time() {
        let r = Date::from_ymd(2025, 1, 15).unwrap();
        assert_relative_eq!(curve_time(r, Date::from_ymd(2026, 1, 15).unwrap()), 1.0);
        assert!(curve_time(r, r.add_days(-1)) < 0.0);
    }

    #[test]
    fn test_zero_and_forward_rates_on_flat_curve() {
        let r = Date::from_ymd(2025, 1, 15).unwrap();
        let curve = FlatForwardCurve::new(r, 0.04);
        let two_y = Date::from_ymd(2027, 1, 15).unwrap();

        assert_relative_eq!(curve.zero_rate(two_y, Compounding::Continuous).unwrap(), 0.04, epsilon = 1e-12);
        assert_relative_eq!(curve.zero_rate(r, Compounding::Continuous).unwrap(), 0.04, epsilon = 1e-12);

        let one_y = Date::from_ymd(2026, 1, 15).unwrap();
        let fwd = curve.forward_rate(one_y, two_y).unwrap();
        assert_relative_eq!(fwd, 0.04f64.exp() - 1.0, epsilon = 1e-12);
        assert!(curve.forward_rate(two_y, one_y).is_err());
    }

    #[test]
    fn test_shared_pointer_forwards() {
        let r = Date::from_ymd(2025, 1, 15).unwrap();
        let curve: Arc<dyn Curve> = Arc::new(FlatForwardCurve::new(r, 0.03));
        let by_ref: &dyn Curve = &curve;
        assert_eq!(by_ref.reference_date(), r);
        assert_eq!(curve.discount_factor(r).unwrap(), 1.0);
    }
}
