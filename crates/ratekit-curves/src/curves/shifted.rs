//! Parallel zero-rate shift over another curve.

use ratekit_core::types::Date;

use crate::error::CurveResult;
use crate::traits::Curve;

/// `base` with its continuously-compounded zero rates moved by `shift`.
///
/// `DF(t) = DF_base(t) · e^{-shift · t}`. Borrowing or sharing the base
/// keeps this cheap enough to rebuild on every spread-solver iteration.
///
/// ```rust
/// use ratekit_core::types::Date;
/// use ratekit_curves::{Curve, FlatForwardCurve, ShiftedCurve};
///
/// let today = Date::from_ymd(2025, 1, 15).unwrap();
/// let base = FlatForwardCurve::new(today, 0.03);
/// let shifted = ShiftedCurve::new(&base, 0.01);
/// let one_y = Date::from_ymd(2026, 1, 15).unwrap();
/// assert!((shifted.discount_factor(one_y).unwrap() - (-0.04f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ShiftedCurve<C> {
    base: C,
    shift: f64,
}

impl<C: Curve> ShiftedCurve<C> {
    /// Creates a shifted view of `base`.
    pub fn new(base: C, shift: f64) -> Self {
        Self { base, shift }
    }

    /// The shift, as a continuously-compounded rate.
    pub fn shift(&self) -> f64 {
        self.shift
    }

    /// The unshifted curve.
    pub fn base(&self) -> &C {
        &self.base
    }
}

impl<C: Curve> Curve for ShiftedCurve<C> {
    fn reference_date(&self) -> Date {
        self.base.reference_date()
    }

    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        let df = self.base.discount_factor(date)?;
        if date == self.base.reference_date() {
            return Ok(df);
        }
        Ok(df * (-self.shift * self.base.time(date)).exp())
    }

    fn max_date(&self) -> Date {
        self.base.max_date()
    }

    fn day_count(&self) -> ratekit_core::daycounts::DayCountConvention {
        self.base.day_count()
    }
}
