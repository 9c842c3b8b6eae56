//! Forward-starting view of a curve.

use std::sync::Arc;

use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::Date;

use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// The discounting `base` implies from a later reference date.
///
/// `DF(T) = DF_base(T) / DF_base(anchor)`, so forward rates are those of the
/// base and the curve is worth `1.0` at `anchor`.
///
/// ```rust
/// use std::sync::Arc;
/// use ratekit_core::types::Date;
/// use ratekit_curves::{Curve, FlatForwardCurve, ImpliedCurve};
///
/// let today = Date::from_ymd(2025, 1, 15).unwrap();
/// let in_a_year = Date::from_ymd(2026, 1, 15).unwrap();
/// let base = Arc::new(FlatForwardCurve::new(today, 0.04));
/// let forward = ImpliedCurve::new(base, in_a_year).unwrap();
///
/// let two_y = Date::from_ymd(2027, 1, 15).unwrap();
/// assert!((forward.discount_factor(two_y).unwrap() - (-0.04f64).exp()).abs() < 1e-14);
/// ```
#[derive(Clone)]
pub struct ImpliedCurve {
    base: Arc<dyn Curve>,
    anchor: Date,
    anchor_df: f64,
}

impl std::fmt::Debug for ImpliedCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImpliedCurve")
            .field("base_reference_date", &self.base.reference_date())
            .field("reference_date", &self.anchor)
            .field("anchor_df", &self.anchor_df)
            .finish_non_exhaustive()
    }
}

impl ImpliedCurve {
    /// Re-anchors `base` at `reference_date`.
    ///
    /// `DateOutOfRange` when `reference_date` is before the base's reference
    /// date or outside what the base can discount to.
    pub fn new(base: Arc<dyn Curve>, reference_date: Date) -> CurveResult<Self> {
        let anchor_df = base.discount_factor(reference_date)?;
        if !(anchor_df.is_finite() && anchor_df > 0.0) {
            return Err(CurveError::invalid_curve(format!(
                "base discount factor {anchor_df} at {reference_date} cannot anchor a curve"
            )));
        }
        Ok(Self {
            base,
            anchor: reference_date,
            anchor_df,
        })
    }

    /// The curve being re-anchored.
    pub fn base(&self) -> &Arc<dyn Curve> {
        &self.base
    }
}

impl Curve for ImpliedCurve {
    fn reference_date(&self) -> Date {
        self.anchor
    }

    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        if date < self.anchor {
            return Err(CurveError::date_out_of_range(date, self.anchor, self.max_date()));
        }
        if date == self.anchor {
            return Ok(1.0);
        }
        Ok(self.base.discount_factor(date)? / self.anchor_df)
    }

    fn max_date(&self) -> Date {
        self.base.max_date()
    }

    fn day_count(&self) -> DayCountConvention {
        self.base.day_count()
    }
}
