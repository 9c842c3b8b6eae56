//! Tenor-dependent zero spread over another curve.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::Date;
use ratekit_math::interpolation::{Interpolator, LinearInterpolator};

use crate::error::{CurveError, CurveResult};
use crate::traits::{curve_time, Curve};

/// A continuously-compounded zero spread at a date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadNode {
    /// Tenor date.
    pub date: Date,
    /// Spread added to the base zero rate.
    pub spread: f64,
}

impl SpreadNode {
    /// Creates a node.
    #[must_use]
    pub fn new(date: Date, spread: f64) -> Self {
        Self { date, spread }
    }
}

/// `base` with zero spreads interpolated linearly in time between tenor
/// dates and held flat outside them.
///
/// `DF(t) = DF_base(t) · e^{-s(t) · t}`. A single node is a parallel shift.
///
/// ```rust
/// use std::sync::Arc;
/// use ratekit_core::types::Date;
/// use ratekit_curves::{Curve, FlatForwardCurve, SpreadNode, SpreadedCurve};
///
/// let today = Date::from_ymd(2025, 1, 15).unwrap();
/// let one_y = Date::from_ymd(2026, 1, 15).unwrap();
/// let five_y = Date::from_ymd(2030, 1, 15).unwrap();
/// let credit = SpreadedCurve::new(
///     Arc::new(FlatForwardCurve::new(today, 0.03)),
///     vec![SpreadNode::new(one_y, 0.005), SpreadNode::new(five_y, 0.015)],
/// )
/// .unwrap();
/// assert!((credit.spread_at(one_y) - 0.005).abs() < 1e-15);
/// assert!((credit.discount_factor(one_y).unwrap() - (-0.035f64).exp()).abs() < 1e-14);
/// ```
#[derive(Clone)]
pub struct SpreadedCurve {
    base: Arc<dyn Curve>,
    nodes: Vec<SpreadNode>,
    interpolator: Option<LinearInterpolator>,
}

impl std::fmt::Debug for SpreadedCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadedCurve")
            .field("reference_date", &self.base.reference_date())
            .field("nodes", &self.nodes)
            .finish_non_exhaustive()
    }
}

impl SpreadedCurve {
    /// Builds the curve.
    ///
    /// Nodes must be after the base reference date, strictly increasing and
    /// finite; at least one is required.
    pub fn new(base: Arc<dyn Curve>, nodes: Vec<SpreadNode>) -> CurveResult<Self> {
        let reference_date = base.reference_date();
        let Some(first) = nodes.first() else {
            return Err(CurveError::invalid_curve("spreaded curve needs at least one node"));
        };
        if first.date <= reference_date {
            return Err(CurveError::invalid_curve(format!(
                "spread node {} is not after the reference date {reference_date}",
                first.date
            )));
        }
        for pair in nodes.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(CurveError::invalid_curve(format!(
                    "spread nodes must increase: {} then {}",
                    pair[0].date, pair[1].date
                )));
            }
        }
        if let Some(bad) = nodes.iter().find(|n| !n.spread.is_finite()) {
            return Err(CurveError::invalid_curve(format!("spread at {} is not finite", bad.date)));
        }

        let interpolator = if nodes.len() > 1 {
            let xs = nodes.iter().map(|n| curve_time(reference_date, n.date)).collect();
            let ys = nodes.iter().map(|n| n.spread).collect();
            Some(LinearInterpolator::new(xs, ys)?)
        } else {
            None
        };

        Ok(Self {
            base,
            nodes,
            interpolator,
        })
    }

    /// The spread nodes.
    pub fn nodes(&self) -> &[SpreadNode] {
        &self.nodes
    }

    /// The unspreaded curve.
    pub fn base(&self) -> &Arc<dyn Curve> {
        &self.base
    }

    /// Zero spread applied at `date`.
    pub fn spread_at(&self, date: Date) -> f64 {
        let (first, last) = match (self.nodes.first(), self.nodes.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if date <= first.date {
            return first.spread;
        }
        if date >= last.date {
            return last.spread;
        }
        let t = curve_time(self.base.reference_date(), date);
        self.interpolator
            .as_ref()
            .and_then(|interp| interp.interpolate(t).ok())
            .unwrap_or(last.spread)
    }
}

impl Curve for SpreadedCurve {
    fn reference_date(&self) -> Date {
        self.base.reference_date()
    }

    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        let df = self.base.discount_factor(date)?;
        if date == self.base.reference_date() {
            return Ok(df);
        }
        Ok(df * (-self.spread_at(date) * self.time(date)).exp())
    }

    fn max_date(&self) -> Date {
        self.base.max_date()
    }

    fn day_count(&self) -> DayCountConvention {
        self.base.day_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::{FlatForwardCurve, ShiftedCurve};
    use approx::assert_relative_eq;
    use ratekit_core::types::Compounding;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn base() -> Arc<dyn Curve> {
        Arc::new(FlatForwardCurve::new(d(2025, 1, 15), 0.03))
    }

    #[test]
    fn test_spread_interpolates_between_nodes_and_holds_flat() {
        let curve = SpreadedCurve::new(
            base(),
            vec![SpreadNode::new(d(2026, 1, 15), 0.01), SpreadNode::new(d(2027, 1, 15), 0.02)],
        )
        .unwrap();
        assert_eq!(curve.spread_at(d(2025, 6, 1)), 0.01);
        assert_eq!(curve.spread_at(d(2035, 1, 15)), 0.02);
        // 2026-07-16 is 182 days into the 365-day segment.
        assert_relative_eq!(curve.spread_at(d(2026, 7, 16)), 0.01 + 0.01 * 182.0 / 365.0, epsilon = 1e-12);

        let zero = curve.zero_rate(d(2027, 1, 15), Compounding::Continuous).unwrap();
        assert_relative_eq!(zero, 0.05, epsilon = 1e-12);
        assert_eq!(curve.discount_factor(d(2025, 1, 15)).unwrap(), 1.0);
    }

    #[test]
    fn test_single_node_matches_parallel_shift() {
        let spreaded = SpreadedCurve::new(base(), vec![SpreadNode::new(d(2027, 1, 15), 0.0075)]).unwrap();
        let base = base();
        let shifted = ShiftedCurve::new(base.as_ref(), 0.0075);
        for date in [d(2025, 3, 1), d(2027, 1, 15), d(2040, 6, 30)] {
            assert_relative_eq!(
                spreaded.discount_factor(date).unwrap(),
                shifted.discount_factor(date).unwrap(),
                epsilon = 1e-15
            );
        }
    }

    #[test]
    fn test_rejects_bad_nodes() {
        assert!(SpreadedCurve::new(base(), vec![]).is_err());
        assert!(SpreadedCurve::new(base(), vec![SpreadNode::new(d(2025, 1, 15), 0.01)]).is_err());
        assert!(matches!(
            SpreadedCurve::new(
                base(),
                vec![SpreadNode::new(d(2027, 1, 15), 0.01), SpreadNode::new(d(2026, 1, 15), 0.01)],
            ),
            Err(CurveError::InvalidCurve { .. })
        ));
        assert!(SpreadedCurve::new(base(), vec![SpreadNode::new(d(2026, 1, 15), f64::NAN)]).is_err());
    }

    #[test]
    fn test_dates_before_reference_rejected() {
        let curve = SpreadedCurve::new(base(), vec![SpreadNode::new(d(2026, 1, 15), 0.01)]).unwrap();
        assert!(matches!(
            curve.discount_factor(d(2025, 1, 14)),
            Err(CurveError::DateOutOfRange { .. })
        ));
    }
}
