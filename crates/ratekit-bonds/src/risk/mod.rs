//! Risk metrics for bonds.
//!
//! Yield-based measures come from the analytic price derivatives of
//! [`YieldFlows`]; effective measures reprice the bond on parallel shifts
//! of the discount curve, so they also capture embedded options.

use serde::{Deserialize, Serialize};

use ratekit_core::types::Date;
use ratekit_curves::{Curve, ShiftedCurve};

use crate::error::{BondError, BondResult};
use crate::pricing::YieldFlows;
use crate::traits::Bond;

/// One basis point.
pub const BASIS_POINT: f64 = 1e-4;

/// Yield sensitivities at a given yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldRisk {
    /// Present-value weighted average time of the flows, in years.
    pub macaulay_duration: f64,
    /// `-(1/P) dP/dy`.
    pub modified_duration: f64,
    /// `(1/P) d²P/dy²`.
    pub convexity: f64,
    /// Price change for a one basis point fall in yield.
    pub dv01: f64,
}

impl YieldRisk {
    /// Computes the measures for `flows` at yield `y`.
    ///
    /// # Errors
    ///
    /// `InvalidSpec` when the flows are worth nothing at `y`.
    pub fn compute(flows: &YieldFlows, y: f64) -> BondResult<Self> {
        let (price, dp, d2p) = flows.price_derivatives(y);
        if !(price.is_finite() && price > 0.0) {
            return Err(BondError::invalid_spec(format!(
                "price at yield {y} is {price}, risk is undefined"
            )));
        }
        Ok(Self {
            macaulay_duration: flows.time_weighted_price(y) / price,
            modified_duration: -dp / price,
            convexity: d2p / price,
            dv01: -dp * BASIS_POINT,
        })
    }
}

/// Curve-shift sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveRisk {
    /// `(P₋ - P₊) / (2 P₀ Δ)`.
    pub duration: f64,
    /// `(P₊ + P₋ - 2 P₀) / (P₀ Δ²)`.
    pub convexity: f64,
}

/// Effective duration and convexity from parallel shifts of `bump`.
pub fn effective_risk<B: Bond + ?Sized>(
    bond: &B,
    curve: &dyn Curve,
    as_of: Date,
    bump: f64,
) -> BondResult<EffectiveRisk> {
    if !(bump.is_finite() && bump > 0.0) {
        return Err(BondError::invalid_spec(format!("shift must be positive, got {bump}")));
    }
    let base = bond.dirty_price(curve, as_of)?;
    let up = bond.dirty_price(&ShiftedCurve::new(curve, bump), as_of)?;
    let down = bond.dirty_price(&ShiftedCurve::new(curve, -bump), as_of)?;
    if base == 0.0 {
        return Err(BondError::invalid_spec(format!("{}: zero price", bond.id())));
    }
    Ok(EffectiveRisk {
        duration: (down - up) / (2.0 * base * bump),
        convexity: (up + down - 2.0 * base) / (base * bump * bump),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::FixedRateBond;
    use crate::terms::BondTerms;
    use approx::assert_relative_eq;
    use ratekit_core::daycounts::DayCountConvention;
    use ratekit_core::types::{Compounding, Frequency};
    use ratekit_curves::FlatForwardCurve;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_zero_coupon_durations() {
        let today = d(2025, 1, 15);
        let terms = BondTerms::new("Z", today, d(2030, 1, 15))
            .with_frequency(Frequency::Zero)
            .with_day_count(DayCountConvention::Thirty360US);
        let bond = FixedRateBond::new(terms, 0.0).unwrap();

        let flows = bond.yield_flows(today).unwrap();
        let risk = YieldRisk::compute(&flows, 0.05).unwrap();
        assert_relative_eq!(risk.macaulay_duration, 5.0, epsilon = 1e-12);
        assert_relative_eq!(risk.modified_duration, 5.0 / 1.05, epsilon = 1e-12);
        assert_relative_eq!(risk.convexity, 5.0 * 6.0 / 1.05_f64.powi(2), epsilon = 1e-10);
    }

    #[test]
    fn test_continuous_modified_equals_macaulay() {
        let today = d(2025, 1, 15);
        let terms = BondTerms::new("B", today, d(2028, 1, 15))
            .with_frequency(Frequency::Annual)
            .with_yield_compounding(Compounding::Continuous);
        let bond = FixedRateBond::new(terms, 0.04).unwrap();
        let flows = bond.yield_flows(today).unwrap();
        let risk = YieldRisk::compute(&flows, 0.04).unwrap();
        assert_relative_eq!(risk.macaulay_duration, risk.modified_duration, epsilon = 1e-12);
        assert!(risk.dv01 > 0.0);
    }

    #[test]
    fn test_effective_duration_close_to_continuous_duration() {
        let today = d(2025, 1, 15);
        let terms = BondTerms::new("B", today, d(2030, 1, 15))
            .with_frequency(Frequency::Annual)
            .with_day_count(DayCountConvention::Act365Fixed)
            .with_yield_compounding(Compounding::Continuous);
        let bond = FixedRateBond::new(terms, 0.05).unwrap();
        let curve = FlatForwardCurve::new(today, 0.04);

        let eff = effective_risk(&bond, &curve, today, BASIS_POINT).unwrap();
        let flows = bond.yield_flows(today).unwrap();
        let analytic = YieldRisk::compute(&flows, 0.04).unwrap();
        assert_relative_eq!(eff.duration, analytic.modified_duration, max_relative = 1e-6);
        assert_relative_eq!(eff.convexity, analytic.convexity, max_relative = 1e-4);
    }

    #[test]
    fn test_effective_risk_rejects_bad_bump() {
        let today = d(2025, 1, 15);
        let bond = FixedRateBond::new(BondTerms::new("B", today, d(2027, 1, 15)), 0.05).unwrap();
        let curve = FlatForwardCurve::new(today, 0.04);
        assert!(effective_risk(&bond, &curve, today, 0.0).is_err());
    }
}
