//! Constant spreads over a discount curve.
//!
//! Both spreads are parallel shifts of the curve's continuously-compounded
//! zero rates ([`ShiftedCurve`]):
//!
//! - [`z_spread`] discounts the flows projected on the unshifted curve;
//! - [`option_adjusted_spread`] reprices the whole bond on the shifted
//!   curve, so an embedded option is revalued at every trial spread.

use std::cell::RefCell;

use tracing::debug;

use ratekit_core::types::{Date, InstrumentId};
use ratekit_curves::{Curve, ShiftedCurve};
use ratekit_math::solvers::{expand_bracket, newton_bisection, newton_bisection_numerical, SolverConfig};
use ratekit_math::MathError;

use crate::error::{BondError, BondResult};
use crate::traits::Bond;

/// Initial half-width of the spread search.
const INITIAL_HALF_WIDTH: f64 = 0.02;

/// Rounds of bracket growth before giving up.
const MAX_BRACKET_ROUNDS: u32 = 20;

/// Spread over `curve` at which the bond's projected flows are worth
/// `market_dirty`.
///
/// # Errors
///
/// `SpreadConvergence` if no spread reproduces the price.
pub fn z_spread<B: Bond + ?Sized>(
    bond: &B,
    curve: &dyn Curve,
    as_of: Date,
    market_dirty: f64,
    config: &SolverConfig,
) -> BondResult<f64> {
    let flows = bond.resolve_flows(curve, as_of)?;
    let df_as_of = curve.discount_factor(as_of)?;
    let t_as_of = curve.time(as_of);

    let mut points = Vec::with_capacity(flows.len());
    for flow in &flows {
        let df = curve.discount_factor(flow.date)?;
        points.push((curve.time(flow.date) - t_as_of, flow.amount * df / df_as_of));
    }

    let price = |s: f64| points.iter().map(|(t, v)| v * (-s * t).exp()).sum::<f64>() - market_dirty;
    let slope = |s: f64| points.iter().map(|(t, v)| -t * v * (-s * t).exp()).sum::<f64>();

    let solve = || {
        let bracket = expand_bracket(
            price,
            -INITIAL_HALF_WIDTH,
            INITIAL_HALF_WIDTH,
            1.6,
            MAX_BRACKET_ROUNDS,
        )?;
        newton_bisection(price, slope, 0.0, bracket, config)
    };
    let result = solve().map_err(|e| spread_error(bond.id(), &e, config))?;

    debug!(
        instrument = %bond.id(),
        spread = result.root,
        iterations = result.iterations,
        "z-spread solved"
    );
    Ok(result.root)
}

/// Spread over `curve` at which the bond's full valuation (including any
/// embedded option) matches `market_dirty`.
///
/// # Errors
///
/// `SpreadConvergence` if no spread reproduces the price; a pricing error
/// raised at the trial spreads is returned when it stopped the search.
pub fn option_adjusted_spread<B: Bond + ?Sized>(
    bond: &B,
    curve: &dyn Curve,
    as_of: Date,
    market_dirty: f64,
    config: &SolverConfig,
) -> BondResult<f64> {
    let failure: RefCell<Option<BondError>> = RefCell::new(None);
    let objective = |s: f64| {
        let shifted = ShiftedCurve::new(curve, s);
        match bond.dirty_price(&shifted, as_of) {
            Ok(price) => price - market_dirty,
            Err(e) => {
                failure.borrow_mut().get_or_insert(e);
                f64::NAN
            }
        }
    };

    let solve = || {
        let bracket = expand_bracket(
            objective,
            -INITIAL_HALF_WIDTH,
            INITIAL_HALF_WIDTH,
            1.6,
            MAX_BRACKET_ROUNDS,
        )?;
        newton_bisection_numerical(objective, 0.0, bracket, config)
    };

    match solve() {
        Ok(result) => {
            debug!(
                instrument = %bond.id(),
                spread = result.root,
                iterations = result.iterations,
                "option-adjusted spread solved"
            );
            Ok(result.root)
        }
        Err(e) => Err(failure
            .into_inner()
            .unwrap_or_else(|| spread_error(bond.id(), &e, config))),
    }
}

fn spread_error(id: &InstrumentId, err: &MathError, config: &SolverConfig) -> BondError {
    BondError::spread_convergence(id.as_str(), err, config.max_iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::FixedRateBond;
    use crate::terms::BondTerms;
    use approx::assert_relative_eq;
    use ratekit_core::types::Frequency;
    use ratekit_curves::FlatForwardCurve;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn bond() -> FixedRateBond {
        let terms = BondTerms::new("B5", d(2025, 1, 15), d(2030, 1, 15)).with_frequency(Frequency::Annual);
        FixedRateBond::new(terms, 0.05).unwrap()
    }

    #[test]
    fn test_z_spread_recovers_curve_shift() {
        let today = d(2025, 1, 15);
        let curve = FlatForwardCurve::new(today, 0.04);
        let wide = FlatForwardCurve::new(today, 0.0525);
        let bond = bond();
        let market = bond.dirty_price(&wide, today).unwrap();

        let z = z_spread(&bond, &curve, today, market, &SolverConfig::default()).unwrap();
        assert_relative_eq!(z, 0.0125, epsilon = 1e-9);
    }

    #[test]
    fn test_oas_equals_z_spread_without_option() {
        let today = d(2025, 1, 15);
        let curve = FlatForwardCurve::new(today, 0.04);
        let bond = bond();
        let market = 97.5;

        let config = SolverConfig::default();
        let z = z_spread(&bond, &curve, today, market, &config).unwrap();
        let oas = option_adjusted_spread(&bond, &curve, today, market, &config).unwrap();
        assert_relative_eq!(z, oas, epsilon = 1e-8);
    }

    #[test]
    fn test_unreachable_price_fails() {
        let today = d(2025, 1, 15);
        let curve = FlatForwardCurve::new(today, 0.04);
        let err = z_spread(&bond(), &curve, today, -5.0, &SolverConfig::default()).unwrap_err();
        assert!(matches!(err, BondError::SpreadConvergence { .. }));
    }
}
