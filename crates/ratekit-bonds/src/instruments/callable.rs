//! Fixed-rate bond callable by the issuer on a Bermudan schedule.

use std::collections::BTreeMap;

use tracing::debug;

use ratekit_core::types::Date;
use ratekit_curves::Curve;
use ratekit_math::solvers::SolverConfig;

use crate::cashflows::{CashFlowSchedule, ResolvedFlow};
use crate::error::{BondError, BondResult};
use crate::instruments::FixedRateBond;
use crate::options::{HoLeeLattice, OptionModel};
use crate::pricing::{option_adjusted_spread, YieldFlows, YieldSolver};
use crate::terms::BondTerms;
use crate::traits::Bond;
use crate::types::{CallEntry, CallSchedule};

/// A [`FixedRateBond`] the issuer may redeem on the call dates.
///
/// On exercise the holder receives the call price plus interest accrued to
/// the call date. The issuer calls whenever that is cheaper than keeping
/// the bond alive, so the option-adjusted value is never above the value of
/// the same bond without calls.
#[derive(Debug, Clone)]
pub struct CallableFixedRateBond {
    bond: FixedRateBond,
    calls: CallSchedule,
    model: OptionModel,
}

/// A call date with its settlement on the payment calendar.
#[derive(Debug, Clone, Copy)]
struct Exercise {
    settlement: Date,
    amount: f64,
}

impl CallableFixedRateBond {
    /// Wraps `bond` with a call schedule.
    ///
    /// # Errors
    ///
    /// `InvalidSchedule` if a call date falls after maturity.
    pub fn new(bond: FixedRateBond, calls: CallSchedule) -> BondResult<Self> {
        if let Some(last) = calls.last_date() {
            if last > bond.maturity() {
                return Err(BondError::invalid_schedule(format!(
                    "{}: call date {last} is after maturity {}",
                    bond.id(),
                    bond.maturity()
                )));
            }
        }
        Ok(Self {
            bond,
            calls,
            model: OptionModel::default(),
        })
    }

    /// Sets the short-rate model.
    #[must_use]
    pub fn with_model(mut self, model: OptionModel) -> Self {
        self.model = model;
        self
    }

    /// The bond without calls.
    #[must_use]
    pub fn underlying(&self) -> &FixedRateBond {
        &self.bond
    }

    /// The call schedule.
    #[must_use]
    pub fn call_schedule(&self) -> &CallSchedule {
        &self.calls
    }

    /// The short-rate model.
    #[must_use]
    pub fn model(&self) -> &OptionModel {
        &self.model
    }

    /// Calls still exercisable after `as_of`, with settlement amounts.
    fn live_exercises(&self, as_of: Date) -> BondResult<Vec<Exercise>> {
        let terms = self.bond.terms();
        let calendar = terms.calendar.calendar();
        self.calls
            .after(as_of)
            .map(|entry| -> BondResult<Exercise> {
                let settlement = calendar.adjust(entry.date, terms.business_day_convention)?;
                let amount = entry.strike(terms.notional) + self.bond.accrued_interest(entry.date)?;
                Ok(Exercise {
                    settlement,
                    amount,
                })
            })
            .collect()
    }

    /// Value at the curve's reference date with the issuer's call option
    /// exercised optimally.
    pub fn option_adjusted_value(&self, curve: &dyn Curve, as_of: Date) -> BondResult<f64> {
        let exercises = self.live_exercises(as_of)?;
        if exercises.is_empty() {
            return self.bond.present_value(curve, as_of);
        }
        let flows = self.bond.fixed_flows(as_of);
        let value = if self.model.is_deterministic() {
            deterministic_value(curve, &flows, &exercises)?
        } else {
            self.lattice_value(curve, &flows, &exercises)?
        };
        debug!(
            instrument = %self.bond.id(),
            value,
            volatility = self.model.volatility,
            live_calls = exercises.len(),
            "option-adjusted value"
        );
        Ok(value)
    }

    /// Value of the issuer's option: straight value less option-adjusted value.
    pub fn option_value(&self, curve: &dyn Curve, as_of: Date) -> BondResult<f64> {
        Ok(self.bond.present_value(curve, as_of)? - self.option_adjusted_value(curve, as_of)?)
    }

    fn lattice_value(
        &self,
        curve: &dyn Curve,
        flows: &[ResolvedFlow],
        exercises: &[Exercise],
    ) -> BondResult<f64> {
        let Some(last) = flows.last() else {
            return Ok(0.0);
        };
        let horizon = curve.time(last.date);
        let lattice = HoLeeLattice::calibrate(curve, horizon, self.model.steps, self.model.volatility)?;
        let steps = lattice.steps();

        // Amounts carried to their nearest step at curve forwards. Flows
        // after an exercise on the same step belong to the continuation.
        let mut paid = vec![0.0; steps + 1];
        let mut after_call = vec![0.0; steps + 1];
        let mut strike: Vec<Option<(f64, Date)>> = vec![None; steps + 1];

        for exercise in exercises {
            let k = lattice.nearest_step(curve.time(exercise.settlement));
            let scale = curve.discount_factor(exercise.settlement)? / lattice.curve_discount(k);
            strike[k] = Some((exercise.amount * scale, exercise.settlement));
        }
        for flow in flows {
            let k = lattice.nearest_step(curve.time(flow.date));
            let value = flow.amount * curve.discount_factor(flow.date)? / lattice.curve_discount(k);
            match strike[k] {
                Some((_, settlement)) if flow.date > settlement => after_call[k] += value,
                _ => paid[k] += value,
            }
        }

        let settle = |k: usize, continuation: Vec<f64>| -> Vec<f64> {
            continuation
                .into_iter()
                .map(|cont| {
                    let alive = cont + after_call[k];
                    let kept = match strike[k] {
                        Some((call, _)) => alive.min(call),
                        None => alive,
                    };
                    paid[k] + kept
                })
                .collect()
        };

        let mut values = settle(steps, vec![0.0; steps + 1]);
        for i in (0..steps).rev() {
            values = settle(i, lattice.roll_back(i, &values));
        }
        Ok(values[0])
    }

    /// Yield assuming redemption at `call`.
    pub fn yield_to_call(&self, call: &CallEntry, dirty_price: f64, as_of: Date) -> BondResult<f64> {
        let terms = self.bond.terms();
        let settlement = terms.calendar.calendar().adjust(call.date, terms.business_day_convention)?;
        // Coupons up to the call; the call payment replaces the redemption.
        let mut flows: Vec<ResolvedFlow> = self
            .bond
            .cash_flows()
            .after(as_of)
            .filter(|cf| cf.is_coupon() && cf.payment_date <= settlement)
            .filter_map(|cf| {
                cf.fixed_amount().map(|amount| ResolvedFlow {
                    date: cf.payment_date,
                    amount,
                })
            })
            .collect();
        flows.push(ResolvedFlow {
            date: settlement,
            amount: call.strike(terms.notional) + self.bond.accrued_interest(call.date)?,
        });
        let positioned = YieldFlows::for_terms(terms, &flows, as_of)?;
        YieldSolver::default().solve(&terms.id, &positioned, dirty_price)
    }

    /// Yield to every remaining call date.
    pub fn yields_to_call(&self, dirty_price: f64, as_of: Date) -> BondResult<Vec<(Date, f64)>> {
        self.calls
            .after(as_of)
            .map(|call| -> BondResult<(Date, f64)> {
                Ok((call.date, self.yield_to_call(call, dirty_price, as_of)?))
            })
            .collect()
    }

    /// Lowest of the yields to each call and to maturity, with its date.
    pub fn yield_to_worst(&self, dirty_price: f64, as_of: Date) -> BondResult<(f64, Date)> {
        let mut worst = (self.bond.yield_to_maturity(dirty_price, as_of)?, self.bond.maturity());
        for (date, y) in self.yields_to_call(dirty_price, as_of)? {
            if y < worst.0 {
                worst = (y, date);
            }
        }
        Ok(worst)
    }

    /// Yield to maturity ignoring the calls.
    pub fn yield_to_maturity(&self, dirty_price: f64, as_of: Date) -> BondResult<f64> {
        self.bond.yield_to_maturity(dirty_price, as_of)
    }

    /// Option-adjusted spread matching `market_dirty`.
    pub fn oas(
        &self,
        curve: &dyn Curve,
        as_of: Date,
        market_dirty: f64,
        config: &SolverConfig,
    ) -> BondResult<f64> {
        option_adjusted_spread(self, curve, as_of, market_dirty, config)
    }
}

/// Backward walk over payment and call dates on the curve's forwards.
fn deterministic_value(curve: &dyn Curve, flows: &[ResolvedFlow], exercises: &[Exercise]) -> BondResult<f64> {
    #[derive(Default)]
    struct Event {
        paid: f64,
        call: Option<f64>,
    }

    let mut events: BTreeMap<Date, Event> = BTreeMap::new();
    for flow in flows {
        events.entry(flow.date).or_default().paid += flow.amount;
    }
    for exercise in exercises {
        events.entry(exercise.settlement).or_default().call = Some(exercise.amount);
    }

    let mut later: Option<(f64, f64)> = None;
    for (date, event) in events.iter().rev() {
        let df = curve.discount_factor(*date)?;
        let mut continuation = later.map_or(0.0, |(value, df_later)| value * df_later / df);
        if let Some(call) = event.call {
            continuation = continuation.min(call);
        }
        later = Some((event.paid + continuation, df));
    }
    Ok(later.map_or(0.0, |(value, df)| value * df))
}

impl Bond for CallableFixedRateBond {
    fn terms(&self) -> &BondTerms {
        self.bond.terms()
    }

    fn cash_flows(&self) -> &CashFlowSchedule {
        self.bond.cash_flows()
    }

    fn present_value(&self, curve: &dyn Curve, as_of: Date) -> BondResult<f64> {
        self.option_adjusted_value(curve, as_of)
    }

    fn has_embedded_option(&self) -> bool {
        !self.calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ratekit_core::types::Frequency;
    use ratekit_curves::{FlatForwardCurve, ShiftedCurve};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn six_percent_two_year() -> FixedRateBond {
        let terms = BondTerms::new("C6", d(2025, 1, 15), d(2027, 1, 15)).with_frequency(Frequency::Annual);
        FixedRateBond::new(terms, 0.06).unwrap()
    }

    fn par_call_in_one_year() -> CallSchedule {
        CallSchedule::new(vec![CallEntry::new(d(2026, 1, 15), 100.0)]).unwrap()
    }

    #[test]
    fn test_empty_schedule_matches_bullet_exactly() {
        let today = d(2025, 1, 15);
        let curve = FlatForwardCurve::new(today, 0.05);
        let bullet = six_percent_two_year();
        let callable = CallableFixedRateBond::new(bullet.clone(), CallSchedule::empty()).unwrap();

        assert_eq!(
            callable.present_value(&curve, today).unwrap(),
            bullet.present_value(&curve, today).unwrap()
        );
        assert!(!callable.has_embedded_option());
    }

    #[test]
    fn test_expired_calls_match_bullet_exactly() {
        let today = d(2025, 1, 15);
        let curve = FlatForwardCurve::new(today, 0.05);
        let bullet = six_percent_two_year();
        let callable = CallableFixedRateBond::new(bullet.clone(), par_call_in_one_year()).unwrap();
        let later = d(2026, 3, 1);

        assert_eq!(
            callable.dirty_price(&curve, later).unwrap(),
            bullet.dirty_price(&curve, later).unwrap()
        );
    }

    #[test]
    fn test_par_call_caps_value() {
        let today = d(2025, 1, 15);
        let curve = FlatForwardCurve::new(today, 0.05);
        let bullet = six_percent_two_year();
        let callable = CallableFixedRateBond::new(bullet.clone(), par_call_in_one_year()).unwrap();

        let straight = bullet.present_value(&curve, today).unwrap();
        let adjusted = callable.present_value(&curve, today).unwrap();
        assert!(adjusted < straight);
        // Continuation 106e^-0.05 exceeds the par call, so the bond is called.
        assert_relative_eq!(adjusted, 106.0 * (-0.05f64).exp(), epsilon = 1e-10);
        assert_relative_eq!(
            callable.option_value(&curve, today).unwrap(),
            straight - adjusted,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_out_of_the_money_call_is_worthless() {
        let today = d(2025, 1, 15);
        let curve = FlatForwardCurve::new(today, 0.08);
        let bullet = six_percent_two_year();
        let callable = CallableFixedRateBond::new(bullet.clone(), par_call_in_one_year()).unwrap();
        assert_relative_eq!(
            callable.present_value(&curve, today).unwrap(),
            bullet.present_value(&curve, today).unwrap(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_call_after_maturity_rejected() {
        let calls = CallSchedule::new(vec![CallEntry::new(d(2027, 6, 1), 100.0)]).unwrap();
        assert!(matches!(
            CallableFixedRateBond::new(six_percent_two_year(), calls),
            Err(BondError::InvalidSchedule { .. })
        ));
    }

    #[test]
    fn test_lattice_converges_to_deterministic_value() {
        let today = d(2025, 1, 15);
        let curve = FlatForwardCurve::new(today, 0.05);
        let deterministic = CallableFixedRateBond::new(six_percent_two_year(), par_call_in_one_year()).unwrap();
        let lattice = deterministic.clone().with_model(OptionModel::ho_lee(1e-8));

        assert_relative_eq!(
            lattice.present_value(&curve, today).unwrap(),
            deterministic.present_value(&curve, today).unwrap(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_volatility_lowers_callable_value() {
        let today = d(2025, 1, 15);
        let curve = FlatForwardCurve::new(today, 0.05);
        let callable = CallableFixedRateBond::new(six_percent_two_year(), par_call_in_one_year()).unwrap();
        let calm = callable.present_value(&curve, today).unwrap();
        let volatile = callable
            .clone()
            .with_model(OptionModel::ho_lee(0.015))
            .present_value(&curve, today)
            .unwrap();
        assert!(volatile < calm, "{volatile} >= {calm}");
    }

    #[test]
    fn test_yield_to_worst_is_the_call() {
        let today = d(2025, 1, 15);
        let curve = FlatForwardCurve::new(today, 0.05);
        let callable = CallableFixedRateBond::new(six_percent_two_year(), par_call_in_one_year()).unwrap();
        let dirty = callable.dirty_price(&curve, today).unwrap();

        let (worst, date) = callable.yield_to_worst(dirty, today).unwrap();
        assert_eq!(date, d(2026, 1, 15));
        assert_relative_eq!(worst, 106.0 / dirty - 1.0, epsilon = 1e-10);
        assert!(worst < callable.yield_to_maturity(dirty, today).unwrap());
    }

    #[test]
    fn test_oas_recovers_shift() {
        let today = d(2025, 1, 15);
        let curve = FlatForwardCurve::new(today, 0.05);
        let callable = CallableFixedRateBond::new(six_percent_two_year(), par_call_in_one_year()).unwrap();
        let market = callable.dirty_price(&ShiftedCurve::new(&curve, 0.01), today).unwrap();

        let oas = callable.oas(&curve, today, market, &SolverConfig::default()).unwrap();
        assert_relative_eq!(oas, 0.01, epsilon = 1e-8);
    }
}
