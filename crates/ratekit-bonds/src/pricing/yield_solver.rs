//! Yield-to-maturity from price and price from yield.
//!
//! All flows are discounted at one flat yield `y` with the time to each
//! payment measured by the bond's day count from the valuation date:
//!
//! | Compounding | Discount factor | d/dy |
//! |---|---|---|
//! | periodic (n) | `(1 + y/n)^(-n t)` | `-t (1 + y/n)^(-n t - 1)` |
//! | continuous | `e^(-y t)` | `-t e^(-y t)` |
//! | simple | `1 / (1 + y t)` | `-t / (1 + y t)^2` |

use tracing::debug;

use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::{Compounding, Date, InstrumentId};
use ratekit_math::solvers::{newton_bisection, SolverConfig};

use crate::cashflows::ResolvedFlow;
use crate::error::{BondError, BondResult};
use crate::terms::BondTerms;

/// Highest yield searched.
pub const MAX_YIELD: f64 = 2.0;

/// Lowest yield searched (further limited for simple compounding).
pub const MIN_YIELD: f64 = -0.5;

/// Flows positioned in yield time, ready for repeated pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldFlows {
    times: Vec<f64>,
    amounts: Vec<f64>,
    compounding: Compounding,
}

impl YieldFlows {
    /// Positions `flows` paid after `as_of`.
    pub fn new(
        flows: &[ResolvedFlow],
        as_of: Date,
        day_count: DayCountConvention,
        compounding: Compounding,
    ) -> BondResult<Self> {
        let mut times = Vec::with_capacity(flows.len());
        let mut amounts = Vec::with_capacity(flows.len());
        for flow in flows.iter().filter(|f| f.date > as_of) {
            times.push(day_count.year_fraction(as_of, flow.date)?);
            amounts.push(flow.amount);
        }
        Ok(Self {
            times,
            amounts,
            compounding,
        })
    }

    /// Uses the bond's day count and yield compounding.
    pub fn for_terms(terms: &BondTerms, flows: &[ResolvedFlow], as_of: Date) -> BondResult<Self> {
        Self::new(flows, as_of, terms.day_count, terms.yield_compounding)
    }

    /// Number of positioned flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when nothing is left to pay.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time of the last flow.
    #[must_use]
    pub fn last_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    /// `(time, amount)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.amounts.iter().copied())
    }

    /// Compounding of the yield.
    #[must_use]
    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    /// Dirty price at yield `y`.
    #[must_use]
    pub fn price(&self, y: f64) -> f64 {
        self.iter().map(|(t, cf)| cf * self.discount(y, t).0).sum()
    }

    /// Price with its first and second derivatives in `y`.
    #[must_use]
    pub fn price_derivatives(&self, y: f64) -> (f64, f64, f64) {
        self.iter().fold((0.0, 0.0, 0.0), |(p, dp, d2p), (t, cf)| {
            let (df, d1, d2) = self.discount(y, t);
            (p + cf * df, dp + cf * d1, d2p + cf * d2)
        })
    }

    /// Time-weighted price, `Σ t × cf × DF(y, t)`.
    #[must_use]
    pub fn time_weighted_price(&self, y: f64) -> f64 {
        self.iter().map(|(t, cf)| t * cf * self.discount(y, t).0).sum()
    }

    /// Discount factor at `t` and its first two derivatives.
    fn discount(&self, y: f64, t: f64) -> (f64, f64, f64) {
        match self.compounding.periods_per_year() {
            Some(n) => {
                let n = f64::from(n);
                let base = 1.0 + y / n;
                let df = base.powf(-n * t);
                (df, -t * df / base, t * (t + 1.0 / n) * df / (base * base))
            }
            None if self.compounding.is_simple() => {
                let base = 1.0 + y * t;
                (1.0 / base, -t / (base * base), 2.0 * t * t / (base * base * base))
            }
            None => {
                let df = (-y * t).exp();
                (df, -t * df, t * t * df)
            }
        }
    }

    /// Yield bounds that keep every discount factor finite and positive.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        let lower = match self.compounding.periods_per_year() {
            Some(n) => MIN_YIELD.max(-0.99 * f64::from(n)),
            None if self.compounding.is_simple() && self.last_time() > 0.0 => {
                MIN_YIELD.max(-0.99 / self.last_time())
            }
            None => MIN_YIELD,
        };
        (lower, MAX_YIELD)
    }
}

/// Solves for the flat yield reproducing a dirty price.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldSolver {
    config: SolverConfig,
}

impl YieldSolver {
    /// Creates a solver with the given tolerance and iteration budget.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The solver configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Yield at which `flows` are worth `dirty_price`.
    ///
    /// # Errors
    ///
    /// `YieldConvergence` when no yield in the search range reproduces the
    /// price, and `InvalidSpec` when there is nothing left to discount.
    pub fn solve(&self, id: &InstrumentId, flows: &YieldFlows, dirty_price: f64) -> BondResult<f64> {
        if flows.is_empty() {
            return Err(BondError::invalid_spec(format!("{id}: no cash flows after valuation date")));
        }
        if !dirty_price.is_finite() || dirty_price <= 0.0 {
            return Err(BondError::invalid_spec(format!(
                "{id}: price must be positive, got {dirty_price}"
            )));
        }

        let bounds = flows.bounds();
        let guess = initial_guess(flows, dirty_price).clamp(bounds.0, bounds.1);

        let result = newton_bisection(
            |y| flows.price(y) - dirty_price,
            |y| flows.price_derivatives(y).1,
            guess,
            bounds,
            &self.config,
        )
        .map_err(|e| BondError::yield_convergence(id.as_str(), &e, self.config.max_iterations))?;

        debug!(
            instrument = %id,
            yield_ = result.root,
            iterations = result.iterations,
            "yield solved"
        );
        Ok(result.root)
    }
}

/// Rough continuously-compounded yield from total cash over price.
fn initial_guess(flows: &YieldFlows, dirty_price: f64) -> f64 {
    let total: f64 = flows.iter().map(|(_, cf)| cf).sum();
    let horizon = flows.last_time();
    if total <= 0.0 || horizon <= 0.0 {
        return 0.05;
    }
    (total / dirty_price).ln() / horizon
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn annual_flows(coupon: f64, years: i32) -> Vec<ResolvedFlow> {
        (1..=years)
            .map(|k| ResolvedFlow {
                date: d(2025 + k, 1, 15),
                amount: if k == years { 100.0 + coupon } else { coupon },
            })
            .collect()
    }

    #[test]
    fn test_par_bond_yields_coupon() {
        let flows = YieldFlows::new(
            &annual_flows(5.0, 5),
            d(2025, 1, 15),
            DayCountConvention::Thirty360US,
            Compounding::Annual,
        )
        .unwrap();
        assert_relative_eq!(flows.price(0.05), 100.0, epsilon = 1e-10);

        let y = YieldSolver::default().solve(&"B".into(), &flows, 100.0).unwrap();
        assert_relative_eq!(y, 0.05, epsilon = 1e-10);
    }

    #[test]
    fn test_derivatives_match_finite_differences() {
        for compounding in [
            Compounding::Simple,
            Compounding::Annual,
            Compounding::SemiAnnual,
            Compounding::Continuous,
        ] {
            let flows = YieldFlows::new(
                &annual_flows(4.0, 3),
                d(2025, 1, 15),
                DayCountConvention::Act365Fixed,
                compounding,
            )
            .unwrap();
            let y = 0.043;
            let h = 1e-5;
            let (_, dp, d2p) = flows.price_derivatives(y);
            let fd1 = (flows.price(y + h) - flows.price(y - h)) / (2.0 * h);
            let fd2 = (flows.price(y + h) - 2.0 * flows.price(y) + flows.price(y - h)) / (h * h);
            assert_relative_eq!(dp, fd1, max_relative = 1e-6);
            assert_relative_eq!(d2p, fd2, max_relative = 1e-4);
        }
    }

    #[test]
    fn test_flows_on_or_before_as_of_are_dropped() {
        let flows = YieldFlows::new(
            &annual_flows(5.0, 3),
            d(2026, 1, 15),
            DayCountConvention::Thirty360US,
            Compounding::Annual,
        )
        .unwrap();
        assert_eq!(flows.len(), 2);
    }

    #[test]
    fn test_unreachable_price_reports_convergence_error() {
        let flows = YieldFlows::new(
            &annual_flows(5.0, 2),
            d(2025, 1, 15),
            DayCountConvention::Thirty360US,
            Compounding::Annual,
        )
        .unwrap();
        let err = YieldSolver::default().solve(&"B".into(), &flows, 10_000.0).unwrap_err();
        assert!(matches!(err, BondError::YieldConvergence { iterations: 0, .. }));
    }

    #[test]
    fn test_empty_flows_rejected() {
        let flows = YieldFlows::new(&[], d(2025, 1, 15), DayCountConvention::Act360, Compounding::Annual).unwrap();
        assert!(matches!(
            YieldSolver::default().solve(&"B".into(), &flows, 100.0),
            Err(BondError::InvalidSpec { .. })
        ));
    }
}
