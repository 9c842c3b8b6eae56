//! Stateless valuation of bonds against a curve.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use ratekit_bonds::prelude::{
    effective_risk, z_spread, Bond, CallableFixedRateBond, YieldFlows, YieldRisk, YieldSolver,
};
use ratekit_core::types::{Date, InstrumentId};
use ratekit_curves::Curve;
use ratekit_feeds::ResultStore;

use crate::config::AnalyticsConfig;
use crate::error::AnalyticsResult;
use crate::instrument::{Instrument, ValuationRequest};

/// Everything the engine computes for one instrument on one date.
///
/// Prices are in notional units. Yields and spreads are decimals; the
/// yield uses the bond's own compounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Instrument identifier.
    pub instrument_id: InstrumentId,
    /// Valuation date.
    pub as_of: Date,
    /// Discounted value of the remaining flows at the curve reference date.
    pub present_value: f64,
    /// Model price including accrued interest.
    pub dirty_price: f64,
    /// Model price excluding accrued interest.
    pub clean_price: f64,
    /// Accrued interest at `as_of`.
    pub accrued_interest: f64,
    /// Observed dirty price the yields and spreads were solved against.
    pub market_dirty_price: Option<f64>,
    /// Yield to maturity.
    pub yield_to_maturity: f64,
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Modified duration.
    pub modified_duration: f64,
    /// Yield convexity.
    pub convexity: f64,
    /// Price change for a one basis point fall in yield.
    pub dv01: f64,
    /// Parallel spread over the curve matching the market price.
    pub z_spread: Option<f64>,
    /// Option-adjusted spread, callable bonds with a market price.
    pub oas: Option<f64>,
    /// Duration from curve shifts, callable bonds only.
    pub effective_duration: Option<f64>,
    /// Convexity from curve shifts, callable bonds only.
    pub effective_convexity: Option<f64>,
    /// Lowest of the yields to call and to maturity, callable bonds only.
    pub yield_to_worst: Option<f64>,
    /// Date the worst yield is reached.
    pub worst_date: Option<Date>,
}

/// Values instruments against a curve.
///
/// Holds configuration only; no state is kept between calls. Callable bonds
/// are valued under the option model of the configuration.
///
/// ```rust
/// use ratekit_analytics::{AnalyticsConfig, ValuationEngine};
/// use ratekit_bonds::prelude::*;
/// use ratekit_core::types::{Date, Frequency};
/// use ratekit_curves::FlatForwardCurve;
///
/// let today = Date::from_ymd(2025, 1, 15).unwrap();
/// let terms = BondTerms::new("B5", today, Date::from_ymd(2027, 1, 15).unwrap())
///     .with_frequency(Frequency::Annual);
/// let bond = FixedRateBond::new(terms, 0.05).unwrap();
///
/// let engine = ValuationEngine::new(AnalyticsConfig::default());
/// let curve = FlatForwardCurve::new(today, 0.04);
/// let result = engine.value(&bond.into(), &curve, today, None).unwrap();
///
/// assert!((result.dirty_price - 101.73).abs() < 0.01);
/// assert!(result.z_spread.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    config: AnalyticsConfig,
}

impl ValuationEngine {
    /// Creates an engine.
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Values one instrument.
    ///
    /// # Errors
    ///
    /// Any curve, cash flow or root-finding failure for this instrument.
    pub fn value(
        &self,
        instrument: &Instrument,
        curve: &dyn Curve,
        as_of: Date,
        market_dirty_price: Option<f64>,
    ) -> AnalyticsResult<ValuationResult> {
        let result = match instrument {
            Instrument::Fixed(bond) => self.value_bond(bond, curve, as_of, market_dirty_price)?,
            Instrument::Floating(bond) => self.value_bond(bond, curve, as_of, market_dirty_price)?,
            Instrument::Callable(bond) => {
                let bond = bond.clone().with_model(self.config.option_model());
                self.value_callable(&bond, curve, as_of, market_dirty_price)?
            }
        };
        info!(
            instrument = %result.instrument_id,
            as_of = %as_of,
            dirty_price = result.dirty_price,
            ytm = result.yield_to_maturity,
            "valuation complete"
        );
        Ok(result)
    }

    /// Prices, yield, yield risk and Z-spread for any [`Bond`].
    pub fn value_bond<B: Bond + ?Sized>(
        &self,
        bond: &B,
        curve: &dyn Curve,
        as_of: Date,
        market_dirty_price: Option<f64>,
    ) -> AnalyticsResult<ValuationResult> {
        let solver = self.config.solver_config();

        let present_value = bond.present_value(curve, as_of)?;
        let dirty_price = present_value / curve.discount_factor(as_of)?;
        let accrued_interest = bond.accrued_interest_with(curve, as_of)?;
        let quoted = market_dirty_price.unwrap_or(dirty_price);

        let flows = bond.resolve_flows(curve, as_of)?;
        let yield_flows = YieldFlows::for_terms(bond.terms(), &flows, as_of)?;
        let ytm = YieldSolver::new(solver).solve(bond.id(), &yield_flows, quoted)?;
        let risk = YieldRisk::compute(&yield_flows, ytm)?;

        let z_spread = market_dirty_price
            .map(|price| z_spread(bond, curve, as_of, price, &solver))
            .transpose()?;

        Ok(ValuationResult {
            instrument_id: bond.id().clone(),
            as_of,
            present_value,
            dirty_price,
            clean_price: dirty_price - accrued_interest,
            accrued_interest,
            market_dirty_price,
            yield_to_maturity: ytm,
            macaulay_duration: risk.macaulay_duration,
            modified_duration: risk.modified_duration,
            convexity: risk.convexity,
            dv01: risk.dv01,
            z_spread,
            oas: None,
            effective_duration: None,
            effective_convexity: None,
            yield_to_worst: None,
            worst_date: None,
        })
    }

    fn value_callable(
        &self,
        bond: &CallableFixedRateBond,
        curve: &dyn Curve,
        as_of: Date,
        market_dirty_price: Option<f64>,
    ) -> AnalyticsResult<ValuationResult> {
        let mut result = self.value_bond(bond, curve, as_of, market_dirty_price)?;
        let quoted = market_dirty_price.unwrap_or(result.dirty_price);

        result.oas = market_dirty_price
            .map(|price| bond.oas(curve, as_of, price, &self.config.solver_config()))
            .transpose()?;

        let effective = effective_risk(bond, curve, as_of, self.config.options.effective_shift)?;
        result.effective_duration = Some(effective.duration);
        result.effective_convexity = Some(effective.convexity);

        let (worst, date) = bond.yield_to_worst(quoted, as_of)?;
        result.yield_to_worst = Some(worst);
        result.worst_date = Some(date);
        Ok(result)
    }

    /// Values every request against one curve.
    ///
    /// Failures are logged and returned in place; they do not stop the
    /// batch. Runs on rayon with the `parallel` feature.
    pub fn value_batch(
        &self,
        requests: &[ValuationRequest],
        curve: &dyn Curve,
        as_of: Date,
    ) -> Vec<AnalyticsResult<ValuationResult>> {
        let value_one = |request: &ValuationRequest| {
            let result = self.value(&request.instrument, curve, as_of, request.market_dirty_price);
            if let Err(e) = &result {
                warn!(instrument = %request.instrument.id(), as_of = %as_of, error = %e, "valuation failed");
            }
            result
        };

        #[cfg(feature = "parallel")]
        let results: Vec<_> = {
            use rayon::prelude::*;
            requests.par_iter().map(value_one).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let results: Vec<_> = requests.iter().map(value_one).collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(
            instruments = requests.len(),
            failed,
            as_of = %as_of,
            "batch valuation complete"
        );
        results
    }

    /// Values one instrument and hands the result to `store`.
    pub fn value_and_store<S: ResultStore<ValuationResult> + ?Sized>(
        &self,
        instrument: &Instrument,
        curve: &dyn Curve,
        as_of: Date,
        market_dirty_price: Option<f64>,
        store: &S,
    ) -> AnalyticsResult<ValuationResult> {
        let result = self.value(instrument, curve, as_of, market_dirty_price)?;
        store.store(&result.instrument_id, as_of, &result)?;
        Ok(result)
    }
}
