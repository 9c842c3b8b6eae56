//! Sequential bootstrap.
//!
//! Helpers are sorted by maturity and solved one at a time: each step finds
//! the single discount factor at the helper's maturity that makes its
//! implied quote match the market, keeping every earlier pillar fixed.

use std::cell::RefCell;

use tracing::{debug, info};

use ratekit_core::types::Date;
use ratekit_math::solvers::{newton_bisection_numerical, SolverConfig};
use ratekit_math::MathError;

use crate::curves::YieldCurve;
use crate::error::{CurveError, CurveResult};
use crate::helpers::BootstrapHelper;
use crate::interpolation::Interpolation;
use crate::repricing::{RepricingCheck, RepricingReport};
use crate::traits::Curve;

/// Lower bound of the discount factor search.
const MIN_DISCOUNT_FACTOR: f64 = 1e-12;

/// Configuration for the bootstrap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BootstrapConfig {
    /// Interpolation of the output curve.
    pub interpolation: Interpolation,
    /// Whether the output curve extrapolates past its last pillar.
    pub allow_extrapolation: bool,
    /// Allow discount factors to increase between pillars.
    pub allow_negative_forwards: bool,
    /// Upper bound of the search when negative forwards are allowed.
    pub max_discount_factor: f64,
    /// Root finder settings.
    pub solver: SolverConfig,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::default(),
            allow_extrapolation: true,
            allow_negative_forwards: false,
            max_discount_factor: 1.0,
            solver: SolverConfig::default(),
        }
    }
}

impl BootstrapConfig {
    /// Sets the interpolation.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Enables or disables extrapolation on the output curve.
    #[must_use]
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Allows negative forwards, searching discount factors up to `max_df`.
    #[must_use]
    pub fn with_negative_forwards(mut self, max_df: f64) -> Self {
        self.allow_negative_forwards = true;
        self.max_discount_factor = max_df;
        self
    }

    /// Sets the solver configuration.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }
}

/// A bootstrapped curve with its repricing audit.
#[derive(Debug, Clone)]
pub struct BootstrapResult {
    /// The curve.
    pub curve: YieldCurve,
    /// Every helper repriced off the curve.
    pub report: RepricingReport,
}

impl BootstrapResult {
    /// Discards the report.
    pub fn into_curve(self) -> YieldCurve {
        self.curve
    }
}

/// Sequential bootstrapper.
///
/// ```rust
/// use ratekit_core::types::Date;
/// use ratekit_curves::prelude::*;
///
/// let today = Date::from_ymd(2025, 1, 15).unwrap();
/// let two_y = Date::from_ymd(2027, 1, 15).unwrap();
/// let result = Bootstrapper::new(today)
///     .add_helper(Deposit::new("DEP6M", today, today.add_days(181), 0.040))
///     .add_helper(SwapRate::new("SWAP2Y", today, two_y, 0.042))
///     .bootstrap_with_report()
///     .unwrap();
///
/// assert!(result.report.all_within(1e-9));
/// ```
#[derive(Debug)]
pub struct Bootstrapper {
    reference_date: Date,
    helpers: Vec<Box<dyn BootstrapHelper>>,
    config: BootstrapConfig,
}

impl Bootstrapper {
    /// Creates a bootstrapper for a curve anchored at `reference_date`.
    pub fn new(reference_date: Date) -> Self {
        Self {
            reference_date,
            helpers: Vec::new(),
            config: BootstrapConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the interpolation.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.config.interpolation = interpolation;
        self
    }

    /// Adds a helper.
    #[must_use]
    pub fn add_helper<H: BootstrapHelper + 'static>(mut self, helper: H) -> Self {
        self.helpers.push(Box::new(helper));
        self
    }

    /// Adds an already boxed helper.
    #[must_use]
    pub fn add_boxed(mut self, helper: Box<dyn BootstrapHelper>) -> Self {
        self.helpers.push(helper);
        self
    }

    /// Adds several helpers.
    #[must_use]
    pub fn add_helpers(mut self, helpers: impl IntoIterator<Item = Box<dyn BootstrapHelper>>) -> Self {
        self.helpers.extend(helpers);
        self
    }

    /// Number of helpers added.
    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    /// Whether no helpers were added.
    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }

    /// Bootstraps the curve.
    ///
    /// # Errors
    ///
    /// - `InvalidHelper` if a helper matures on or before the reference date
    /// - `DuplicatePillar` if two helpers share a maturity
    /// - `BootstrapConvergence` for the first pillar that cannot be solved
    pub fn bootstrap(self) -> CurveResult<YieldCurve> {
        let (curve, _) = self.run()?;
        Ok(curve)
    }

    /// Bootstraps the curve and reprices every helper off it.
    pub fn bootstrap_with_report(self) -> CurveResult<BootstrapResult> {
        let (curve, helpers) = self.run()?;
        let checks = helpers
            .iter()
            .map(|h| RepricingCheck::from_helper(h.as_ref(), &curve))
            .collect::<CurveResult<Vec<_>>>()?;
        Ok(BootstrapResult {
            curve,
            report: RepricingReport::new(checks),
        })
    }

    fn run(mut self) -> CurveResult<(YieldCurve, Vec<Box<dyn BootstrapHelper>>)> {
        if self.helpers.is_empty() {
            return Err(CurveError::invalid_curve("no helpers to bootstrap"));
        }
        self.helpers.sort_by_key(|h| h.maturity());
        self.validate()?;

        let mut pillars: Vec<(Date, f64)> = Vec::with_capacity(self.helpers.len());
        for helper in &self.helpers {
            let df = self.solve_pillar(helper.as_ref(), &pillars)?;
            debug!(
                helper = helper.id(),
                kind = %helper.kind(),
                maturity = %helper.maturity(),
                discount_factor = df,
                "solved pillar"
            );
            pillars.push((helper.maturity(), df));
        }

        let curve = YieldCurve::from_pillars(self.reference_date, pillars, self.config.interpolation)?
            .with_extrapolation(self.config.allow_extrapolation);
        info!(
            reference_date = %self.reference_date,
            pillars = curve.pillars().len(),
            interpolation = %self.config.interpolation,
            "curve bootstrapped"
        );
        Ok((curve, self.helpers))
    }

    fn validate(&self) -> CurveResult<()> {
        for helper in &self.helpers {
            if helper.maturity() <= self.reference_date {
                return Err(CurveError::invalid_helper(
                    helper.id(),
                    format!(
                        "maturity {} is not after reference date {}",
                        helper.maturity(),
                        self.reference_date
                    ),
                ));
            }
        }
        for pair in self.helpers.windows(2) {
            if pair[0].maturity() == pair[1].maturity() {
                return Err(CurveError::DuplicatePillar {
                    date: pair[0].maturity(),
                    first: pair[0].id().to_string(),
                    second: pair[1].id().to_string(),
                });
            }
        }
        Ok(())
    }

    fn trial_curve(&self, pillars: &[(Date, f64)], date: Date, df: f64) -> CurveResult<YieldCurve> {
        let mut points = pillars.to_vec();
        points.push((date, df));
        YieldCurve::from_pillars(self.reference_date, points, self.config.interpolation)
    }

    fn solve_pillar(&self, helper: &dyn BootstrapHelper, pillars: &[(Date, f64)]) -> CurveResult<f64> {
        let maturity = helper.maturity();
        let previous = pillars.last().map_or(1.0, |(_, df)| *df);
        let upper = if self.config.allow_negative_forwards {
            self.config.max_discount_factor
        } else {
            previous
        };

        let guess = if pillars.is_empty() {
            0.5 * (MIN_DISCOUNT_FACTOR + upper)
        } else {
            YieldCurve::from_pillars(self.reference_date, pillars.to_vec(), self.config.interpolation)?
                .discount_factor(maturity)?
        };

        let failure: RefCell<Option<CurveError>> = RefCell::new(None);
        let objective = |df: f64| -> f64 {
            if !df.is_finite() || df <= 0.0 {
                return f64::NAN;
            }
            let attempt = self
                .trial_curve(pillars, maturity, df)
                .and_then(|curve| helper.quote_error(&curve));
            match attempt {
                Ok(error) => error,
                Err(e) => {
                    failure.borrow_mut().get_or_insert(e);
                    f64::NAN
                }
            }
        };

        let solved = newton_bisection_numerical(
            objective,
            guess,
            (MIN_DISCOUNT_FACTOR, upper),
            &self.config.solver,
        );

        match solved {
            Ok(result) => Ok(result.root),
            Err(err) => {
                if let Some(e) = failure.into_inner() {
                    return Err(e);
                }
                Err(convergence_error(helper, &err, self.config.solver.max_iterations))
            }
        }
    }
}

fn convergence_error(helper: &dyn BootstrapHelper, err: &MathError, max_iterations: u32) -> CurveError {
    let iterations = match err {
        MathError::ConvergenceFailed { iterations, .. } => *iterations,
        MathError::InvalidBracket { .. } => 0,
        _ => max_iterations,
    };
    let (last_iterate, residual) = err.diagnostics().unwrap_or((f64::NAN, f64::NAN));
    CurveError::BootstrapConvergence {
        helper: helper.id().to_string(),
        maturity: helper.maturity(),
        iterations,
        residual,
        last_iterate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{CurrencyFuture, Deposit, FraDi, Ois, SwapRate};
    use approx::assert_relative_eq;
    use ratekit_core::daycounts::DayCountConvention;
    use ratekit_core::types::Compounding;

    fn today() -> Date {
        Date::from_ymd(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_single_deposit() {
        let end = today().add_days(360);
        let curve = Bootstrapper::new(today())
            .add_helper(Deposit::new("DEP1Y", today(), end, 0.03))
            .bootstrap()
            .unwrap();
        assert_relative_eq!(curve.discount_factor(end).unwrap(), 1.0 / 1.03, epsilon = 1e-10);
    }

    #[test]
    fn test_helpers_sorted_and_repriced() {
        let t = today();
        let six_m = Date::from_ymd(2025, 7, 15).unwrap();
        let result = Bootstrapper::new(t)
            .add_helper(SwapRate::new("SWAP3Y", t, Date::from_ymd(2028, 1, 18).unwrap(), 0.045))
            .add_helper(Deposit::new("DEP3M", t, Date::from_ymd(2025, 4, 15).unwrap(), 0.040))
            .add_helper(
                FraDi::new("FRA6x12", six_m, Date::from_ymd(2026, 1, 15).unwrap(), 0.043)
                    .with_convention(DayCountConvention::Act360, Compounding::Simple),
            )
            .add_helper(Deposit::new("DEP6M", t, six_m, 0.041))
            .bootstrap_with_report()
            .unwrap();

        let ids: Vec<&str> = result.report.checks().iter().map(|c| c.helper.as_str()).collect();
        assert_eq!(ids, vec!["DEP3M", "DEP6M", "FRA6x12", "SWAP3Y"]);
        assert!(result.report.all_within(1e-9), "{}", result.report);

        let dfs: Vec<f64> = result.curve.pillars().iter().map(|p| p.discount_factor).collect();
        assert!(dfs.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn test_duplicate_maturity_rejected() {
        let end = today().add_days(90);
        let err = Bootstrapper::new(today())
            .add_helper(Deposit::new("A", today(), end, 0.03))
            .add_helper(Ois::new("B", today(), end, 0.03))
            .bootstrap()
            .unwrap_err();
        assert!(matches!(
            err,
            CurveError::DuplicatePillar { ref first, ref second, .. } if first == "A" && second == "B"
        ));
    }

    #[test]
    fn test_expired_helper_rejected() {
        let err = Bootstrapper::new(today())
            .add_helper(Deposit::new("OLD", today().add_days(-10), today(), 0.03))
            .bootstrap()
            .unwrap_err();
        assert!(matches!(err, CurveError::InvalidHelper { .. }));
    }

    #[test]
    fn test_negative_forward_fails_without_permission() {
        let t = today();
        let builder = || {
            Bootstrapper::new(t)
                .add_helper(Deposit::new("DEP1Y", t, t.add_days(360), 0.05))
                .add_helper(Deposit::new("DEP2Y", t, t.add_days(720), 0.01))
        };

        let err = builder().bootstrap().unwrap_err();
        match err {
            CurveError::BootstrapConvergence { helper, iterations, .. } => {
                assert_eq!(helper, "DEP2Y");
                assert_eq!(iterations, 0);
            }
            other => panic!("unexpected error {other:?}"),
        }

        let curve = builder()
            .with_config(BootstrapConfig::default().with_negative_forwards(1.0))
            .bootstrap()
            .unwrap();
        let p = curve.pillars();
        assert!(p[1].discount_factor > p[0].discount_factor);
    }

    #[test]
    fn test_currency_future_pillar() {
        let t = today();
        let one_y = Date::from_ymd(2026, 1, 15).unwrap();
        let foreign_df = (-0.04f64).exp();
        let price = 5.0 * foreign_df / (-0.12f64).exp();
        let curve = Bootstrapper::new(t)
            .add_helper(CurrencyFuture::new("DOLF26", one_y, price, 5.0, foreign_df))
            .bootstrap()
            .unwrap();
        assert_relative_eq!(curve.discount_factor(one_y).unwrap(), (-0.12f64).exp(), epsilon = 1e-10);
    }

    #[test]
    fn test_empty_bootstrapper() {
        assert!(Bootstrapper::new(today()).is_empty());
        assert!(Bootstrapper::new(today()).bootstrap().is_err());
    }
}
