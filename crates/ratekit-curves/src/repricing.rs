//! Repricing audit of a bootstrapped curve.

use std::fmt;

use serde::{Deserialize, Serialize};

use ratekit_core::types::Date;

use crate::error::CurveResult;
use crate::helpers::{BootstrapHelper, HelperKind};
use crate::traits::Curve;

/// One helper repriced off the final curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepricingCheck {
    /// Helper identifier.
    pub helper: String,
    /// Helper type.
    pub kind: HelperKind,
    /// Pillar date.
    pub maturity: Date,
    /// Market quote.
    pub observed: f64,
    /// Quote implied by the curve.
    pub implied: f64,
    /// `|implied - observed|`
    pub error: f64,
}

impl RepricingCheck {
    /// Reprices `helper` off `curve`.
    pub fn from_helper(helper: &dyn BootstrapHelper, curve: &dyn Curve) -> CurveResult<Self> {
        let implied = helper.implied_quote(curve)?;
        let observed = helper.quote();
        Ok(Self {
            helper: helper.id().to_string(),
            kind: helper.kind(),
            maturity: helper.maturity(),
            observed,
            implied,
            error: (implied - observed).abs(),
        })
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} | quote {:.8} | implied {:.8} | error {:.2e}",
            self.kind, self.helper, self.maturity, self.observed, self.implied, self.error
        )
    }
}

/// Repricing checks for every helper of a bootstrap, in maturity order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
}

impl RepricingReport {
    /// Creates a report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        Self { checks }
    }

    /// The individual checks.
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Largest absolute quote error.
    pub fn max_error(&self) -> f64 {
        self.checks.iter().map(|c| c.error).fold(0.0, f64::max)
    }

    /// Root mean square quote error.
    pub fn rms_error(&self) -> f64 {
        if self.checks.is_empty() {
            return 0.0;
        }
        let sum_sq: f64 = self.checks.iter().map(|c| c.error * c.error).sum();
        (sum_sq / self.checks.len() as f64).sqrt()
    }

    /// Whether every helper reprices within `tolerance`.
    pub fn all_within(&self, tolerance: f64) -> bool {
        self.checks.iter().all(|c| c.error <= tolerance)
    }

    /// Helpers repricing outside `tolerance`.
    pub fn failures(&self, tolerance: f64) -> Vec<&RepricingCheck> {
        self.checks.iter().filter(|c| c.error > tolerance).collect()
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Repricing: {} helpers, max error {:.2e}, rms {:.2e}",
            self.checks.len(),
            self.max_error(),
            self.rms_error()
        )?;
        for check in &self.checks {
            writeln!(f, "  {check}")?;
        }
        Ok(())
    }
}
