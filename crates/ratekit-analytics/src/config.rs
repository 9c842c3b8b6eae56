//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! [solver]
//! tolerance = 1e-10
//! max_iterations = 100
//!
//! [curve]
//! interpolation = "LogLinearDiscount"
//! allow_extrapolation = true
//! allow_negative_forwards = false
//!
//! [options]
//! volatility = 0.01
//! lattice_steps = 200
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use ratekit_bonds::options::{OptionModel, DEFAULT_LATTICE_STEPS};
use ratekit_bonds::risk::BASIS_POINT;
use ratekit_curves::{BootstrapConfig, Interpolation};
use ratekit_math::solvers::{SolverConfig, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Root-finder settings shared by bootstrap, yield and spread solves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Absolute tolerance on the objective.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration budget.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

/// Settings for bootstrapped curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSettings {
    /// Interpolation between pillars.
    #[serde(default)]
    pub interpolation: Interpolation,

    /// Whether curves answer past their last pillar.
    #[serde(default = "default_true")]
    pub allow_extrapolation: bool,

    /// Whether discount factors may rise between pillars.
    #[serde(default)]
    pub allow_negative_forwards: bool,

    /// Upper bound of the pillar search when negative forwards are allowed.
    #[serde(default = "default_max_discount_factor")]
    pub max_discount_factor: f64,
}

fn default_true() -> bool {
    true
}

fn default_max_discount_factor() -> f64 {
    1.5
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::default(),
            allow_extrapolation: true,
            allow_negative_forwards: false,
            max_discount_factor: default_max_discount_factor(),
        }
    }
}

/// Settings for bonds with embedded options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionSettings {
    /// Normal short-rate volatility; zero values calls on forwards alone.
    #[serde(default)]
    pub volatility: f64,

    /// Lattice steps to the last cash flow.
    #[serde(default = "default_lattice_steps")]
    pub lattice_steps: usize,

    /// Parallel curve shift for effective duration and convexity.
    #[serde(default = "default_effective_shift")]
    pub effective_shift: f64,
}

fn default_lattice_steps() -> usize {
    DEFAULT_LATTICE_STEPS
}

fn default_effective_shift() -> f64 {
    BASIS_POINT
}

impl Default for OptionSettings {
    fn default() -> Self {
        Self {
            volatility: 0.0,
            lattice_steps: default_lattice_steps(),
            effective_shift: default_effective_shift(),
        }
    }
}

/// Configuration of the curve builder and the valuation engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Root-finder settings.
    #[serde(default)]
    pub solver: SolverSettings,

    /// Curve settings.
    #[serde(default)]
    pub curve: CurveSettings,

    /// Option model settings.
    #[serde(default)]
    pub options: OptionSettings,
}

impl AnalyticsConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> AnalyticsResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| AnalyticsError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| AnalyticsError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> AnalyticsResult<String> {
        toml::to_string(self).map_err(|e| AnalyticsError::config(e.to_string()))
    }

    /// Checks that every setting is usable.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !(self.solver.tolerance.is_finite() && self.solver.tolerance > 0.0) {
            return Err(AnalyticsError::config(format!(
                "solver.tolerance must be positive, got {}",
                self.solver.tolerance
            )));
        }
        if self.solver.max_iterations == 0 {
            return Err(AnalyticsError::config("solver.max_iterations must be at least 1"));
        }
        let max_df = self.curve.max_discount_factor;
        if self.curve.allow_negative_forwards && !(max_df.is_finite() && max_df > 1.0) {
            return Err(AnalyticsError::config(format!(
                "curve.max_discount_factor must exceed 1 with negative forwards, got {max_df}"
            )));
        }
        if !(self.options.volatility.is_finite() && self.options.volatility >= 0.0) {
            return Err(AnalyticsError::config(format!(
                "options.volatility must be non-negative, got {}",
                self.options.volatility
            )));
        }
        if self.options.lattice_steps == 0 {
            return Err(AnalyticsError::config("options.lattice_steps must be at least 1"));
        }
        if !(self.options.effective_shift.is_finite() && self.options.effective_shift > 0.0) {
            return Err(AnalyticsError::config(format!(
                "options.effective_shift must be positive, got {}",
                self.options.effective_shift
            )));
        }
        Ok(())
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.solver.tolerance = tolerance;
        self
    }

    /// Sets the curve interpolation.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.curve.interpolation = interpolation;
        self
    }

    /// Sets the short-rate volatility for callable bonds.
    #[must_use]
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.options.volatility = volatility;
        self
    }

    /// Solver configuration for every root find.
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.solver.tolerance, self.solver.max_iterations)
    }

    /// Bootstrap configuration.
    pub fn bootstrap_config(&self) -> BootstrapConfig {
        let config = BootstrapConfig::default()
            .with_interpolation(self.curve.interpolation)
            .with_extrapolation(self.curve.allow_extrapolation)
            .with_solver(self.solver_config());
        if self.curve.allow_negative_forwards {
            config.with_negative_forwards(self.curve.max_discount_factor)
        } else {
            config
        }
    }

    /// Short-rate model for callable bonds.
    pub fn option_model(&self) -> OptionModel {
        OptionModel::ho_lee(self.options.volatility).with_steps(self.options.lattice_steps)
    }
}
