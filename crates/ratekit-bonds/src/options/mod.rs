//! Models for bonds with embedded options.

mod lattice;

pub use lattice::HoLeeLattice;

use serde::{Deserialize, Serialize};

/// Default number of lattice steps.
pub const DEFAULT_LATTICE_STEPS: usize = 200;

/// Short-rate model settings for option-adjusted valuation.
///
/// A zero volatility values the option on the curve's forwards alone; a
/// positive one uses a [`HoLeeLattice`] with normal short-rate volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionModel {
    /// Absolute (normal) volatility of the short rate.
    pub volatility: f64,
    /// Lattice steps up to the last cash flow.
    pub steps: usize,
}

impl Default for OptionModel {
    fn default() -> Self {
        Self {
            volatility: 0.0,
            steps: DEFAULT_LATTICE_STEPS,
        }
    }
}

impl OptionModel {
    /// Lattice model with the given volatility and default steps.
    #[must_use]
    pub fn ho_lee(volatility: f64) -> Self {
        Self {
            volatility,
            ..Self::default()
        }
    }

    /// Sets the number of steps.
    #[must_use]
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// True when no lattice is needed.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.volatility == 0.0
    }
}
