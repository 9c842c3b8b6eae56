//! Root-finding algorithms.
//!
//! - [`newton_bisection`]: Newton steps safeguarded by a shrinking bracket.
//!   Always converges for a continuous objective with a sign change, and
//!   converges quadratically near the root.
//! - [`expand_bracket`]: grows an interval until the objective changes sign
//!
//! All routines run a bounded number of iterations and report the last
//! iterate and residual when they give up.
//!
//! # Example: yield of a 5-year annual bond priced at 95
//!
//! ```rust
//! use ratekit_math::solvers::{newton_bisection, SolverConfig};
//!
//! let price = |y: f64| {
//!     (1..=5).map(|t| 5.0 / (1.0 + y).powi(t)).sum::<f64>() + 100.0 / (1.0 + y).powi(5)
//! };
//! let d_price = |y: f64| {
//!     (1..=5).map(|t| -(t as f64) * 5.0 / (1.0 + y).powi(t + 1)).sum::<f64>()
//!         - 500.0 / (1.0 + y).powi(6)
//! };
//!
//! let result = newton_bisection(
//!     |y| price(y) - 95.0,
//!     d_price,
//!     0.05,
//!     (0.0, 0.5),
//!     &SolverConfig::default(),
//! )
//! .unwrap();
//! assert!(result.root > 0.05);
//! ```

mod bracket;
mod newton_bisection;

pub use bracket::expand_bracket;
pub use newton_bisection::{newton_bisection, newton_bisection_numerical};

/// Default absolute tolerance on the objective.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default iteration budget.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Absolute tolerance on the objective value.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a successful root find.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Objective value at the root.
    pub residual: f64,
}
