//! Error types for numerical routines.

use thiserror::Error;

/// A specialized Result type for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// Errors raised by solvers and interpolators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// A root finder exhausted its iteration budget.
    #[error(
        "Convergence failed after {iterations} iterations (last iterate: {last_iterate}, residual: {residual:.2e})"
    )]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Objective value at the last iterate.
        residual: f64,
        /// The last iterate.
        last_iterate: f64,
    },

    /// The objective does not change sign over the bracket.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// Query point outside an interpolator's range.
    #[error("Extrapolation not allowed: {x} is outside [{min}, {max}]")]
    ExtrapolationNotAllowed {
        /// The query point.
        x: f64,
        /// Minimum valid value.
        min: f64,
        /// Maximum valid value.
        max: f64,
    },

    /// Not enough points to build an interpolator.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// Invalid input parameter or a non-finite objective value.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64, last_iterate: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
            last_iterate,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// The last iterate and residual, when the error came from a solver
    /// that got as far as iterating.
    #[must_use]
    pub fn diagnostics(&self) -> Option<(f64, f64)> {
        match self {
            Self::ConvergenceFailed {
                last_iterate,
                residual,
                ..
            } => Some((*last_iterate, *residual)),
            Self::InvalidBracket { a, b, fa, fb } => {
                if fa.abs() <= fb.abs() {
                    Some((*a, *fa))
                } else {
                    Some((*b, *fb))
                }
            }
            _ => None,
        }
    }
}
