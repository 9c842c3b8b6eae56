//! Error types for bond operations.

use ratekit_core::{CoreError, Date};
use ratekit_curves::CurveError;
use ratekit_math::MathError;
use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Invalid bond specification.
    #[error("Invalid bond specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: &'static str,
    },

    /// Coupon or call schedule that cannot be used.
    #[error("Invalid schedule: {message}")]
    InvalidSchedule {
        /// What is wrong.
        message: String,
    },

    /// A floating coupon fixed before the curve date has no stored fixing.
    #[error("Missing fixing for {bond} period starting {date}")]
    MissingFixing {
        /// Bond identifier.
        bond: String,
        /// Accrual start of the period.
        date: Date,
    },

    /// No yield reproduces the price.
    #[error(
        "Yield for {bond} did not converge after {iterations} iterations \
         (last yield {last_iterate}, residual {residual:.2e})"
    )]
    YieldConvergence {
        /// Bond identifier.
        bond: String,
        /// Iterations spent.
        iterations: u32,
        /// Price error at the last iterate.
        residual: f64,
        /// Last yield tried.
        last_iterate: f64,
    },

    /// No curve shift reproduces the price.
    #[error(
        "Spread for {bond} did not converge after {iterations} iterations \
         (last spread {last_iterate}, residual {residual:.2e})"
    )]
    SpreadConvergence {
        /// Bond identifier.
        bond: String,
        /// Iterations spent.
        iterations: u32,
        /// Price error at the last iterate.
        residual: f64,
        /// Last spread tried.
        last_iterate: f64,
    },

    /// Date or rate arithmetic failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Discounting failure.
    #[error(transparent)]
    Curve(#[from] CurveError),
}

impl BondError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates an invalid schedule error.
    #[must_use]
    pub fn invalid_schedule(message: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            message: message.into(),
        }
    }

    /// Creates a yield convergence error from a solver failure.
    #[must_use]
    pub fn yield_convergence(bond: impl Into<String>, err: &MathError, max_iterations: u32) -> Self {
        let (iterations, last_iterate, residual) = diagnostics(err, max_iterations);
        Self::YieldConvergence {
            bond: bond.into(),
            iterations,
            residual,
            last_iterate,
        }
    }

    /// Creates a spread convergence error from a solver failure.
    #[must_use]
    pub fn spread_convergence(bond: impl Into<String>, err: &MathError, max_iterations: u32) -> Self {
        let (iterations, last_iterate, residual) = diagnostics(err, max_iterations);
        Self::SpreadConvergence {
            bond: bond.into(),
            iterations,
            residual,
            last_iterate,
        }
    }
}

fn diagnostics(err: &MathError, max_iterations: u32) -> (u32, f64, f64) {
    let iterations = match err {
        MathError::ConvergenceFailed { iterations, .. } => *iterations,
        MathError::InvalidBracket { .. } => 0,
        _ => max_iterations,
    };
    let (last, residual) = err.diagnostics().unwrap_or((f64::NAN, f64::NAN));
    (iterations, last, residual)
}
