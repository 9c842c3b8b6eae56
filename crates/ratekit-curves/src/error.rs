//! Error types for curve construction and evaluation.

use ratekit_core::{CoreError, Date};
use ratekit_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// The root finder could not solve a pillar. The whole bootstrap aborts.
    #[error(
        "Bootstrap failed for {helper} maturing {maturity} after {iterations} iterations \
         (last discount factor {last_iterate}, residual {residual:.2e})"
    )]
    BootstrapConvergence {
        /// Helper identifier.
        helper: String,
        /// Pillar being solved.
        maturity: Date,
        /// Iterations spent.
        iterations: u32,
        /// Quote error at the last iterate.
        residual: f64,
        /// Last discount factor tried.
        last_iterate: f64,
    },

    /// Query date before the reference date, or beyond the last pillar with
    /// extrapolation disabled.
    #[error("Date {date} outside curve range [{min}, {max}]")]
    DateOutOfRange {
        /// The requested date.
        date: Date,
        /// Curve reference date.
        min: Date,
        /// Last date the curve covers without extrapolating.
        max: Date,
    },

    /// Two helpers or pillars share a maturity.
    #[error("Duplicate pillar at {date}: {first} and {second}")]
    DuplicatePillar {
        /// The shared date.
        date: Date,
        /// First helper or pillar.
        first: String,
        /// Second helper or pillar.
        second: String,
    },

    /// Pillar data that cannot form a curve.
    #[error("Invalid pillar: {reason}")]
    InvalidPillar {
        /// What is wrong.
        reason: String,
    },

    /// Parent curves of a composite disagree on the reference date.
    #[error("Reference date mismatch: expected {expected}, got {got}")]
    ReferenceDateMismatch {
        /// The composite's reference date.
        expected: Date,
        /// The offending parent's reference date.
        got: Date,
    },

    /// A helper that cannot take part in a bootstrap.
    #[error("Invalid helper {helper}: {reason}")]
    InvalidHelper {
        /// Helper identifier.
        helper: String,
        /// What is wrong.
        reason: String,
    },

    /// Inconsistent composite curve configuration.
    #[error("Invalid curve: {reason}")]
    InvalidCurve {
        /// What is wrong.
        reason: String,
    },

    /// Date or rate arithmetic failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Numerical failure outside a bootstrap.
    #[error(transparent)]
    Math(#[from] MathError),
}

impl CurveError {
    /// Creates a date out of range error.
    #[must_use]
    pub fn date_out_of_range(date: Date, min: Date, max: Date) -> Self {
        Self::DateOutOfRange { date, min, max }
    }

    /// Creates an invalid pillar error.
    #[must_use]
    pub fn invalid_pillar(reason: impl Into<String>) -> Self {
        Self::InvalidPillar {
            reason: reason.into(),
        }
    }

    /// Creates an invalid helper error.
    #[must_use]
    pub fn invalid_helper(helper: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHelper {
            helper: helper.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid curve error.
    #[must_use]
    pub fn invalid_curve(reason: impl Into<String>) -> Self {
        Self::InvalidCurve {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_error_display() {
        let err = CurveError::BootstrapConvergence {
            helper: "SWAP5Y".into(),
            maturity: Date::from_ymd(2030, 1, 15).unwrap(),
            iterations: 100,
            residual: 1e-4,
            last_iterate: 0.81,
        };
        let msg = err.to_string();
        assert!(msg.contains("SWAP5Y"));
        assert!(msg.contains("2030-01-15"));
        assert!(msg.contains("0.81"));
    }

    #[test]
    fn test_core_error_converts() {
        let core = CoreError::invalid_date("bad");
        let err: CurveError = core.clone().into();
        assert_eq!(err, CurveError::Core(core));
    }
}
