//! Error types for the core crate.
//!
//! Date arithmetic, day counts, calendars and tenor parsing all report
//! failures through [`CoreError`].

use thiserror::Error;

use crate::types::Date;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid calendar date or date arithmetic overflow.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A date range whose start lies after its end.
    #[error("Invalid date order: start {start} is after end {end}")]
    InvalidDateOrder {
        /// Start of the range.
        start: Date,
        /// End of the range.
        end: Date,
    },

    /// A tenor string that could not be parsed.
    #[error("Invalid tenor '{input}': {reason}")]
    InvalidTenor {
        /// The offending input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Unknown convention or identifier in configuration input.
    #[error("Cannot parse {kind} from '{input}'")]
    Parse {
        /// What was being parsed (e.g. "day count").
        kind: &'static str,
        /// The offending input.
        input: String,
    },

    /// Invalid interest rate arithmetic (e.g. a non-positive compound factor).
    #[error("Invalid rate: {reason}")]
    InvalidRate {
        /// Description of the problem.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid date order error.
    #[must_use]
    pub fn invalid_date_order(start: Date, end: Date) -> Self {
        Self::InvalidDateOrder { start, end }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTenor {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(kind: &'static str, input: impl Into<String>) -> Self {
        Self::Parse {
            kind,
            input: input.into(),
        }
    }

    /// Creates an invalid rate error.
    #[must_use]
    pub fn invalid_rate(reason: impl Into<String>) -> Self {
        Self::InvalidRate {
            reason: reason.into(),
        }
    }
}
