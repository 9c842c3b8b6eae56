//! Error types for curve construction and valuation.

use std::path::PathBuf;

use ratekit_bonds::BondError;
use ratekit_core::CoreError;
use ratekit_curves::CurveError;
use ratekit_feeds::FeedError;
use thiserror::Error;

/// A specialized Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors raised while building curves or valuing instruments.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Configuration could not be read or is inconsistent.
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong.
        message: String,
    },

    /// Configuration file could not be read.
    #[error("Cannot read configuration {path}: {message}")]
    ConfigFile {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },

    /// Quote retrieval failed.
    #[error(transparent)]
    Feed(#[from] FeedError),

    /// Curve construction or evaluation failed.
    #[error(transparent)]
    Curve(#[from] CurveError),

    /// Instrument valuation failed.
    #[error(transparent)]
    Bond(#[from] BondError),

    /// Date or convention error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AnalyticsError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
