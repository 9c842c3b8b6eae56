//! Feed and store errors.

use std::path::PathBuf;

use ratekit_core::{Date, InstrumentId};
use thiserror::Error;

/// A specialized Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;

/// Errors raised by quote feeds and result stores.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeedError {
    /// No quote for an instrument on a date.
    #[error("No quote for {instrument_id} as of {as_of}")]
    QuoteNotFound {
        /// The instrument asked for.
        instrument_id: InstrumentId,
        /// The date asked for.
        as_of: Date,
    },

    /// A quote source could not be read.
    #[error("Cannot read {path}: {message}")]
    Io {
        /// Source path.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },

    /// A quote record could not be parsed.
    #[error("Malformed quote at line {line}: {message}")]
    Parse {
        /// 1-based line number, header included.
        line: u64,
        /// What is wrong.
        message: String,
    },

    /// A backend refused a write.
    #[error("Store error: {0}")]
    Store(String),
}

impl FeedError {
    /// Creates a quote-not-found error.
    #[must_use]
    pub fn quote_not_found(instrument_id: &InstrumentId, as_of: Date) -> Self {
        Self::QuoteNotFound {
            instrument_id: instrument_id.clone(),
            as_of,
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(line: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
