//! CSV-backed quote feed.
//!
//! Expected columns, with a header row:
//!
//! ```text
//! instrument_id,date,value
//! DEP3M,2025-01-15,0.0312
//! SW2Y,2025-01-15,0.0340
//! ```
//!
//! Values keep the precision written in the file. A later row for the same
//! instrument and date replaces an earlier one.

use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use ratekit_core::{Date, InstrumentId, Quote};

use crate::error::{FeedError, FeedResult};
use crate::memory::InMemoryQuoteFeed;
use crate::traits::QuoteFeed;

#[derive(Debug, Deserialize)]
struct QuoteRecord {
    instrument_id: String,
    date: String,
    value: String,
}

/// Quote feed loaded from a CSV file.
#[derive(Debug)]
pub struct CsvQuoteFeed {
    source: Option<PathBuf>,
    quotes: InMemoryQuoteFeed,
}

impl CsvQuoteFeed {
    /// Loads all quotes from a file.
    pub fn from_path(path: impl AsRef<Path>) -> FeedResult<Self> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path).map_err(|e| FeedError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let quotes = load(reader)?;
        debug!(path = %path.display(), quotes = quotes.len(), "loaded quote file");
        Ok(Self {
            source: Some(path.to_path_buf()),
            quotes,
        })
    }

    /// Loads all quotes from any reader.
    pub fn from_reader<R: Read>(reader: R) -> FeedResult<Self> {
        let quotes = load(csv::Reader::from_reader(reader))?;
        debug!(quotes = quotes.len(), "loaded quotes from reader");
        Ok(Self {
            source: None,
            quotes,
        })
    }

    /// Re-reads the source file, replacing every loaded quote.
    ///
    /// A feed built from a reader has nothing to reload.
    pub fn reload(&mut self) -> FeedResult<()> {
        if let Some(path) = self.source.clone() {
            *self = Self::from_path(path)?;
        }
        Ok(())
    }

    /// The file the quotes came from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Number of loaded quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// True when the source held no quotes.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl QuoteFeed for CsvQuoteFeed {
    fn get_quotes(&self, ids: &[InstrumentId], as_of: Date) -> FeedResult<HashMap<InstrumentId, Quote>> {
        self.quotes.get_quotes(ids, as_of)
    }
}

fn load<R: Read>(mut reader: csv::Reader<R>) -> FeedResult<InMemoryQuoteFeed> {
    let quotes = InMemoryQuoteFeed::new();
    for (index, record) in reader.deserialize::<QuoteRecord>().enumerate() {
        // Header is line 1.
        let line = index as u64 + 2;
        let record = record.map_err(|e| FeedError::parse(line, e.to_string()))?;
        quotes.insert(parse_record(&record, line)?);
    }
    Ok(quotes)
}

fn parse_record(record: &QuoteRecord, line: u64) -> FeedResult<Quote> {
    let id = record.instrument_id.trim();
    if id.is_empty() {
        return Err(FeedError::parse(line, "empty instrument_id"));
    }
    let as_of = Date::parse(&record.date).map_err(|e| FeedError::parse(line, e.to_string()))?;
    let value = Decimal::from_str(record.value.trim())
        .map_err(|e| FeedError::parse(line, format!("value '{}': {e}", record.value)))?;
    Ok(Quote::new(id, as_of, value))
}
