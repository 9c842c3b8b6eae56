//! Interfaces to the outside world: where quotes come from and where
//! valuation results go.

use std::collections::HashMap;

use ratekit_core::{Date, InstrumentId, Quote};

use crate::error::{FeedError, FeedResult};

/// Read-only source of market quotes.
///
/// A request either returns a quote for every identifier or fails; callers
/// never see a partial set.
pub trait QuoteFeed: Send + Sync {
    /// Quotes for all `ids` as of `as_of`.
    ///
    /// # Errors
    ///
    /// `QuoteNotFound` for the first identifier without a quote.
    fn get_quotes(&self, ids: &[InstrumentId], as_of: Date) -> FeedResult<HashMap<InstrumentId, Quote>>;

    /// Quote for a single identifier.
    fn get_quote(&self, id: &InstrumentId, as_of: Date) -> FeedResult<Quote> {
        let mut quotes = self.get_quotes(std::slice::from_ref(id), as_of)?;
        quotes
            .remove(id)
            .ok_or_else(|| FeedError::quote_not_found(id, as_of))
    }
}

/// Sink for valuation results, keyed by instrument and date.
///
/// The valuation core only writes; `get` exists for downstream consumers.
pub trait ResultStore<T>: Send + Sync {
    /// Stores `result`, replacing any earlier result for the same key.
    fn store(&self, instrument_id: &InstrumentId, as_of: Date, result: &T) -> FeedResult<()>;

    /// Reads a stored result.
    fn get(&self, instrument_id: &InstrumentId, as_of: Date) -> FeedResult<Option<T>>;
}

impl<F: QuoteFeed + ?Sized> QuoteFeed for &F {
    fn get_quotes(&self, ids: &[InstrumentId], as_of: Date) -> FeedResult<HashMap<InstrumentId, Quote>> {
        (**self).get_quotes(ids, as_of)
    }
}

impl<F: QuoteFeed + ?Sized> QuoteFeed for std::sync::Arc<F> {
    fn get_quotes(&self, ids: &[InstrumentId], as_of: Date) -> FeedResult<HashMap<InstrumentId, Quote>> {
        (**self).get_quotes(ids, as_of)
    }
}
