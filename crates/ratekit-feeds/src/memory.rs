//! In-memory backends.

use std::collections::HashMap;

use dashmap::DashMap;
use parking_lot::RwLock;

use ratekit_core::{Date, InstrumentId, Quote};

use crate::error::{FeedError, FeedResult};
use crate::traits::{QuoteFeed, ResultStore};

/// Quote feed backed by a concurrent map.
///
/// Writers and readers may run on different threads.
///
/// ```rust
/// use ratekit_core::{Date, InstrumentId, Quote};
/// use ratekit_feeds::{InMemoryQuoteFeed, QuoteFeed};
///
/// let today = Date::from_ymd(2025, 1, 15).unwrap();
/// let feed = InMemoryQuoteFeed::new();
/// feed.insert(Quote::from_f64("DEP3M", today, 0.031));
///
/// let quote = feed.get_quote(&InstrumentId::new("DEP3M"), today).unwrap();
/// assert!((quote.value_f64() - 0.031).abs() < 1e-12);
/// assert!(feed.get_quote(&InstrumentId::new("DEP6M"), today).is_err());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryQuoteFeed {
    quotes: DashMap<(InstrumentId, Date), Quote>,
}

impl InMemoryQuoteFeed {
    /// Creates an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a quote.
    pub fn insert(&self, quote: Quote) {
        self.quotes
            .insert((quote.instrument_id.clone(), quote.as_of), quote);
    }

    /// Adds or replaces several quotes.
    pub fn extend(&self, quotes: impl IntoIterator<Item = Quote>) {
        for quote in quotes {
            self.insert(quote);
        }
    }

    /// Removes a quote.
    pub fn remove(&self, id: &InstrumentId, as_of: Date) -> Option<Quote> {
        self.quotes.remove(&(id.clone(), as_of)).map(|(_, q)| q)
    }

    /// Number of stored quotes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// True when no quotes are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl FromIterator<Quote> for InMemoryQuoteFeed {
    fn from_iter<I: IntoIterator<Item = Quote>>(iter: I) -> Self {
        let feed = Self::new();
        feed.extend(iter);
        feed
    }
}

impl QuoteFeed for InMemoryQuoteFeed {
    fn get_quotes(&self, ids: &[InstrumentId], as_of: Date) -> FeedResult<HashMap<InstrumentId, Quote>> {
        let mut found = HashMap::with_capacity(ids.len());
        for id in ids {
            let quote = self
                .quotes
                .get(&(id.clone(), as_of))
                .map(|entry| entry.value().clone())
                .ok_or_else(|| FeedError::quote_not_found(id, as_of))?;
            found.insert(id.clone(), quote);
        }
        Ok(found)
    }
}

/// Result store holding everything in a map behind a read-write lock.
#[derive(Debug)]
pub struct InMemoryResultStore<T> {
    results: RwLock<HashMap<(InstrumentId, Date), T>>,
}

impl<T> Default for InMemoryResultStore<T> {
    fn default() -> Self {
        Self {
            results: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> InMemoryResultStore<T> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored results.
    pub fn len(&self) -> usize {
        self.results.read().len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.results.read().is_empty()
    }

    /// Dates with a stored result for `instrument_id`, ascending.
    pub fn dates_for(&self, instrument_id: &InstrumentId) -> Vec<Date> {
        let mut dates: Vec<Date> = self
            .results
            .read()
            .keys()
            .filter(|(id, _)| id == instrument_id)
            .map(|(_, date)| *date)
            .collect();
        dates.sort_unstable();
        dates
    }
}

impl<T: Clone + Send + Sync> ResultStore<T> for InMemoryResultStore<T> {
    fn store(&self, instrument_id: &InstrumentId, as_of: Date, result: &T) -> FeedResult<()> {
        self.results
            .write()
            .insert((instrument_id.clone(), as_of), result.clone());
        Ok(())
    }

    fn get(&self, instrument_id: &InstrumentId, as_of: Date) -> FeedResult<Option<T>> {
        Ok(self
            .results
            .read()
            .get(&(instrument_id.clone(), as_of))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_all_or_nothing() {
        let today = d(2025, 1, 15);
        let feed: InMemoryQuoteFeed = [
            Quote::new("A", today, dec!(0.031)),
            Quote::new("B", today, dec!(0.034)),
        ]
        .into_iter()
        .collect();

        let ids = [InstrumentId::new("A"), InstrumentId::new("B")];
        let quotes = feed.get_quotes(&ids, today).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[&ids[1]].value, dec!(0.034));

        let ids = [InstrumentId::new("A"), InstrumentId::new("C"), InstrumentId::new("D")];
        assert_eq!(
            feed.get_quotes(&ids, today).unwrap_err(),
            FeedError::QuoteNotFound {
                instrument_id: InstrumentId::new("C"),
                as_of: today
            }
        );
    }

    #[test]
    fn test_quotes_are_dated() {
        let feed = InMemoryQuoteFeed::new();
        feed.insert(Quote::new("A", d(2025, 1, 15), dec!(0.031)));
        assert!(feed.get_quote(&InstrumentId::new("A"), d(2025, 1, 16)).is_err());

        feed.insert(Quote::new("A", d(2025, 1, 15), dec!(0.032)));
        assert_eq!(feed.len(), 1);
        assert!(feed.remove(&InstrumentId::new("A"), d(2025, 1, 15)).is_some());
        assert!(feed.is_empty());
    }

    #[test]
    fn test_concurrent_writers() {
        let today = d(2025, 1, 15);
        let feed = Arc::new(InMemoryQuoteFeed::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let feed = Arc::clone(&feed);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        feed.insert(Quote::from_f64(format!("Q{t}-{i}"), today, f64::from(i)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(feed.len(), 100);
        assert!(feed.get_quote(&InstrumentId::new("Q3-24"), today).is_ok());
    }

    #[test]
    fn test_result_store() {
        let store: InMemoryResultStore<f64> = InMemoryResultStore::new();
        let id = InstrumentId::new("B");
        store.store(&id, d(2025, 1, 16), &101.2).unwrap();
        store.store(&id, d(2025, 1, 15), &101.0).unwrap();
        store.store(&id, d(2025, 1, 15), &101.1).unwrap();

        assert_eq!(store.get(&id, d(2025, 1, 15)).unwrap(), Some(101.1));
        assert_eq!(store.get(&id, d(2025, 1, 17)).unwrap(), None);
        assert_eq!(store.dates_for(&id), vec![d(2025, 1, 15), d(2025, 1, 16)]);
        assert_eq!(store.len(), 2);
    }
}
