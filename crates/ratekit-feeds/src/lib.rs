//! # ratekit Feeds
//!
//! Boundaries between the valuation core and the outside world:
//!
//! - [`QuoteFeed`]: where market quotes come from
//! - [`ResultStore`]: where valuation results go
//!
//! Reference backends: [`InMemoryQuoteFeed`], [`CsvQuoteFeed`] and
//! [`InMemoryResultStore`].
//!
//! ## Example
//!
//! ```rust
//! use ratekit_core::{Date, InstrumentId};
//! use ratekit_feeds::{CsvQuoteFeed, QuoteFeed};
//!
//! let data = "instrument_id,date,value\nDEP6M,2025-01-15,0.035\n";
//! let feed = CsvQuoteFeed::from_reader(data.as_bytes()).unwrap();
//!
//! let today = Date::from_ymd(2025, 1, 15).unwrap();
//! let quote = feed.get_quote(&InstrumentId::new("DEP6M"), today).unwrap();
//! assert_eq!(quote.value.to_string(), "0.035");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]

pub mod file;
pub mod error;
pub mod memory;
pub mod traits;

pub use file::CsvQuoteFeed;
pub use error::{FeedError, FeedResult};
pub use memory::{InMemoryQuoteFeed, InMemoryResultStore};
pub use traits::{QuoteFeed, ResultStore};
