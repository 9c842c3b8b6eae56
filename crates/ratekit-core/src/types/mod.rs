//! Core domain types.

mod date;
mod frequency;
mod quote;
mod rate;
mod tenor;

pub use date::Date;
pub use frequency::{Compounding, Frequency};
pub use quote::{InstrumentId, Quote};
pub use rate::{compound_factor, implied_rate, InterestRate};
pub use tenor::{Tenor, TenorUnit};
