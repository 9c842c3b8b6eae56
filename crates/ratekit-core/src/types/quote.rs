//! Market quotes keyed by instrument identifier.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;

/// Instrument identifier (ticker, ISIN, or internal ID).
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    /// Create a new instrument ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A market observation: (instrument, as-of date, value).
///
/// The value is whatever the instrument is quoted in: a rate for deposits,
/// swaps and DI contracts, a price for FX futures and bonds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// The quoted instrument.
    pub instrument_id: InstrumentId,
    /// Observation date.
    pub as_of: Date,
    /// Quoted value at source precision.
    pub value: Decimal,
}

impl Quote {
    /// Creates a new quote.
    #[must_use]
    pub fn new(instrument_id: impl Into<InstrumentId>, as_of: Date, value: Decimal) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            as_of,
            value,
        }
    }

    /// Creates a quote from a floating-point value.
    ///
    /// Non-finite inputs are stored as zero.
    #[must_use]
    pub fn from_f64(instrument_id: impl Into<InstrumentId>, as_of: Date, value: f64) -> Self {
        Self::new(
            instrument_id,
            as_of,
            Decimal::from_f64_retain(value).unwrap_or_default(),
        )
    }

    /// The value as `f64` for numerical work.
    #[must_use]
    pub fn value_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(f64::NAN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_value_conversion() {
        let as_of = Date::from_ymd(2025, 1, 2).unwrap();
        let quote = Quote::new("DI1F26", as_of, dec!(0.1415));
        assert_eq!(quote.instrument_id.as_str(), "DI1F26");
        assert!((quote.value_f64() - 0.1415).abs() < 1e-15);
    }

    #[test]
    fn test_quote_from_f64() {
        let as_of = Date::from_ymd(2025, 1, 2).unwrap();
        let quote = Quote::from_f64("DOLG25", as_of, 6125.5);
        assert_eq!(quote.value, dec!(6125.5));
    }
}
