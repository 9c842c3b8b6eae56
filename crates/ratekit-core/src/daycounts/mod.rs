//! Day count conventions.
//!
//! A day count convention turns a date range into a year fraction for
//! accrual and discounting.
//!
//! # Supported Conventions
//!
//! - [`Act360`]: Actual/360, money markets and cupom cambial
//! - [`Act365Fixed`]: Actual/365 Fixed, default curve time axis
//! - [`ActActIsda`]: Actual/Actual ISDA, split by calendar year
//! - [`Thirty360US`]: 30/360 US bond basis with February end-of-month rules
//! - [`Thirty360E`]: 30E/360 Eurobond basis
//! - [`Business252`]: business days on the Brazil calendar over 252
//!
//! # Usage
//!
//! ```rust
//! use ratekit_core::daycounts::DayCountConvention;
//! use ratekit_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! let yf = DayCountConvention::Thirty360US.year_fraction(start, end).unwrap();
//! assert_eq!(yf, 0.5);
//! assert!(DayCountConvention::Act360.year_fraction(end, start).is_err());
//! ```

mod act360;
mod act365;
mod actact;
mod bus252;
mod thirty360;

pub use act360::Act360;
pub use act365::Act365Fixed;
pub use actact::ActActIsda;
pub use bus252::Business252;
pub use thirty360::{Thirty360E, Thirty360US};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations assume `start <= end`; ordering is validated by
/// [`DayCountConvention::year_fraction`].
pub trait DayCount: Send + Sync {
    /// Returns the market name of the convention.
    fn name(&self) -> &'static str;

    /// Year fraction between two ordered dates.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Number of days counted by the convention between two ordered dates.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Day count convention selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DayCountConvention {
    /// Actual/360
    Act360,
    /// Actual/365 Fixed
    #[default]
    Act365Fixed,
    /// Actual/Actual ISDA
    ActActIsda,
    /// 30/360 US (bond basis)
    Thirty360US,
    /// 30E/360 (Eurobond basis)
    Thirty360E,
    /// Business days / 252 on the Brazil calendar
    Business252,
}

impl DayCountConvention {
    /// Returns the implementation of this convention.
    #[must_use]
    pub fn as_day_count(&self) -> &'static dyn DayCount {
        match self {
            DayCountConvention::Act360 => &Act360,
            DayCountConvention::Act365Fixed => &Act365Fixed,
            DayCountConvention::ActActIsda => &ActActIsda,
            DayCountConvention::Thirty360US => &Thirty360US,
            DayCountConvention::Thirty360E => &Thirty360E,
            DayCountConvention::Business252 => &Business252,
        }
    }

    /// Year fraction between `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDateOrder` if `start > end`.
    pub fn year_fraction(&self, start: Date, end: Date) -> CoreResult<f64> {
        if start > end {
            return Err(CoreError::invalid_date_order(start, end));
        }
        Ok(self.as_day_count().year_fraction(start, end))
    }

    /// Day count between `start` and `end`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDateOrder` if `start > end`.
    pub fn day_count(&self, start: Date, end: Date) -> CoreResult<i64> {
        if start > end {
            return Err(CoreError::invalid_date_order(start, end));
        }
        Ok(self.as_day_count().day_count(start, end))
    }

    /// Returns the market name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.as_day_count().name()
    }

    /// Returns all supported conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act360,
            DayCountConvention::Act365Fixed,
            DayCountConvention::ActActIsda,
            DayCountConvention::Thirty360US,
            DayCountConvention::Thirty360E,
            DayCountConvention::Business252,
        ]
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DayCountConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace([' ', '_', '-'], "");
        match normalized.as_str() {
            "ACT/360" | "ACTUAL/360" | "A360" | "ACT360" => Ok(DayCountConvention::Act360),
            "ACT/365" | "ACT/365F" | "ACT/365FIXED" | "ACTUAL/365" | "A365F" | "ACT365F" => {
                Ok(DayCountConvention::Act365Fixed)
            }
            "ACT/ACT" | "ACT/ACTISDA" | "ACTUAL/ACTUAL" | "ACTACT" => {
                Ok(DayCountConvention::ActActIsda)
            }
            "30/360" | "30/360US" | "BONDBASIS" | "30U/360" => Ok(DayCountConvention::Thirty360US),
            "30E/360" | "EUROBONDBASIS" | "30/360ICMA" => Ok(DayCountConvention::Thirty360E),
            "BUS/252" | "BUSINESS/252" | "BUS252" | "DU/252" => {
                Ok(DayCountConvention::Business252)
            }
            _ => Err(CoreError::parse("day count", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("ACT/360".parse::<DayCountConvention>().unwrap(), DayCountConvention::Act360);
        assert_eq!("act/365f".parse::<DayCountConvention>().unwrap(), DayCountConvention::Act365Fixed);
        assert_eq!("30/360".parse::<DayCountConvention>().unwrap(), DayCountConvention::Thirty360US);
        assert_eq!("BUS/252".parse::<DayCountConvention>().unwrap(), DayCountConvention::Business252);
        assert!("ACT/999".parse::<DayCountConvention>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for dc in DayCountConvention::all() {
            let parsed: DayCountConvention = dc.to_string().parse().unwrap();
            assert_eq!(parsed, *dc);
        }
    }

    #[test]
    fn test_reversed_dates_rejected() {
        let start = Date::from_ymd(2025, 6, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        for dc in DayCountConvention::all() {
            assert!(matches!(
                dc.year_fraction(start, end),
                Err(CoreError::InvalidDateOrder { .. })
            ));
        }
    }

    #[test]
    fn test_same_date_is_zero() {
        let date = Date::from_ymd(2025, 3, 14).unwrap();
        for dc in DayCountConvention::all() {
            assert_eq!(dc.year_fraction(date, date).unwrap(), 0.0);
        }
    }

    proptest! {
        #[test]
        fn prop_year_fraction_non_negative(offset in 0i64..3650, span in 0i64..3650) {
            let start = Date::from_ymd(2020, 1, 1).unwrap().add_days(offset);
            let end = start.add_days(span);
            for dc in DayCountConvention::all() {
                let yf = dc.year_fraction(start, end).unwrap();
                prop_assert!(yf >= 0.0);
            }
        }
    }
}
