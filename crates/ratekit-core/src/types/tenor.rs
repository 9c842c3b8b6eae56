//! Tenors such as `ON`, `3M` or `10Y`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::calendars::{BusinessDayConvention, Calendar};
use crate::error::{CoreError, CoreResult};

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenorUnit {
    /// Calendar days
    Days,
    /// Business days on the advancing calendar
    BusinessDays,
    /// Weeks
    Weeks,
    /// Months
    Months,
    /// Years
    Years,
}

/// A period length used to derive maturities from a start date.
///
/// Parses `ON` (one business day), `TN` (two business days), and `<n><unit>`
/// with unit `D`, `B`, `W`, `M` or `Y`.
///
/// ```rust
/// use ratekit_core::types::{Tenor, TenorUnit};
///
/// let tenor: Tenor = "18M".parse().unwrap();
/// assert_eq!(tenor, Tenor::new(18, TenorUnit::Months));
/// assert!((tenor.approx_years() - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tenor {
    length: u32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a new tenor.
    #[must_use]
    pub fn new(length: u32, unit: TenorUnit) -> Self {
        Self { length, unit }
    }

    /// Number of units.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.length
    }

    /// The unit.
    #[must_use]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Approximate length in years, used where only an ordering or a bucket
    /// boundary matters.
    #[must_use]
    pub fn approx_years(&self) -> f64 {
        let n = f64::from(self.length);
        match self.unit {
            TenorUnit::Days => n / 365.0,
            TenorUnit::BusinessDays => n / 252.0,
            TenorUnit::Weeks => 7.0 * n / 365.0,
            TenorUnit::Months => n / 12.0,
            TenorUnit::Years => n,
        }
    }

    /// Advances `date` by this tenor and rolls the result with `convention`.
    ///
    /// Business-day tenors count business days on `calendar` and need no roll.
    pub fn advance<C: Calendar + ?Sized>(
        &self,
        date: Date,
        calendar: &C,
        convention: BusinessDayConvention,
    ) -> CoreResult<Date> {
        let n = self.length as i32;
        let unadjusted = match self.unit {
            TenorUnit::BusinessDays => return Ok(calendar.add_business_days(date, n)),
            TenorUnit::Days => date.add_days(i64::from(n)),
            TenorUnit::Weeks => date.add_days(7 * i64::from(n)),
            TenorUnit::Months => date.add_months(n)?,
            TenorUnit::Years => date.add_years(n)?,
        };
        calendar.adjust(unadjusted, convention)
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "" => return Err(CoreError::invalid_tenor(s, "empty tenor")),
            "ON" => return Ok(Self::new(1, TenorUnit::BusinessDays)),
            "TN" => return Ok(Self::new(2, TenorUnit::BusinessDays)),
            _ => {}
        }

        let split = upper
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| CoreError::invalid_tenor(s, "missing unit"))?;
        let (digits, unit) = upper.split_at(split);
        let length: u32 = digits
            .parse()
            .map_err(|_| CoreError::invalid_tenor(s, "missing or invalid length"))?;

        let unit = match unit {
            "D" => TenorUnit::Days,
            "B" | "BD" => TenorUnit::BusinessDays,
            "W" => TenorUnit::Weeks,
            "M" => TenorUnit::Months,
            "Y" => TenorUnit::Years,
            other => return Err(CoreError::invalid_tenor(s, format!("unknown unit '{other}'"))),
        };
        Ok(Self::new(length, unit))
    }
}

impl TryFrom<String> for Tenor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.unit {
            TenorUnit::Days => "D",
            TenorUnit::BusinessDays => "B",
            TenorUnit::Weeks => "W",
            TenorUnit::Months => "M",
            TenorUnit::Years => "Y",
        };
        write!(f, "{}{}", self.length, unit)
    }
}
