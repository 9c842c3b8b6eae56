//! Date type for financial calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A calendar date for financial calculations.
///
/// Newtype around `chrono::NaiveDate`. Immutable and `Copy`; every
/// arithmetic operation returns a new value.
///
/// # Example
///
/// ```rust
/// use ratekit_core::types::Date;
///
/// let date = Date::from_ymd(2025, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2025, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Returns the number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Adds a number of calendar days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let new_day = self.day().min(days_in_month(new_year, new_month));
        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds a number of years to the date (Feb 29 rolls to Feb 28).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_years(&self, years: i32) -> CoreResult<Self> {
        self.add_months(years * 12)
    }

    /// Number of calendar days from `self` to `other` (negative if `other` is earlier).
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the last day of the date's month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        Date(self.0.with_day(self.days_in_month()).unwrap_or(self.0))
    }

    /// Checks if the date is the last day of its month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// Number of days in the given month.
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        _ => 28,
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Date;

    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Date;

    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
        assert!(Date::from_ymd(2025, 2, 30).is_err());
    }

    #[test]
    fn test_add_months_clamps_day() {
        let date = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(date.add_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
        assert_eq!(date.add_months(-2).unwrap(), Date::from_ymd(2023, 11, 30).unwrap());
        assert_eq!(date.add_months(12).unwrap(), Date::from_ymd(2025, 1, 31).unwrap());
    }

    #[test]
    fn test_add_years_leap_day() {
        let date = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(date.add_years(1).unwrap(), Date::from_ymd(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_days_between_and_ops() {
        let a = Date::from_ymd(2025, 1, 1).unwrap();
        let b = Date::from_ymd(2025, 3, 1).unwrap();
        assert_eq!(a.days_between(&b), 59);
        assert_eq!(b - a, 59);
        assert_eq!(a + 59, b);
        assert_eq!(b - 59, a);
    }

    #[test]
    fn test_end_of_month() {
        let date = Date::from_ymd(2024, 2, 10).unwrap();
        assert_eq!(date.end_of_month(), Date::from_ymd(2024, 2, 29).unwrap());
        assert!(date.end_of_month().is_end_of_month());
        assert!(!date.is_end_of_month());
    }

    #[test]
    fn test_parse_and_display() {
        let date: Date = "2025-07-04".parse().unwrap();
        assert_eq!(date.to_string(), "2025-07-04");
        assert!(Date::parse("07/04/2025").is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let date = Date::from_ymd(2025, 7, 4).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2025-07-04\"");
        let back: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(back, date);
    }
}
