//! Business day calendars and conventions.
//!
//! - [`Calendar`]: business-day test plus rolling and counting helpers
//! - [`WeekendCalendar`], [`BrazilCalendar`], [`HolidayCalendar`]
//! - [`CalendarId`]: serializable selector for the built-in calendars

mod bitmap;
mod brazil;
mod conventions;
mod holiday;

pub use bitmap::{easter_sunday, HolidayBitmap, HolidayCalendarBuilder, MAX_YEAR, MIN_YEAR};
pub use brazil::BrazilCalendar;
pub use conventions::{adjust, BusinessDayConvention};
pub use holiday::HolidayCalendar;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Trait for business day calendars.
pub trait Calendar: Send + Sync {
    /// Calendar name.
    fn name(&self) -> &str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a weekend day or holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Rolls a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> CoreResult<Date> {
        conventions::adjust(date, convention, self)
    }

    /// Moves `days` business days forward (or backward when negative).
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.unsigned_abs();
        let step: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(step);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }
        result
    }

    /// First business day on or after `date`.
    fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Last business day on or before `date`.
    fn previous_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }

    /// Business days in `[start, end)`. Negative when `end < start`.
    fn business_days_between(&self, start: Date, end: Date) -> i64 {
        let (from, to, sign) = if start <= end {
            (start, end, 1)
        } else {
            (end, start, -1)
        };

        let mut count = 0;
        let mut current = from;
        while current < to {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }
        sign * count
    }
}

/// Saturdays and Sundays only.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Selector for the built-in calendars, used in configuration and
/// instrument definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CalendarId {
    /// [`WeekendCalendar`]
    #[default]
    WeekendsOnly,
    /// [`BrazilCalendar`]
    Brazil,
}

impl CalendarId {
    /// The calendar this identifier refers to.
    pub fn calendar(&self) -> &'static dyn Calendar {
        static WEEKENDS: WeekendCalendar = WeekendCalendar;
        match self {
            CalendarId::WeekendsOnly => &WEEKENDS,
            CalendarId::Brazil => BrazilCalendar::global(),
        }
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.calendar().name())
    }
}

impl FromStr for CalendarId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace([' ', '_', '-'], "").as_str() {
            "WEEKENDSONLY" | "WEEKENDS" | "NONE" => Ok(CalendarId::WeekendsOnly),
            "BRAZIL" | "BR" | "ANBIMA" | "BRL" => Ok(CalendarId::Brazil),
            _ => Err(CoreError::parse("calendar", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;
        assert!(cal.is_business_day(d(2025, 1, 6)));
        assert!(!cal.is_business_day(d(2025, 1, 4)));
        assert!(cal.is_holiday(d(2025, 1, 5)));
    }

    #[test]
    fn test_add_business_days_both_directions() {
        let cal = WeekendCalendar;
        let friday = d(2025, 1, 3);
        assert_eq!(cal.add_business_days(friday, 1), d(2025, 1, 6));
        assert_eq!(cal.add_business_days(d(2025, 1, 6), -1), friday);
        assert_eq!(cal.add_business_days(friday, 0), friday);
    }

    #[test]
    fn test_business_days_between_half_open() {
        let cal = WeekendCalendar;
        let monday = d(2025, 1, 6);
        let next_monday = d(2025, 1, 13);
        assert_eq!(cal.business_days_between(monday, next_monday), 5);
        assert_eq!(cal.business_days_between(next_monday, monday), -5);
        assert_eq!(cal.business_days_between(monday, monday), 0);
    }

    #[test]
    fn test_brazil_carnival_roll() {
        let cal = CalendarId::Brazil.calendar();
        let adjusted = cal.adjust(d(2025, 3, 3), BusinessDayConvention::Following).unwrap();
        assert_eq!(adjusted, d(2025, 3, 5));
        let back = cal.adjust(d(2025, 3, 3), BusinessDayConvention::Preceding).unwrap();
        assert_eq!(back, d(2025, 2, 28));
    }

    #[test]
    fn test_calendar_id_parse_and_serde() {
        assert_eq!("anbima".parse::<CalendarId>().unwrap(), CalendarId::Brazil);
        assert!("mars".parse::<CalendarId>().is_err());
        let json = serde_json::to_string(&CalendarId::Brazil).unwrap();
        assert_eq!(json, "\"Brazil\"");
    }
}
