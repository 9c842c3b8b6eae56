//! Business/252 on the Brazil calendar.

use super::DayCount;
use crate::calendars::{BrazilCalendar, Calendar};
use crate::types::Date;

/// BUS/252: Brazil business days in `[start, end)` over 252.
///
/// Standard for DI futures, FRA-DI and onshore BRL discounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Business252;

impl DayCount for Business252 {
    fn name(&self) -> &'static str {
        "BUS/252"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 252.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        BrazilCalendar::global().business_days_between(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus252_skips_carnival() {
        // Week of Carnival 2025: Mon 3 Mar and Tue 4 Mar are holidays.
        let start = Date::from_ymd(2025, 2, 28).unwrap();
        let end = Date::from_ymd(2025, 3, 7).unwrap();
        // Fri 28, Wed 5, Thu 6
        assert_eq!(Business252.day_count(start, end), 3);
    }

    #[test]
    fn test_bus252_counts_start_not_end() {
        let mon = Date::from_ymd(2025, 3, 10).unwrap();
        let tue = Date::from_ymd(2025, 3, 11).unwrap();
        assert_eq!(Business252.day_count(mon, tue), 1);
        assert!((Business252.year_fraction(mon, tue) - 1.0 / 252.0).abs() < 1e-15);
    }

    #[test]
    fn test_bus252_full_year_2025() {
        let start = Date::from_ymd(2025, 1, 2).unwrap();
        let end = Date::from_ymd(2026, 1, 2).unwrap();
        // 261 weekdays less nine weekday holidays
        assert_eq!(Business252.day_count(start, end), 252);
    }
}
