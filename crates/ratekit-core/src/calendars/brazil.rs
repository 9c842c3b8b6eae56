//! Brazilian national calendar (ANBIMA).

use std::sync::OnceLock;

use super::bitmap::{HolidayBitmap, HolidayCalendarBuilder, MAX_YEAR, MIN_YEAR};
use super::Calendar;
use crate::types::Date;

static BRAZIL_CALENDAR: OnceLock<BrazilCalendar> = OnceLock::new();

/// Brazilian national holidays as published by ANBIMA.
///
/// ## Holidays
///
/// - Confraternização Universal (January 1)
/// - Carnival Monday and Tuesday (Easter - 48, Easter - 47)
/// - Good Friday (Easter - 2)
/// - Tiradentes (April 21)
/// - Labour Day (May 1)
/// - Corpus Christi (Easter + 60)
/// - Independence Day (September 7)
/// - Nossa Senhora Aparecida (October 12)
/// - Finados (November 2)
/// - Proclamação da República (November 15)
/// - Consciência Negra (November 20, from 2024)
/// - Christmas (December 25)
///
/// Holidays that fall on a weekend are not moved.
#[derive(Debug, Clone)]
pub struct BrazilCalendar {
    bitmap: HolidayBitmap,
}

impl BrazilCalendar {
    /// Builds the calendar.
    pub fn new() -> Self {
        Self {
            bitmap: build_brazil_holidays(),
        }
    }

    /// Shared process-wide instance.
    pub fn global() -> &'static BrazilCalendar {
        BRAZIL_CALENDAR.get_or_init(BrazilCalendar::new)
    }
}

impl Default for BrazilCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for BrazilCalendar {
    fn name(&self) -> &str {
        "Brazil"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.bitmap.is_holiday(date.as_naive_date())
    }
}

fn build_brazil_holidays() -> HolidayBitmap {
    HolidayCalendarBuilder::new()
        .year_range(MIN_YEAR, MAX_YEAR)
        .add_fixed_holiday(1, 1)
        .add_easter_holiday(-48)
        .add_easter_holiday(-47)
        .add_easter_holiday(-2)
        .add_fixed_holiday(4, 21)
        .add_fixed_holiday(5, 1)
        .add_easter_holiday(60)
        .add_fixed_holiday(9, 7)
        .add_fixed_holiday(10, 12)
        .add_fixed_holiday(11, 2)
        .add_fixed_holiday(11, 15)
        .add_fixed_holiday_from(11, 20, 2024)
        .add_fixed_holiday(12, 25)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_easter_based_holidays_2025() {
        let cal = BrazilCalendar::global();
        // Easter 2025 is April 20
        assert!(!cal.is_business_day(d(2025, 3, 3))); // Carnival Monday
        assert!(!cal.is_business_day(d(2025, 3, 4))); // Carnival Tuesday
        assert!(cal.is_business_day(d(2025, 3, 5))); // Ash Wednesday trades
        assert!(!cal.is_business_day(d(2025, 4, 18))); // Good Friday
        assert!(!cal.is_business_day(d(2025, 6, 19))); // Corpus Christi
    }

    #[test]
    fn test_fixed_holidays() {
        let cal = BrazilCalendar::global();
        assert!(!cal.is_business_day(d(2025, 1, 1)));
        assert!(!cal.is_business_day(d(2025, 4, 21)));
        assert!(!cal.is_business_day(d(2025, 5, 1)));
        assert!(!cal.is_business_day(d(2026, 9, 7)));
        assert!(!cal.is_business_day(d(2026, 10, 12)));
        assert!(!cal.is_business_day(d(2026, 11, 2)));
        assert!(!cal.is_business_day(d(2025, 12, 25)));
    }

    #[test]
    fn test_consciencia_negra_from_2024() {
        let cal = BrazilCalendar::global();
        assert!(cal.is_business_day(d(2023, 11, 20)));
        assert!(!cal.is_business_day(d(2024, 11, 20)));
    }

    #[test]
    fn test_weekend_holiday_not_observed() {
        let cal = BrazilCalendar::global();
        // 2025-09-07 is a Sunday; Monday the 8th trades
        assert!(cal.is_business_day(d(2025, 9, 8)));
    }
}
