//! Calendar built from a user-supplied holiday list.

use chrono::NaiveDate;

use super::bitmap::HolidayBitmap;
use super::Calendar;
use crate::types::Date;

/// Weekends plus an explicit list of holidays.
///
/// ```rust
/// use ratekit_core::calendars::{Calendar, HolidayCalendar};
/// use ratekit_core::types::Date;
///
/// let holiday = Date::from_ymd(2025, 7, 4).unwrap();
/// let cal = HolidayCalendar::new("Desk", [holiday]);
/// assert!(!cal.is_business_day(holiday));
/// ```
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    name: String,
    bitmap: HolidayBitmap,
}

impl HolidayCalendar {
    /// Creates a calendar from a name and its holidays.
    pub fn new(name: impl Into<String>, holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            name: name.into(),
            bitmap: holidays.into_iter().map(NaiveDate::from).collect(),
        }
    }

    /// Number of holidays in the list.
    pub fn holiday_count(&self) -> usize {
        self.bitmap.count_holidays()
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.bitmap.is_holiday(date.as_naive_date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_holidays_and_weekends() {
        let hol = Date::from_ymd(2025, 7, 4).unwrap();
        let cal = HolidayCalendar::new("Custom", vec![hol, hol]);
        assert_eq!(cal.name(), "Custom");
        assert_eq!(cal.holiday_count(), 1);
        assert!(!cal.is_business_day(hol));
        assert!(cal.is_business_day(Date::from_ymd(2025, 7, 3).unwrap()));
        assert!(!cal.is_business_day(Date::from_ymd(2025, 7, 5).unwrap()));
        assert_eq!(cal.next_business_day(hol), Date::from_ymd(2025, 7, 7).unwrap());
    }
}
