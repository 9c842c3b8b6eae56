//! 30/360 variants.

use super::DayCount;
use crate::types::Date;

#[inline]
fn is_last_day_of_february(date: Date) -> bool {
    date.month() == 2 && date.is_end_of_month()
}

#[inline]
fn thirty360_days(y1: i64, m1: i64, d1: i64, y2: i64, m2: i64, d2: i64) -> i64 {
    360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}

/// 30/360 US (bond basis).
///
/// # Rules
///
/// 1. If D1 is the last day of February, D1 becomes 30.
/// 2. If D1 is 31, D1 becomes 30.
/// 3. If D1 and D2 are both the last day of February, D2 becomes 30.
/// 4. If D2 is 31 and D1 is 30 or more, D2 becomes 30.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360US;

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let start_feb_eom = is_last_day_of_february(start);

        let mut d1 = i64::from(start.day());
        let mut d2 = i64::from(end.day());

        if start_feb_eom || d1 == 31 {
            d1 = 30;
        }
        if start_feb_eom && is_last_day_of_february(end) {
            d2 = 30;
        }
        if d2 == 31 && d1 >= 30 {
            d2 = 30;
        }

        thirty360_days(
            i64::from(start.year()),
            i64::from(start.month()),
            d1,
            i64::from(end.year()),
            i64::from(end.month()),
            d2,
        )
    }
}

/// 30E/360 (Eurobond basis): any 31st becomes the 30th.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 360.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day().min(30));
        let d2 = i64::from(end.day().min(30));
        thirty360_days(
            i64::from(start.year()),
            i64::from(start.month()),
            d1,
            i64::from(end.year()),
            i64::from(end.month()),
            d2,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_us_regular_period() {
        assert_eq!(Thirty360US.day_count(d(2025, 1, 15), d(2025, 7, 15)), 180);
        assert_relative_eq!(Thirty360US.year_fraction(d(2025, 1, 15), d(2025, 7, 15)), 0.5);
    }

    #[test]
    fn test_us_month_end_31() {
        // D1 = 31 -> 30, then D2 = 31 -> 30
        assert_eq!(Thirty360US.day_count(d(2025, 1, 31), d(2025, 3, 31)), 60);
        // D1 < 30 keeps D2 = 31
        assert_eq!(Thirty360US.day_count(d(2025, 1, 29), d(2025, 3, 31)), 62);
    }

    #[test]
    fn test_us_february_end_of_month() {
        // Feb 28 (non-leap) to Aug 31: D1 -> 30, D2 -> 30
        assert_eq!(Thirty360US.day_count(d(2025, 2, 28), d(2025, 8, 31)), 180);
        // Feb EOM to Feb EOM
        assert_eq!(Thirty360US.day_count(d(2024, 2, 29), d(2025, 2, 28)), 360);
        // Aug 31 to Feb 28: D2 stays 28
        assert_eq!(Thirty360US.day_count(d(2024, 8, 31), d(2025, 2, 28)), 178);
    }

    #[test]
    fn test_european_caps_both_days() {
        assert_eq!(Thirty360E.day_count(d(2025, 1, 31), d(2025, 3, 31)), 60);
        assert_eq!(Thirty360E.day_count(d(2025, 1, 29), d(2025, 3, 31)), 61);
        // No February adjustment in 30E/360
        assert_eq!(Thirty360E.day_count(d(2025, 2, 28), d(2025, 8, 31)), 182);
    }
}
