//! Actual/Actual ISDA.

use super::DayCount;
use crate::types::Date;

/// Actual/Actual ISDA.
///
/// The range is split at year boundaries; days falling in a leap year count
/// over 366 and the rest over 365.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        if start == end {
            return 0.0;
        }

        let y1 = start.year();
        let y2 = end.year();

        if y1 == y2 {
            return start.days_between(&end) as f64 / f64::from(start.days_in_year());
        }

        let mut fraction = 0.0;

        // Stub in the first year.
        if let Ok(next_jan1) = Date::from_ymd(y1 + 1, 1, 1) {
            fraction += start.days_between(&next_jan1) as f64 / f64::from(start.days_in_year());
        }

        fraction += f64::from(y2 - y1 - 1);

        // Stub in the last year.
        if let Ok(jan1) = Date::from_ymd(y2, 1, 1) {
            fraction += jan1.days_between(&end) as f64 / f64::from(end.days_in_year());
        }

        fraction
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
