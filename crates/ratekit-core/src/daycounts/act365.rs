//! Actual/365 Fixed.

use super::DayCount;
use crate::types::Date;

/// Actual/365 Fixed: actual calendar days over 365, leap years included.
///
/// This is the time axis of every curve in the workspace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / 365.0
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
