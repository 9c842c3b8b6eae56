//! Year-indexed holiday bitmap.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;

/// First year covered by the bitmap.
pub const MIN_YEAR: i32 = 1970;
/// Last year covered by the bitmap.
pub const MAX_YEAR: i32 = 2100;

const YEAR_COUNT: usize = (MAX_YEAR - MIN_YEAR + 1) as usize;
const MAX_DAYS_PER_YEAR: usize = 366;
const TOTAL_BITS: usize = YEAR_COUNT * MAX_DAYS_PER_YEAR;
const WORD_COUNT: usize = TOTAL_BITS.div_ceil(64);

/// Holiday set with O(1) lookup.
///
/// One bit per (year, ordinal day) between [`MIN_YEAR`] and [`MAX_YEAR`].
/// Dates outside that range are never holidays. Weekends are not stored;
/// calendars check them separately.
#[derive(Clone, PartialEq, Eq)]
pub struct HolidayBitmap {
    bits: Box<[u64; WORD_COUNT]>,
}

impl std::fmt::Debug for HolidayBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayBitmap")
            .field("holiday_count", &self.count_holidays())
            .finish()
    }
}

impl Default for HolidayBitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl HolidayBitmap {
    /// Creates an empty bitmap.
    pub fn new() -> Self {
        Self {
            bits: Box::new([0u64; WORD_COUNT]),
        }
    }

    /// Marks a date as a holiday. Out-of-range dates are ignored.
    pub fn add_holiday(&mut self, date: NaiveDate) {
        if let Some((word, bit)) = Self::date_to_indices(date) {
            self.bits[word] |= 1u64 << bit;
        }
    }

    /// Returns true if the date was marked as a holiday.
    #[inline]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        Self::date_to_indices(date).is_some_and(|(word, bit)| self.bits[word] & (1u64 << bit) != 0)
    }

    /// Number of marked holidays.
    pub fn count_holidays(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    fn date_to_indices(date: NaiveDate) -> Option<(usize, usize)> {
        let year = date.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        let position = (year - MIN_YEAR) as usize * MAX_DAYS_PER_YEAR + date.ordinal0() as usize;
        Some((position / 64, position % 64))
    }
}

impl FromIterator<NaiveDate> for HolidayBitmap {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        let mut bitmap = Self::new();
        for date in iter {
            bitmap.add_holiday(date);
        }
        bitmap
    }
}

/// Rule-based builder for national holiday bitmaps.
///
/// Holidays are generated for every year in the configured range. Holidays
/// falling on a weekend are kept as-is; there is no observation shift.
pub struct HolidayCalendarBuilder {
    holidays: BTreeSet<NaiveDate>,
    start_year: i32,
    end_year: i32,
}

impl Default for HolidayCalendarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HolidayCalendarBuilder {
    /// Creates a builder over the full supported year range.
    pub fn new() -> Self {
        Self {
            holidays: BTreeSet::new(),
            start_year: MIN_YEAR,
            end_year: MAX_YEAR,
        }
    }

    /// Restricts the generated years.
    pub fn year_range(mut self, start: i32, end: i32) -> Self {
        self.start_year = start.max(MIN_YEAR);
        self.end_year = end.min(MAX_YEAR);
        self
    }

    /// Adds a holiday on the same month/day every year.
    pub fn add_fixed_holiday(self, month: u32, day: u32) -> Self {
        let from = self.start_year;
        self.add_fixed_holiday_from(month, day, from)
    }

    /// Adds a fixed-date holiday observed from `from_year` onwards.
    pub fn add_fixed_holiday_from(mut self, month: u32, day: u32, from_year: i32) -> Self {
        for year in from_year.max(self.start_year)..=self.end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Adds a holiday at a fixed offset from Easter Sunday.
    pub fn add_easter_holiday(mut self, offset_days: i64) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = easter_sunday(year)
                .and_then(|e| e.checked_add_signed(chrono::Duration::days(offset_days)))
            {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Adds explicit dates.
    pub fn add_holidays<I: IntoIterator<Item = NaiveDate>>(mut self, dates: I) -> Self {
        self.holidays.extend(dates);
        self
    }

    /// Builds the bitmap.
    pub fn build(self) -> HolidayBitmap {
        self.holidays.into_iter().collect()
    }
}

/// Easter Sunday (Anonymous Gregorian algorithm).
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
