//! Call provisions.

use serde::{Deserialize, Serialize};

use ratekit_core::types::Date;

use crate::error::{BondError, BondResult};

/// A single call date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CallEntry {
    /// Date on which the issuer may redeem.
    pub date: Date,
    /// Call price as a percentage of notional (100.0 = par).
    pub price: f64,
}

impl CallEntry {
    /// Creates a call entry.
    #[must_use]
    pub fn new(date: Date, price: f64) -> Self {
        Self { date, price }
    }

    /// Cash paid per unit of `notional`, before accrued interest.
    #[must_use]
    pub fn strike(&self, notional: f64) -> f64 {
        notional * self.price / 100.0
    }
}

/// Bermudan call schedule with strictly increasing dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CallEntry>", into = "Vec<CallEntry>")]
pub struct CallSchedule {
    entries: Vec<CallEntry>,
}

impl CallSchedule {
    /// Validates and wraps the entries.
    ///
    /// # Errors
    ///
    /// `InvalidSchedule` if dates are not strictly increasing or a price is
    /// not positive.
    pub fn new(entries: Vec<CallEntry>) -> BondResult<Self> {
        for pair in entries.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(BondError::invalid_schedule(format!(
                    "call dates must be strictly increasing: {} then {}",
                    pair[0].date, pair[1].date
                )));
            }
        }
        if let Some(bad) = entries.iter().find(|e| !(e.price.is_finite() && e.price > 0.0)) {
            return Err(BondError::invalid_schedule(format!(
                "call price on {} must be positive, got {}",
                bad.date, bad.price
            )));
        }
        Ok(Self { entries })
    }

    /// A schedule with no calls.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// All entries.
    #[must_use]
    pub fn entries(&self) -> &[CallEntry] {
        &self.entries
    }

    /// Entries dated strictly after `date`.
    pub fn after(&self, date: Date) -> impl Iterator<Item = &CallEntry> + '_ {
        self.entries.iter().filter(move |e| e.date > date)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last call date.
    #[must_use]
    pub fn last_date(&self) -> Option<Date> {
        self.entries.last().map(|e| e.date)
    }
}

impl TryFrom<Vec<CallEntry>> for CallSchedule {
    type Error = BondError;

    fn try_from(entries: Vec<CallEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<CallSchedule> for Vec<CallEntry> {
    fn from(schedule: CallSchedule) -> Self {
        schedule.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_rejects_unordered_dates() {
        let entries = vec![CallEntry::new(d(2027, 1, 15), 100.0), CallEntry::new(d(2026, 1, 15), 100.0)];
        assert!(matches!(
            CallSchedule::new(entries),
            Err(BondError::InvalidSchedule { .. })
        ));

        let dup = vec![CallEntry::new(d(2026, 1, 15), 101.0), CallEntry::new(d(2026, 1, 15), 100.0)];
        assert!(CallSchedule::new(dup).is_err());
    }

    #[test]
    fn test_rejects_bad_price() {
        assert!(CallSchedule::new(vec![CallEntry::new(d(2026, 1, 15), 0.0)]).is_err());
    }

    #[test]
    fn test_after_and_strike() {
        let schedule = CallSchedule::new(vec![
            CallEntry::new(d(2026, 1, 15), 101.0),
            CallEntry::new(d(2027, 1, 15), 100.0),
        ])
        .unwrap();
        assert_eq!(schedule.after(d(2026, 1, 15)).count(), 1);
        assert_eq!(schedule.entries()[0].strike(1_000.0), 1_010.0);
        assert_eq!(schedule.last_date(), Some(d(2027, 1, 15)));
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"[{"date":"2027-01-15","price":100.0},{"date":"2026-01-15","price":100.0}]"#;
        assert!(serde_json::from_str::<CallSchedule>(json).is_err());

        let json = r#"[{"date":"2026-01-15","price":100.0}]"#;
        let schedule: CallSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.len(), 1);
    }
}
