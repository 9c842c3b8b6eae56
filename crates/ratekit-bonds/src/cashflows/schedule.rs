//! Coupon date generation.
//!
//! Dates are rolled backward from maturity by whole coupon periods, so an
//! irregular period, if any, is the first one. Dates are then rolled on the
//! bond calendar, and both accrual and payment run on the rolled dates, so a
//! coupon stops accruing on the day it is paid. With `Unadjusted` the two
//! sets coincide.

use ratekit_core::types::Date;

use crate::error::{BondError, BondResult};
use crate::terms::BondTerms;

/// Unadjusted and adjusted coupon dates, issue date first.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    unadjusted_dates: Vec<Date>,
    adjusted_dates: Vec<Date>,
}

impl Schedule {
    /// Generates the schedule for `terms`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSchedule` if maturity is not after the issue date or
    /// a date cannot be adjusted.
    pub fn generate(terms: &BondTerms) -> BondResult<Self> {
        let start = terms.issue_date;
        let end = terms.maturity;
        if end <= start {
            return Err(BondError::invalid_schedule(format!(
                "end date {end} must be after start date {start}"
            )));
        }

        let unadjusted = if terms.frequency.is_zero() {
            vec![start, end]
        } else {
            Self::generate_backward(terms)?
        };

        let calendar = terms.calendar.calendar();
        let mut adjusted = Vec::with_capacity(unadjusted.len());
        for &date in &unadjusted {
            let rolled = calendar
                .adjust(date, terms.business_day_convention)
                .map_err(|e| BondError::invalid_schedule(format!("cannot adjust {date}: {e}")))?;
            adjusted.push(rolled);
        }

        Ok(Self {
            unadjusted_dates: unadjusted,
            adjusted_dates: adjusted,
        })
    }

    fn generate_backward(terms: &BondTerms) -> BondResult<Vec<Date>> {
        let months = terms.frequency.months_per_period() as i32;
        let month_end = terms.end_of_month && terms.maturity.is_end_of_month();

        let mut dates = vec![terms.maturity];
        let mut periods = 1;
        loop {
            // Offsets are taken from maturity so short months don't drift the day.
            let mut current = terms.maturity.add_months(-months * periods)?;
            if month_end {
                current = current.end_of_month();
            }
            if current <= terms.issue_date {
                break;
            }
            dates.push(current);
            periods += 1;
        }
        dates.push(terms.issue_date);
        dates.reverse();
        Ok(dates)
    }

    /// Dates before business-day adjustment.
    #[must_use]
    pub fn unadjusted_dates(&self) -> &[Date] {
        &self.unadjusted_dates
    }

    /// Adjusted dates, used for accrual and payment.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.adjusted_dates
    }

    /// Accrual periods as `(start, end, payment)` triples.
    ///
    /// A period ends on its payment date.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date, Date)> + '_ {
        self.adjusted_dates.windows(2).map(|w| (w[0], w[1], w[1]))
    }

    /// Number of coupon periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unadjusted_dates.len().saturating_sub(1)
    }

    /// True when the schedule has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
