//! Static terms shared by every bond type.

use serde::{Deserialize, Serialize};

use ratekit_core::calendars::{BusinessDayConvention, CalendarId};
use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::{Compounding, Date, Frequency, InstrumentId};

use crate::cashflows::Schedule;
use crate::error::{BondError, BondResult};

/// Notional, dates and conventions of a bond.
///
/// Terms never reference a curve; they only describe how the coupon
/// schedule is generated and how accrual and yields are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondTerms {
    /// Bond identifier.
    pub id: InstrumentId,
    /// Principal repaid at maturity. Prices are quoted in the same units.
    pub notional: f64,
    /// Start of the first accrual period.
    pub issue_date: Date,
    /// Final redemption date (unadjusted).
    pub maturity: Date,
    /// Coupon frequency. `Zero` gives a single period.
    pub frequency: Frequency,
    /// Accrual day count, also used for yield discounting.
    pub day_count: DayCountConvention,
    /// Payment calendar.
    pub calendar: CalendarId,
    /// Payment date adjustment.
    pub business_day_convention: BusinessDayConvention,
    /// Keep coupon dates on month end when maturity is a month end.
    pub end_of_month: bool,
    /// Compounding used for yield-to-maturity.
    pub yield_compounding: Compounding,
}

impl BondTerms {
    /// Terms with 100 notional, semi-annual 30/360 coupons, weekend
    /// calendar, Following adjustment and semi-annual yields.
    pub fn new(id: impl Into<InstrumentId>, issue_date: Date, maturity: Date) -> Self {
        Self {
            id: id.into(),
            notional: 100.0,
            issue_date,
            maturity,
            frequency: Frequency::SemiAnnual,
            day_count: DayCountConvention::Thirty360US,
            calendar: CalendarId::WeekendsOnly,
            business_day_convention: BusinessDayConvention::Following,
            end_of_month: true,
            yield_compounding: Compounding::SemiAnnual,
        }
    }

    /// Sets the notional.
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets the coupon frequency and matches the yield compounding to it.
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self.yield_compounding = if frequency.is_zero() {
            Compounding::Annual
        } else {
            Compounding::from(frequency)
        };
        self
    }

    /// Sets the day count.
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the payment calendar.
    pub fn with_calendar(mut self, calendar: CalendarId) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the payment date adjustment.
    pub fn with_business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.business_day_convention = convention;
        self
    }

    /// Sets the end-of-month rule.
    pub fn with_end_of_month(mut self, eom: bool) -> Self {
        self.end_of_month = eom;
        self
    }

    /// Sets the yield compounding.
    pub fn with_yield_compounding(mut self, compounding: Compounding) -> Self {
        self.yield_compounding = compounding;
        self
    }

    /// Checks the terms.
    ///
    /// # Errors
    ///
    /// `InvalidSpec` for a non-positive or non-finite notional and
    /// `InvalidSchedule` when maturity is not after issue.
    pub fn validate(&self) -> BondResult<()> {
        if !self.notional.is_finite() || self.notional <= 0.0 {
            return Err(BondError::invalid_spec(format!(
                "{}: notional must be positive, got {}",
                self.id, self.notional
            )));
        }
        if self.maturity <= self.issue_date {
            return Err(BondError::invalid_schedule(format!(
                "{}: maturity {} is not after issue date {}",
                self.id, self.maturity, self.issue_date
            )));
        }
        Ok(())
    }

    /// Generates the coupon schedule.
    pub fn schedule(&self) -> BondResult<Schedule> {
        self.validate()?;
        Schedule::generate(self)
    }
}
