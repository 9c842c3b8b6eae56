//! Fixed-rate bullet bond.

use ratekit_core::calendars::{BusinessDayConvention, CalendarId};
use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::{Compounding, Date, Frequency, InstrumentId};

use crate::cashflows::{CashFlow, CashFlowSchedule, ResolvedFlow};
use crate::error::{BondError, BondResult};
use crate::pricing::{YieldFlows, YieldSolver};
use crate::risk::YieldRisk;
use crate::terms::BondTerms;
use crate::traits::Bond;

/// A bond paying a fixed coupon and its notional at maturity.
///
/// # Example
///
/// ```rust
/// use ratekit_bonds::prelude::*;
/// use ratekit_core::types::{Date, Frequency};
/// use ratekit_curves::FlatForwardCurve;
///
/// let today = Date::from_ymd(2025, 1, 15).unwrap();
/// let bond = FixedRateBond::builder()
///     .id("T 5 01/27")
///     .coupon_rate(0.05)
///     .issue_date(today)
///     .maturity(Date::from_ymd(2027, 1, 15).unwrap())
///     .frequency(Frequency::Annual)
///     .build()
///     .unwrap();
///
/// let curve = FlatForwardCurve::new(today, 0.04);
/// let dirty = bond.dirty_price(&curve, today).unwrap();
/// let expected = 5.0 * (-0.04f64).exp() + 105.0 * (-0.08f64).exp();
/// assert!((dirty - expected).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FixedRateBond {
    terms: BondTerms,
    coupon_rate: f64,
    cash_flows: CashFlowSchedule,
}

impl FixedRateBond {
    /// Creates a bond and generates its cash flows.
    ///
    /// # Errors
    ///
    /// `InvalidSpec` for a negative or non-finite coupon, or invalid terms.
    pub fn new(terms: BondTerms, coupon_rate: f64) -> BondResult<Self> {
        if !coupon_rate.is_finite() || coupon_rate < 0.0 {
            return Err(BondError::invalid_spec(format!(
                "{}: coupon rate must be non-negative, got {coupon_rate}",
                terms.id
            )));
        }
        let cash_flows = fixed_cash_flows(&terms, coupon_rate)?;
        Ok(Self {
            terms,
            coupon_rate,
            cash_flows,
        })
    }

    /// Creates a builder.
    #[must_use]
    pub fn builder() -> FixedRateBondBuilder {
        FixedRateBondBuilder::default()
    }

    /// Annual coupon rate as a decimal.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Flows paid after `as_of`.
    #[must_use]
    pub fn fixed_flows(&self, as_of: Date) -> Vec<ResolvedFlow> {
        self.cash_flows
            .after(as_of)
            .filter_map(|cf| {
                cf.fixed_amount().map(|amount| ResolvedFlow {
                    date: cf.payment_date,
                    amount,
                })
            })
            .collect()
    }

    /// Remaining flows positioned for yield calculations.
    pub fn yield_flows(&self, as_of: Date) -> BondResult<YieldFlows> {
        YieldFlows::for_terms(&self.terms, &self.fixed_flows(as_of), as_of)
    }

    /// Yield at which the remaining flows are worth `dirty_price`.
    pub fn yield_to_maturity(&self, dirty_price: f64, as_of: Date) -> BondResult<f64> {
        self.yield_to_maturity_with(dirty_price, as_of, &YieldSolver::default())
    }

    /// [`yield_to_maturity`](Self::yield_to_maturity) with an explicit solver.
    pub fn yield_to_maturity_with(
        &self,
        dirty_price: f64,
        as_of: Date,
        solver: &YieldSolver,
    ) -> BondResult<f64> {
        solver.solve(&self.terms.id, &self.yield_flows(as_of)?, dirty_price)
    }

    /// Yield from a clean price.
    pub fn yield_from_clean_price(&self, clean_price: f64, as_of: Date) -> BondResult<f64> {
        let dirty = clean_price + self.accrued_interest(as_of)?;
        self.yield_to_maturity(dirty, as_of)
    }

    /// Dirty price at a flat yield.
    pub fn dirty_price_from_yield(&self, yield_rate: f64, as_of: Date) -> BondResult<f64> {
        Ok(self.yield_flows(as_of)?.price(yield_rate))
    }

    /// Clean price at a flat yield.
    pub fn clean_price_from_yield(&self, yield_rate: f64, as_of: Date) -> BondResult<f64> {
        Ok(self.dirty_price_from_yield(yield_rate, as_of)? - self.accrued_interest(as_of)?)
    }

    /// Duration, convexity and DV01 at a flat yield.
    pub fn yield_risk(&self, yield_rate: f64, as_of: Date) -> BondResult<YieldRisk> {
        YieldRisk::compute(&self.yield_flows(as_of)?, yield_rate)
    }
}

impl Bond for FixedRateBond {
    fn terms(&self) -> &BondTerms {
        &self.terms
    }

    fn cash_flows(&self) -> &CashFlowSchedule {
        &self.cash_flows
    }
}

/// Coupons on every schedule period plus the redemption.
pub(crate) fn fixed_cash_flows(terms: &BondTerms, coupon_rate: f64) -> BondResult<CashFlowSchedule> {
    let schedule = terms.schedule()?;
    let mut flows = Vec::with_capacity(schedule.len() + 1);
    for (start, end, pay) in schedule.periods() {
        flows.push(CashFlow::fixed_coupon(
            pay,
            start,
            end,
            terms.notional,
            coupon_rate,
            terms.day_count,
        )?);
    }
    let last_payment = schedule.dates().last().copied().unwrap_or(terms.maturity);
    flows.push(CashFlow::redemption(last_payment, terms.maturity, terms.notional));
    Ok(CashFlowSchedule::new(flows))
}

/// Builder for [`FixedRateBond`].
#[derive(Debug, Clone, Default)]
pub struct FixedRateBondBuilder {
    id: Option<InstrumentId>,
    coupon_rate: Option<f64>,
    issue_date: Option<Date>,
    maturity: Option<Date>,
    notional: Option<f64>,
    frequency: Option<Frequency>,
    day_count: Option<DayCountConvention>,
    calendar: Option<CalendarId>,
    business_day_convention: Option<BusinessDayConvention>,
    end_of_month: Option<bool>,
    yield_compounding: Option<Compounding>,
}

impl FixedRateBondBuilder {
    /// Sets the identifier.
    #[must_use]
    pub fn id(mut self, id: impl Into<InstrumentId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the annual coupon rate (decimal).
    #[must_use]
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the issue date.
    #[must_use]
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the maturity.
    #[must_use]
    pub fn maturity(mut self, date: Date) -> Self {
        self.maturity = Some(date);
        self
    }

    /// Sets the notional (default 100).
    #[must_use]
    pub fn notional(mut self, notional: f64) -> Self {
        self.notional = Some(notional);
        self
    }

    /// Sets the coupon frequency (default semi-annual).
    #[must_use]
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Sets the day count (default 30/360 US).
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Sets the payment calendar.
    #[must_use]
    pub fn calendar(mut self, calendar: CalendarId) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Sets the payment date adjustment.
    #[must_use]
    pub fn business_day_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.business_day_convention = Some(convention);
        self
    }

    /// Sets the end-of-month rule.
    #[must_use]
    pub fn end_of_month(mut self, eom: bool) -> Self {
        self.end_of_month = Some(eom);
        self
    }

    /// Sets the yield compounding (default follows the frequency).
    #[must_use]
    pub fn yield_compounding(mut self, compounding: Compounding) -> Self {
        self.yield_compounding = Some(compounding);
        self
    }

    /// Builds the terms without a coupon.
    pub fn build_terms(&self) -> BondResult<BondTerms> {
        let id = self.id.clone().ok_or(BondError::MissingField { field: "id" })?;
        let issue_date = self
            .issue_date
            .ok_or(BondError::MissingField { field: "issue_date" })?;
        let maturity = self
            .maturity
            .ok_or(BondError::MissingField { field: "maturity" })?;

        let mut terms = BondTerms::new(id, issue_date, maturity);
        if let Some(frequency) = self.frequency {
            terms = terms.with_frequency(frequency);
        }
        if let Some(notional) = self.notional {
            terms = terms.with_notional(notional);
        }
        if let Some(day_count) = self.day_count {
            terms = terms.with_day_count(day_count);
        }
        if let Some(calendar) = self.calendar {
            terms = terms.with_calendar(calendar);
        }
        if let Some(convention) = self.business_day_convention {
            terms = terms.with_business_day_convention(convention);
        }
        if let Some(eom) = self.end_of_month {
            terms = terms.with_end_of_month(eom);
        }
        if let Some(compounding) = self.yield_compounding {
            terms = terms.with_yield_compounding(compounding);
        }
        Ok(terms)
    }

    /// Builds the bond.
    ///
    /// # Errors
    ///
    /// `MissingField` for an absent id, coupon, issue date or maturity.
    pub fn build(self) -> BondResult<FixedRateBond> {
        let coupon_rate = self
            .coupon_rate
            .ok_or(BondError::MissingField { field: "coupon_rate" })?;
        FixedRateBond::new(self.build_terms()?, coupon_rate)
    }
}
