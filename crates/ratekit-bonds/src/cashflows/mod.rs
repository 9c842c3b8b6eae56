//! Cash flow representation and schedules.

mod schedule;

pub use schedule::Schedule;

use serde::{Deserialize, Serialize};

use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::Date;

use crate::error::BondResult;

/// How a cash flow's amount is determined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CashFlowAmount {
    /// Amount known at construction.
    Fixed(f64),
    /// Coupon set from an index rate: `notional × (index + spread) × τ`.
    Floating {
        /// Notional the rate accrues on.
        notional: f64,
        /// Spread over the index.
        spread: f64,
    },
}

/// Nature of a cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CashFlowKind {
    /// Periodic coupon.
    Coupon,
    /// Return of principal.
    Redemption,
}

/// A single scheduled payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Adjusted payment date.
    pub payment_date: Date,
    /// Accrual start.
    pub accrual_start: Date,
    /// Accrual end.
    pub accrual_end: Date,
    /// Amount or amount-generating rule.
    pub amount: CashFlowAmount,
    /// Coupon or redemption.
    pub kind: CashFlowKind,
}

impl CashFlow {
    /// Fixed coupon of `notional × rate × τ`.
    pub fn fixed_coupon(
        payment_date: Date,
        accrual_start: Date,
        accrual_end: Date,
        notional: f64,
        rate: f64,
        day_count: DayCountConvention,
    ) -> BondResult<Self> {
        let tau = day_count.year_fraction(accrual_start, accrual_end)?;
        Ok(Self {
            payment_date,
            accrual_start,
            accrual_end,
            amount: CashFlowAmount::Fixed(notional * rate * tau),
            kind: CashFlowKind::Coupon,
        })
    }

    /// Floating coupon resolved at valuation time.
    #[must_use]
    pub fn floating_coupon(
        payment_date: Date,
        accrual_start: Date,
        accrual_end: Date,
        notional: f64,
        spread: f64,
    ) -> Self {
        Self {
            payment_date,
            accrual_start,
            accrual_end,
            amount: CashFlowAmount::Floating { notional, spread },
            kind: CashFlowKind::Coupon,
        }
    }

    /// Principal repayment.
    #[must_use]
    pub fn redemption(payment_date: Date, accrual_end: Date, notional: f64) -> Self {
        Self {
            payment_date,
            accrual_start: accrual_end,
            accrual_end,
            amount: CashFlowAmount::Fixed(notional),
            kind: CashFlowKind::Redemption,
        }
    }

    /// The fixed amount, if known.
    #[must_use]
    pub fn fixed_amount(&self) -> Option<f64> {
        match self.amount {
            CashFlowAmount::Fixed(amount) => Some(amount),
            CashFlowAmount::Floating { .. } => None,
        }
    }

    /// True for coupons.
    #[must_use]
    pub fn is_coupon(&self) -> bool {
        self.kind == CashFlowKind::Coupon
    }

    /// True when the accrual period contains `date` (start inclusive).
    #[must_use]
    pub fn accrues_on(&self, date: Date) -> bool {
        self.is_coupon() && self.accrual_start <= date && date < self.accrual_end
    }
}

/// A cash flow with its amount settled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFlow {
    /// Payment date.
    pub date: Date,
    /// Amount paid.
    pub amount: f64,
}

/// Ordered cash flows of an instrument, built once and never changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    flows: Vec<CashFlow>,
}

impl CashFlowSchedule {
    /// Wraps flows, ordering them by payment date (coupons before the
    /// redemption on the same date).
    #[must_use]
    pub fn new(mut flows: Vec<CashFlow>) -> Self {
        flows.sort_by_key(|cf| (cf.payment_date, cf.kind == CashFlowKind::Redemption));
        Self { flows }
    }

    /// All flows.
    #[must_use]
    pub fn flows(&self) -> &[CashFlow] {
        &self.flows
    }

    /// Iterates over the flows.
    pub fn iter(&self) -> std::slice::Iter<'_, CashFlow> {
        self.flows.iter()
    }

    /// Number of flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// True when there are no flows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Flows paid strictly after `date`.
    pub fn after(&self, date: Date) -> impl Iterator<Item = &CashFlow> + '_ {
        self.flows.iter().filter(move |cf| cf.payment_date > date)
    }

    /// The coupon whose accrual period contains `date`.
    #[must_use]
    pub fn current_coupon(&self, date: Date) -> Option<&CashFlow> {
        self.flows.iter().find(|cf| cf.accrues_on(date))
    }

    /// Last payment date.
    #[must_use]
    pub fn last_payment_date(&self) -> Option<Date> {
        self.flows.last().map(|cf| cf.payment_date)
    }
}

impl<'a> IntoIterator for &'a CashFlowSchedule {
    type Item = &'a CashFlow;
    type IntoIter = std::slice::Iter<'a, CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}
