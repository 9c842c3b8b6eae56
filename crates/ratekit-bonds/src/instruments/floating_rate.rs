//! Floating-rate note.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use ratekit_core::types::{Compounding, Date};
use ratekit_curves::Curve;

use crate::cashflows::{CashFlow, CashFlowAmount, CashFlowSchedule, ResolvedFlow};
use crate::error::{BondError, BondResult};
use crate::terms::BondTerms;
use crate::traits::Bond;

/// A note paying `notional × (index + spread) × τ` each period.
///
/// The index rate of a period is the simple forward over its accrual dates
/// on the index curve, or on the discount curve when no index curve is
/// attached. Periods that started before the curve's reference date use a
/// stored fixing keyed by accrual start.
#[derive(Clone)]
pub struct FloatingRateNote {
    terms: BondTerms,
    spread: f64,
    index_curve: Option<Arc<dyn Curve>>,
    fixings: BTreeMap<Date, f64>,
    cash_flows: CashFlowSchedule,
}

impl fmt::Debug for FloatingRateNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatingRateNote")
            .field("terms", &self.terms)
            .field("spread", &self.spread)
            .field("index_curve", &self.index_curve.as_ref().map(|c| c.reference_date()))
            .field("fixings", &self.fixings)
            .finish_non_exhaustive()
    }
}

impl FloatingRateNote {
    /// Creates a note paying the index plus `spread`.
    pub fn new(terms: BondTerms, spread: f64) -> BondResult<Self> {
        if !spread.is_finite() {
            return Err(BondError::invalid_spec(format!("{}: spread is not finite", terms.id)));
        }
        let schedule = terms.schedule()?;
        let mut flows: Vec<CashFlow> = schedule
            .periods()
            .map(|(start, end, pay)| CashFlow::floating_coupon(pay, start, end, terms.notional, spread))
            .collect();
        let last_payment = schedule.dates().last().copied().unwrap_or(terms.maturity);
        flows.push(CashFlow::redemption(last_payment, terms.maturity, terms.notional));

        Ok(Self {
            terms,
            spread,
            index_curve: None,
            fixings: BTreeMap::new(),
            cash_flows: CashFlowSchedule::new(flows),
        })
    }

    /// Projects coupons on `curve` instead of the discount curve.
    #[must_use]
    pub fn with_index_curve(mut self, curve: Arc<dyn Curve>) -> Self {
        self.index_curve = Some(curve);
        self
    }

    /// Stores the index fixing for the period starting on `accrual_start`.
    #[must_use]
    pub fn with_fixing(mut self, accrual_start: Date, rate: f64) -> Self {
        self.fixings.insert(accrual_start, rate);
        self
    }

    /// Stores several fixings.
    #[must_use]
    pub fn with_fixings(mut self, fixings: impl IntoIterator<Item = (Date, f64)>) -> Self {
        self.fixings.extend(fixings);
        self
    }

    /// Spread over the index.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Stored fixings by accrual start.
    #[must_use]
    pub fn fixings(&self) -> &BTreeMap<Date, f64> {
        &self.fixings
    }

    /// Index rate for the period `[start, end)`.
    ///
    /// # Errors
    ///
    /// `MissingFixing` when the period started before `projection`'s
    /// reference date and no fixing was stored.
    pub fn index_rate(&self, projection: &dyn Curve, start: Date, end: Date) -> BondResult<f64> {
        if start < projection.reference_date() {
            return self.fixings.get(&start).copied().ok_or_else(|| BondError::MissingFixing {
                bond: self.terms.id.to_string(),
                date: start,
            });
        }
        Ok(projection.forward_rate_with(start, end, self.terms.day_count, Compounding::Simple)?)
    }

    fn coupon(&self, projection: &dyn Curve, cf: &CashFlow, notional: f64, spread: f64) -> BondResult<f64> {
        let rate = self.index_rate(projection, cf.accrual_start, cf.accrual_end)?;
        let tau = self.terms.day_count.year_fraction(cf.accrual_start, cf.accrual_end)?;
        Ok(notional * (rate + spread) * tau)
    }
}

impl Bond for FloatingRateNote {
    fn terms(&self) -> &BondTerms {
        &self.terms
    }

    fn cash_flows(&self) -> &CashFlowSchedule {
        &self.cash_flows
    }

    fn resolve_flows(&self, curve: &dyn Curve, as_of: Date) -> BondResult<Vec<ResolvedFlow>> {
        let projection: &dyn Curve = match &self.index_curve {
            Some(index) => index.as_ref(),
            None => curve,
        };
        self.cash_flows
            .after(as_of)
            .map(|cf| -> BondResult<ResolvedFlow> {
                let amount = match cf.amount {
                    CashFlowAmount::Fixed(amount) => amount,
                    CashFlowAmount::Floating { notional, spread } => {
                        self.coupon(projection, cf, notional, spread)?
                    }
                };
                Ok(ResolvedFlow {
                    date: cf.payment_date,
                    amount,
                })
            })
            .collect()
    }

    /// Accrues the current period at its fixing, or at the index curve's
    /// forward when the period starts on or after that curve's date.
    fn accrued_interest(&self, as_of: Date) -> BondResult<f64> {
        self.accrue(self.index_curve.as_deref(), as_of)
    }

    /// As [`accrued_interest`](Bond::accrued_interest), projecting an unfixed
    /// period on `curve` when no index curve is attached.
    fn accrued_interest_with(&self, curve: &dyn Curve, as_of: Date) -> BondResult<f64> {
        self.accrue(Some(self.index_curve.as_deref().unwrap_or(curve)), as_of)
    }
}

impl FloatingRateNote {
    fn accrue(&self, projection: Option<&dyn Curve>, as_of: Date) -> BondResult<f64> {
        let Some(cf) = self.cash_flows.current_coupon(as_of) else {
            return Ok(0.0);
        };
        if cf.accrual_start == as_of {
            return Ok(0.0);
        }
        let rate = match (self.fixings.get(&cf.accrual_start), projection) {
            (Some(&fixing), _) => fixing,
            (None, Some(curve)) => self.index_rate(curve, cf.accrual_start, cf.accrual_end)?,
            (None, None) => {
                return Err(BondError::MissingFixing {
                    bond: self.terms.id.to_string(),
                    date: cf.accrual_start,
                })
            }
        };
        let elapsed = self.terms.day_count.year_fraction(cf.accrual_start, as_of)?;
        Ok(self.terms.notional * (rate + self.spread) * elapsed)
    }
}
