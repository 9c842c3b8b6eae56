//! The `Bond` trait: what every instrument exposes to the valuation layer.

use std::fmt;

use ratekit_core::types::{Date, InstrumentId};
use ratekit_curves::Curve;

use crate::cashflows::{CashFlowAmount, CashFlowSchedule, ResolvedFlow};
use crate::error::{BondError, BondResult};
use crate::terms::BondTerms;

/// Common interface for bonds.
///
/// Instruments carry static terms and a cash flow schedule built once at
/// construction. Curves are supplied at valuation time; prices are in the
/// same units as the notional.
pub trait Bond: Send + Sync + fmt::Debug {
    /// Static terms.
    fn terms(&self) -> &BondTerms;

    /// The scheduled cash flows.
    fn cash_flows(&self) -> &CashFlowSchedule;

    /// Bond identifier.
    fn id(&self) -> &InstrumentId {
        &self.terms().id
    }

    /// Maturity date.
    fn maturity(&self) -> Date {
        self.terms().maturity
    }

    /// Settles the amounts of every flow paid after `as_of`.
    ///
    /// The default handles fixed amounts only.
    fn resolve_flows(&self, curve: &dyn Curve, as_of: Date) -> BondResult<Vec<ResolvedFlow>> {
        let _ = curve;
        self.cash_flows()
            .after(as_of)
            .map(|cf| match cf.amount {
                CashFlowAmount::Fixed(amount) => Ok(ResolvedFlow {
                    date: cf.payment_date,
                    amount,
                }),
                CashFlowAmount::Floating { .. } => Err(BondError::invalid_spec(format!(
                    "{}: floating flow on {} has no projection",
                    self.id(),
                    cf.payment_date
                ))),
            })
            .collect()
    }

    /// Interest accrued in the current coupon period at `as_of`.
    ///
    /// Zero on a coupon date and outside the coupon schedule.
    fn accrued_interest(&self, as_of: Date) -> BondResult<f64> {
        let Some(cf) = self.cash_flows().current_coupon(as_of) else {
            return Ok(0.0);
        };
        if cf.accrual_start == as_of {
            return Ok(0.0);
        }
        let CashFlowAmount::Fixed(full) = cf.amount else {
            return Err(BondError::invalid_spec(format!(
                "{}: floating coupon needs a rate to accrue",
                self.id()
            )));
        };
        let day_count = self.terms().day_count;
        let period = day_count.year_fraction(cf.accrual_start, cf.accrual_end)?;
        let elapsed = day_count.year_fraction(cf.accrual_start, as_of)?;
        if period == 0.0 {
            return Ok(0.0);
        }
        Ok(full * elapsed / period)
    }

    /// [`accrued_interest`](Self::accrued_interest) with `curve` at hand to
    /// set a coupon that is not fixed yet.
    ///
    /// Fixed coupons ignore the curve.
    fn accrued_interest_with(&self, curve: &dyn Curve, as_of: Date) -> BondResult<f64> {
        let _ = curve;
        self.accrued_interest(as_of)
    }

    /// `Σ amount × DF(payment)` over flows paid after `as_of`.
    fn present_value(&self, curve: &dyn Curve, as_of: Date) -> BondResult<f64> {
        let flows = self.resolve_flows(curve, as_of)?;
        discount_flows(&flows, curve)
    }

    /// Present value carried forward to `as_of`: `PV / DF(as_of)`.
    fn dirty_price(&self, curve: &dyn Curve, as_of: Date) -> BondResult<f64> {
        let pv = self.present_value(curve, as_of)?;
        Ok(pv / curve.discount_factor(as_of)?)
    }

    /// Dirty price less accrued interest.
    fn clean_price(&self, curve: &dyn Curve, as_of: Date) -> BondResult<f64> {
        Ok(self.dirty_price(curve, as_of)? - self.accrued_interest_with(curve, as_of)?)
    }

    /// True for bonds whose value depends on an exercise decision.
    fn has_embedded_option(&self) -> bool {
        false
    }
}

/// Sum of discounted flows.
pub(crate) fn discount_flows(flows: &[ResolvedFlow], curve: &dyn Curve) -> BondResult<f64> {
    flows.iter().try_fold(0.0, |pv, flow| {
        Ok(pv + flow.amount * curve.discount_factor(flow.date)?)
    })
}
