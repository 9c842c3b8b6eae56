//! Cupom cambial: the onshore USD rate in Brazil.

use serde::{Deserialize, Serialize};

use ratekit_core::calendars::{BrazilCalendar, Calendar};
use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::{Compounding, Date, InterestRate};

use super::{BootstrapHelper, HelperKind};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Cupom cambial deposit from the curve reference date to `maturity`.
///
/// Quoted simple ACT/360:
///
/// ```text
/// implied = (1 / DF(T) - 1) / τ₃₆₀(ref, T)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CupomCambial {
    id: String,
    maturity: Date,
    rate: f64,
}

impl CupomCambial {
    /// Creates a helper from a quoted rate.
    #[must_use]
    pub fn new(id: impl Into<String>, maturity: Date, rate: f64) -> Self {
        Self {
            id: id.into(),
            maturity,
            rate,
        }
    }

    /// Derives the rate from spot, the DI rate to maturity and the FX future.
    ///
    /// The USD deposit that matches carrying BRL at the DI rate and
    /// converting back at the future:
    ///
    /// ```text
    /// 1 + cc · τ₃₆₀ = S · (1 + DI)^(bus/252) / F
    /// ```
    pub fn from_market(
        id: impl Into<String>,
        as_of: Date,
        maturity: Date,
        spot: f64,
        di_rate: f64,
        fx_future: f64,
    ) -> CurveResult<Self> {
        let id = id.into();
        if spot <= 0.0 || fx_future <= 0.0 {
            return Err(CurveError::invalid_helper(
                id,
                "spot and FX future must be positive",
            ));
        }
        let di = InterestRate::new(di_rate, DayCountConvention::Business252, Compounding::Annual);
        let compound = spot * di.compound_factor(as_of, maturity)? / fx_future;
        let rate = InterestRate::implied(
            compound,
            DayCountConvention::Act360,
            Compounding::Simple,
            as_of,
            maturity,
        )?;
        Ok(Self::new(id, maturity, rate.rate))
    }

    /// Maturity of the front cupom cambial contract traded on `date`.
    ///
    /// Two business days forward, to the last business day of that month,
    /// then one more business day.
    pub fn next_maturity(date: Date, calendar: &dyn Calendar) -> Date {
        let settle = calendar.add_business_days(date, 2);
        let month_end = settle.end_of_month();
        let last_business = if calendar.is_business_day(month_end) {
            month_end
        } else {
            calendar.previous_business_day(month_end)
        };
        calendar.add_business_days(last_business, 1)
    }

    /// [`next_maturity`](Self::next_maturity) on the Brazil calendar.
    pub fn next_brazil_maturity(date: Date) -> Date {
        Self::next_maturity(date, BrazilCalendar::global())
    }
}

impl BootstrapHelper for CupomCambial {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> HelperKind {
        HelperKind::CupomCambial
    }

    fn maturity(&self) -> Date {
        self.maturity
    }

    fn quote(&self) -> f64 {
        self.rate
    }

    fn implied_quote(&self, curve: &dyn Curve) -> CurveResult<f64> {
        let tau = DayCountConvention::Act360.year_fraction(curve.reference_date(), self.maturity)?;
        if tau <= 0.0 {
            return Err(CurveError::invalid_helper(
                &self.id,
                "maturity must be after the curve reference date",
            ));
        }
        let df = curve.discount_factor(self.maturity)?;
        Ok((1.0 / df - 1.0) / tau)
    }
}
