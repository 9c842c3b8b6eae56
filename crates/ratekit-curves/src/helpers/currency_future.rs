//! FX futures priced by covered interest parity.

use serde::{Deserialize, Serialize};

use ratekit_core::types::Date;

use super::{BootstrapHelper, HelperKind};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// FX future on the domestic curve.
///
/// Price in domestic units per foreign unit. With the foreign discount
/// factor to the same maturity already known,
///
/// ```text
/// implied = S · DF_foreign(T) / DF(T)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyFuture {
    id: String,
    maturity: Date,
    price: f64,
    spot: f64,
    foreign_discount_factor: f64,
}

impl CurrencyFuture {
    /// Creates a future from an explicit foreign discount factor.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        maturity: Date,
        price: f64,
        spot: f64,
        foreign_discount_factor: f64,
    ) -> Self {
        Self {
            id: id.into(),
            maturity,
            price,
            spot,
            foreign_discount_factor,
        }
    }

    /// Creates a future reading the foreign discount factor off a built curve.
    pub fn from_foreign_curve(
        id: impl Into<String>,
        maturity: Date,
        price: f64,
        spot: f64,
        foreign: &dyn Curve,
    ) -> CurveResult<Self> {
        let df = foreign.discount_factor(maturity)?;
        Ok(Self::new(id, maturity, price, spot, df))
    }

    /// FX spot.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Foreign discount factor to maturity.
    pub fn foreign_discount_factor(&self) -> f64 {
        self.foreign_discount_factor
    }
}

impl BootstrapHelper for CurrencyFuture {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> HelperKind {
        HelperKind::CurrencyFuture
    }

    fn maturity(&self) -> Date {
        self.maturity
    }

    fn quote(&self) -> f64 {
        self.price
    }

    fn implied_quote(&self, curve: &dyn Curve) -> CurveResult<f64> {
        if self.spot <= 0.0 || self.foreign_discount_factor <= 0.0 {
            return Err(CurveError::invalid_helper(
                &self.id,
                "spot and foreign discount factor must be positive",
            ));
        }
        let df = curve.discount_factor(self.maturity)?;
        Ok(self.spot * self.foreign_discount_factor / df)
    }
}
