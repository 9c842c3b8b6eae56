//! The instruments the engine values.

use ratekit_bonds::prelude::{Bond, CallableFixedRateBond, FixedRateBond, FloatingRateNote};
use ratekit_core::types::InstrumentId;

/// A bond the valuation engine knows how to value.
#[derive(Debug, Clone)]
pub enum Instrument {
    /// Fixed coupon bullet.
    Fixed(FixedRateBond),
    /// Floating rate note.
    Floating(FloatingRateNote),
    /// Fixed coupon bond callable by the issuer.
    Callable(CallableFixedRateBond),
}

impl Instrument {
    /// The instrument as a [`Bond`].
    pub fn as_bond(&self) -> &dyn Bond {
        match self {
            Self::Fixed(bond) => bond,
            Self::Floating(bond) => bond,
            Self::Callable(bond) => bond,
        }
    }

    /// Instrument identifier.
    pub fn id(&self) -> &InstrumentId {
        self.as_bond().id()
    }
}

impl From<FixedRateBond> for Instrument {
    fn from(bond: FixedRateBond) -> Self {
        Self::Fixed(bond)
    }
}

impl From<FloatingRateNote> for Instrument {
    fn from(bond: FloatingRateNote) -> Self {
        Self::Floating(bond)
    }
}

impl From<CallableFixedRateBond> for Instrument {
    fn from(bond: CallableFixedRateBond) -> Self {
        Self::Callable(bond)
    }
}

/// An instrument with an optional observed dirty price.
///
/// With a price the engine solves yields and spreads against it; without
/// one, yields are solved against the model price and spreads are skipped.
#[derive(Debug, Clone)]
pub struct ValuationRequest {
    /// The instrument.
    pub instrument: Instrument,
    /// Observed dirty price, in notional units.
    pub market_dirty_price: Option<f64>,
}

impl ValuationRequest {
    /// A request without a market price.
    pub fn new(instrument: impl Into<Instrument>) -> Self {
        Self {
            instrument: instrument.into(),
            market_dirty_price: None,
        }
    }

    /// Sets the observed dirty price.
    #[must_use]
    pub fn with_market_price(mut self, dirty_price: f64) -> Self {
        self.market_dirty_price = Some(dirty_price);
        self
    }
}
