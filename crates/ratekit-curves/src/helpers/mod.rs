//! Bootstrap helpers: quoted instruments that reprice off a curve.
//!
//! Each helper maps a candidate discount curve to the quote the market
//! would show if that curve were correct. The bootstrapper solves one
//! discount factor per helper so that the implied quote matches the
//! observed one.
//!
//! - [`Deposit`]: simple money-market rate
//! - [`CurrencyFuture`]: FX future priced by covered interest parity
//! - [`FraDi`]: forward rate, DI convention by default
//! - [`Ois`]: overnight index swap par rate
//! - [`SwapRate`]: single-curve vanilla swap par rate
//! - [`CupomCambial`]: onshore USD rate implied by DI and FX futures

mod cupom_cambial;
mod currency_future;
mod deposit;
mod fixed_leg;
mod fra_di;
mod ois;
mod swap;

pub use cupom_cambial::CupomCambial;
pub use currency_future::CurrencyFuture;
pub use deposit::Deposit;
pub use fixed_leg::FixedLeg;
pub use fra_di::FraDi;
pub use ois::Ois;
pub use swap::SwapRate;

use std::fmt;

use serde::{Deserialize, Serialize};

use ratekit_core::types::Date;

use crate::error::CurveResult;
use crate::traits::Curve;

/// Helper type, for reporting and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HelperKind {
    /// Money-market deposit
    Deposit,
    /// FX future
    CurrencyFuture,
    /// DI forward rate agreement
    FraDi,
    /// Overnight index swap
    Ois,
    /// Vanilla fixed/float swap
    SwapRate,
    /// Onshore USD rate
    CupomCambial,
}

impl fmt::Display for HelperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Deposit => "Deposit",
            Self::CurrencyFuture => "CurrencyFuture",
            Self::FraDi => "FRA-DI",
            Self::Ois => "OIS",
            Self::SwapRate => "Swap",
            Self::CupomCambial => "CupomCambial",
        };
        write!(f, "{name}")
    }
}

/// A quoted instrument that can compute its fair quote from a curve.
pub trait BootstrapHelper: Send + Sync + fmt::Debug {
    /// Identifier used in diagnostics.
    fn id(&self) -> &str;

    /// Helper type.
    fn kind(&self) -> HelperKind;

    /// The pillar date this helper determines.
    fn maturity(&self) -> Date;

    /// Observed market quote.
    fn quote(&self) -> f64;

    /// Quote implied by `curve`.
    ///
    /// During a bootstrap `curve` holds only the pillars solved so far plus
    /// the trial pillar, and extrapolates flat beyond them.
    fn implied_quote(&self, curve: &dyn Curve) -> CurveResult<f64>;

    /// `implied_quote - quote`.
    fn quote_error(&self, curve: &dyn Curve) -> CurveResult<f64> {
        Ok(self.implied_quote(curve)? - self.quote())
    }
}

impl<H: BootstrapHelper + ?Sized> BootstrapHelper for Box<H> {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn kind(&self) -> HelperKind {
        (**self).kind()
    }

    fn maturity(&self) -> Date {
        (**self).maturity()
    }

    fn quote(&self) -> f64 {
        (**self).quote()
    }

    fn implied_quote(&self, curve: &dyn Curve) -> CurveResult<f64> {
        (**self).implied_quote(curve)
    }
}
