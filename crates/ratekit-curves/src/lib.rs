//! # ratekit Curves
//!
//! Discount curves and the machinery to build them from market quotes.
//!
//! - [`Curve`]: the discounting interface every curve implements
//! - [`YieldCurve`]: discount-factor pillars with log-linear or linear-zero
//!   interpolation
//! - [`helpers`]: deposits, FX futures, FRA-DI, OIS, swaps and cupom cambial
//!   quotes, each able to reprice itself off a curve
//! - [`Bootstrapper`]: sequential pillar-by-pillar bootstrap
//! - [`CurrencyCurve`], [`HybridYieldCurve`], [`FlatForwardCurve`],
//!   [`ShiftedCurve`], [`SpreadedCurve`], [`ImpliedCurve`]: composites over
//!   shared parent curves
//!
//! ## Example
//!
//! ```rust
//! use ratekit_core::prelude::*;
//! use ratekit_curves::prelude::*;
//!
//! let today = Date::from_ymd(2025, 1, 15).unwrap();
//! let curve = Bootstrapper::new(today)
//!     .add_helper(Deposit::new("DEP1Y", today, today.add_days(360), 0.03))
//!     .bootstrap()
//!     .unwrap();
//!
//! let df = curve.discount_factor(today.add_days(360)).unwrap();
//! assert!((df - 1.0 / 1.03).abs() < 1e-10);
//! assert_eq!(curve.discount_factor(today).unwrap(), 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::similar_names)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::float_cmp)]

pub mod bootstrap;
pub mod curves;
pub mod error;
pub mod helpers;
mod interpolation;
pub mod repricing;
mod traits;

pub use bootstrap::{BootstrapConfig, BootstrapResult, Bootstrapper};
pub use curves::{
    Blend, CurrencyCurve, FlatForwardCurve, FxBasis, FxForwardNode, HybridYieldCurve, ImpliedCurve,
    Pillar, ShiftedCurve, SpreadNode, SpreadedCurve, YieldCurve,
};
pub use error::{CurveError, CurveResult};
pub use interpolation::Interpolation;
pub use repricing::{RepricingCheck, RepricingReport};
pub use traits::{curve_time, Curve};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{BootstrapConfig, BootstrapResult, Bootstrapper};
    pub use crate::curves::{
        Blend, CurrencyCurve, FlatForwardCurve, FxBasis, FxForwardNode, HybridYieldCurve,
        ImpliedCurve, ShiftedCurve, SpreadNode, SpreadedCurve, YieldCurve,
    };
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::helpers::{
        BootstrapHelper, CupomCambial, CurrencyFuture, Deposit, FixedLeg, FraDi, HelperKind, Ois,
        SwapRate,
    };
    pub use crate::repricing::{RepricingCheck, RepricingReport};
    pub use crate::interpolation::Interpolation;
    pub use crate::traits::Curve;
}
