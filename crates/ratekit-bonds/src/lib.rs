//! # ratekit Bonds
//!
//! Bond instruments valued against ratekit curves:
//!
//! - **Instruments**: [`FixedRateBond`], [`FloatingRateNote`],
//!   [`CallableFixedRateBond`] sharing the [`Bond`] trait
//! - **Cash flows**: backward-generated coupon schedules with end-of-month
//!   and business-day rules
//! - **Pricing**: present value, dirty and clean prices, yield to maturity,
//!   Z-spread and option-adjusted spread
//! - **Risk**: Macaulay and modified duration, convexity, DV01 and
//!   effective measures from curve shifts
//! - **Options**: deterministic call exercise and a Ho-Lee lattice
//!
//! ## Example
//!
//! ```rust
//! use ratekit_bonds::prelude::*;
//! use ratekit_core::types::{Date, Frequency};
//! use ratekit_curves::FlatForwardCurve;
//!
//! let today = Date::from_ymd(2025, 1, 15).unwrap();
//! let terms = BondTerms::new("C6", today, Date::from_ymd(2027, 1, 15).unwrap())
//!     .with_frequency(Frequency::Annual);
//! let bullet = FixedRateBond::new(terms, 0.06).unwrap();
//! let calls = CallSchedule::new(vec![CallEntry::new(Date::from_ymd(2026, 1, 15).unwrap(), 100.0)]).unwrap();
//! let callable = CallableFixedRateBond::new(bullet.clone(), calls).unwrap();
//!
//! let curve = FlatForwardCurve::new(today, 0.05);
//! assert!(callable.dirty_price(&curve, today).unwrap() < bullet.dirty_price(&curve, today).unwrap());
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
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::float_cmp)]

pub mod cashflows;
pub mod error;
pub mod instruments;
pub mod options;
pub mod pricing;
pub mod risk;
pub mod terms;
pub mod traits;
pub mod types;

pub use error::{BondError, BondResult};
pub use instruments::{CallableFixedRateBond, FixedRateBond, FloatingRateNote};
pub use terms::BondTerms;
pub use traits::Bond;
pub use types::{CallEntry, CallSchedule};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{CashFlow, CashFlowAmount, CashFlowKind, CashFlowSchedule, ResolvedFlow};
    pub use crate::error::{BondError, BondResult};
    pub use crate::instruments::{
        CallableFixedRateBond, FixedRateBond, FixedRateBondBuilder, FloatingRateNote,
    };
    pub use crate::options::OptionModel;
    pub use crate::pricing::{option_adjusted_spread, z_spread, YieldFlows, YieldSolver};
    pub use crate::risk::{effective_risk, EffectiveRisk, YieldRisk};
    pub use crate::terms::BondTerms;
    pub use crate::traits::Bond;
    pub use crate::types::{CallEntry, CallSchedule};
}
