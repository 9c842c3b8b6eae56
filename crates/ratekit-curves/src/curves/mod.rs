//! Curve implementations.
//!
//! - [`YieldCurve`]: pillar-based, the output of a bootstrap
//! - [`CurrencyCurve`]: foreign discounting implied by FX forwards
//! - [`HybridYieldCurve`]: tenor-segmented or weighted composition
//! - [`FlatForwardCurve`]: constant continuously-compounded rate
//! - [`ShiftedCurve`]: parallel zero-rate shift of another curve
//! - [`SpreadedCurve`]: zero spreads by tenor over another curve
//! - [`ImpliedCurve`]: another curve re-anchored at a later date

mod currency;
mod flat;
mod hybrid;
mod implied;
mod shifted;
mod spreaded;
mod yield_curve;

pub use currency::{CurrencyCurve, FxBasis, FxForwardNode};
pub use flat::FlatForwardCurve;
pub use hybrid::{Blend, HybridYieldCurve};
pub use implied::ImpliedCurve;
pub use shifted::ShiftedCurve;
pub use spreaded::{SpreadNode, SpreadedCurve};
pub use yield_curve::{Pillar, YieldCurve};
