//! Bond traits.

mod bond;

pub use bond::Bond;
pub(crate) use bond::discount_flows;
