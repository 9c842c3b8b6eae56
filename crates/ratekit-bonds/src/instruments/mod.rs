//! Bond instruments.

mod callable;
mod fixed_rate;
mod floating_rate;

pub use callable::CallableFixedRateBond;
pub use fixed_rate::{FixedRateBond, FixedRateBondBuilder};
pub use floating_rate::FloatingRateNote;
