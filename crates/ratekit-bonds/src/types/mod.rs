//! Supporting bond types.

mod call_schedule;

pub use call_schedule::{CallEntry, CallSchedule};
