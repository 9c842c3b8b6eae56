//! Yield and spread solvers.

mod spread;
mod yield_solver;

pub use spread::{option_adjusted_spread, z_spread};
pub use yield_solver::{YieldFlows, YieldSolver, MAX_YIELD, MIN_YIELD};
