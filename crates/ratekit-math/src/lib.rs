//! # ratekit Math
//!
//! Numerical building blocks shared by curve bootstrapping and bond analytics:
//!
//! - **Solvers**: a bounded Newton-bisection root finder (the workhorse for
//!   bootstrap, yield and spread solving) and bracket expansion for
//!   unbounded searches
//! - **Interpolation**: linear and log-linear interpolators over strictly
//!   increasing abscissae

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Interpolator, LinearInterpolator, LogLinearInterpolator};
    pub use crate::solvers::{
        expand_bracket, newton_bisection, newton_bisection_numerical, SolverConfig,
        SolverResult,
    };
}

pub use error::{MathError, MathResult};
