//! # ratekit Analytics
//!
//! Ties quotes, curves and bonds together:
//!
//! - [`CurveBuilder`]: quote feed and [`CurveDefinition`] to a bootstrapped
//!   curve
//! - [`ValuationEngine`]: instrument and curve to a [`ValuationResult`],
//!   singly, in batches, or straight into a result store
//! - [`AnalyticsConfig`]: solver, curve and option model settings, loadable
//!   from TOML
//!
//! ## Example
//!
//! ```rust
//! use ratekit_analytics::prelude::*;
//! use ratekit_bonds::prelude::*;
//! use ratekit_core::types::{Date, Quote};
//! use ratekit_feeds::InMemoryQuoteFeed;
//!
//! let today = Date::from_ymd(2025, 1, 15).unwrap();
//! let feed: InMemoryQuoteFeed = [
//!     Quote::from_f64("DEP6M", today, 0.035),
//!     Quote::from_f64("SW3Y", today, 0.037),
//! ]
//! .into_iter()
//! .collect();
//!
//! let definition = CurveDefinition::from_toml_str(r#"
//!     name = "USD"
//!     [[helpers]]
//!     type = "deposit"
//!     id = "DEP6M"
//!     tenor = "6M"
//!     [[helpers]]
//!     type = "swap"
//!     id = "SW3Y"
//!     tenor = "3Y"
//! "#).unwrap();
//!
//! let config = AnalyticsConfig::default();
//! let curve = CurveBuilder::new(&feed, config).build(&definition, today).unwrap();
//!
//! let bond = FixedRateBond::new(BondTerms::new("T3", today, Date::from_ymd(2028, 1, 15).unwrap()), 0.037)
//!     .unwrap();
//! let result = ValuationEngine::new(config).value(&bond.into(), &curve, today, None).unwrap();
//! assert!((result.dirty_price - 100.0).abs() < 0.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::return_self_not_must_use)]

pub mod config;
pub mod curve_builder;
pub mod engine;
pub mod error;
pub mod instrument;

pub use config::{AnalyticsConfig, CurveSettings, OptionSettings, SolverSettings};
pub use curve_builder::{CurveBuilder, CurveDefinition, HelperTemplate};
pub use engine::{ValuationEngine, ValuationResult};
pub use error::{AnalyticsError, AnalyticsResult};
pub use instrument::{Instrument, ValuationRequest};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::AnalyticsConfig;
    pub use crate::curve_builder::{CurveBuilder, CurveDefinition, HelperTemplate};
    pub use crate::engine::{ValuationEngine, ValuationResult};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::instrument::{Instrument, ValuationRequest};
}
