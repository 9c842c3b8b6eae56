//! # ratekit Core
//!
//! Foundational types shared by every ratekit crate:
//!
//! - **Types**: [`Date`], [`Tenor`], [`Frequency`], [`Compounding`], [`InterestRate`],
//!   market [`Quote`]s keyed by [`InstrumentId`]
//! - **Day Count Conventions**: year fractions under ACT/360, ACT/365F, ACT/ACT,
//!   30/360 and BUS/252
//! - **Business Day Calendars**: weekend-only, Brazil (ANBIMA) and user-supplied
//!   holiday lists, with Following / Modified Following / Preceding rolling
//!
//! ## Example
//!
//! ```rust
//! use ratekit_core::prelude::*;
//!
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! let yf = DayCountConvention::Act360.year_fraction(start, end).unwrap();
//! assert!((yf - 181.0 / 360.0).abs() < 1e-15);
//!
//! // 2025-03-03 is Carnival Monday in Brazil
//! let carnival = Date::from_ymd(2025, 3, 3).unwrap();
//! let rolled = BrazilCalendar::global()
//!     .adjust(carnival, BusinessDayConvention::Following)
//!     .unwrap();
//! assert_eq!(rolled, Date::from_ymd(2025, 3, 5).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        BrazilCalendar, BusinessDayConvention, Calendar, CalendarId, HolidayCalendar,
        WeekendCalendar,
    };
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        Compounding, Date, Frequency, InstrumentId, InterestRate, Quote, Tenor, TenorUnit,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, InstrumentId, Quote};
