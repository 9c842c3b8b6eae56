//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Calendar;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// How a date falling on a non-business day is rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// Keep the date even if it is not a business day.
    Unadjusted,

    /// Next business day.
    #[default]
    Following,

    /// Next business day unless that crosses into the next month, in which
    /// case the previous business day.
    ModifiedFollowing,

    /// Previous business day.
    Preceding,

    /// Previous business day unless that crosses into the previous month,
    /// in which case the next business day.
    ModifiedPreceding,
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace([' ', '_', '-'], "").as_str() {
            "UNADJUSTED" | "NONE" => Ok(Self::Unadjusted),
            "FOLLOWING" | "F" => Ok(Self::Following),
            "MODIFIEDFOLLOWING" | "MF" => Ok(Self::ModifiedFollowing),
            "PRECEDING" | "P" => Ok(Self::Preceding),
            "MODIFIEDPRECEDING" | "MP" => Ok(Self::ModifiedPreceding),
            _ => Err(CoreError::parse("business day convention", s)),
        }
    }
}

/// Rolls `date` on `calendar` according to `convention`.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> CoreResult<Date> {
    if calendar.is_business_day(date) {
        return Ok(date);
    }

    let adjusted = match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => calendar.next_business_day(date),
        BusinessDayConvention::ModifiedFollowing => {
            let next = calendar.next_business_day(date);
            if next.month() == date.month() {
                next
            } else {
                calendar.previous_business_day(date)
            }
        }
        BusinessDayConvention::Preceding => calendar.previous_business_day(date),
        BusinessDayConvention::ModifiedPreceding => {
            let prev = calendar.previous_business_day(date);
            if prev.month() == date.month() {
                prev
            } else {
                calendar.next_business_day(date)
            }
        }
    };
    Ok(adjusted)
}
