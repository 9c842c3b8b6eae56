//! Constant-rate curve.

use ratekit_core::types::Date;

use crate::error::{CurveError, CurveResult};
use crate::traits::{curve_time, Curve};

/// Curve with a single continuously-compounded rate.
///
/// Covers every date from the reference date onwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatForwardCurve {
    reference_date: Date,
    rate: f64,
}

impl FlatForwardCurve {
    /// Creates a flat curve at `rate` (continuously compounded, ACT/365F).
    #[must_use]
    pub fn new(reference_date: Date, rate: f64) -> Self {
        Self {
            reference_date,
            rate,
        }
    }

    /// The continuously-compounded rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Curve for FlatForwardCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        if date < self.reference_date {
            return Err(CurveError::date_out_of_range(
                date,
                self.reference_date,
                self.max_date(),
            ));
        }
        if date == self.reference_date {
            return Ok(1.0);
        }
        Ok((-self.rate * curve_time(self.reference_date, date)).exp())
    }

    fn max_date(&self) -> Date {
        self.reference_date.add_days(365 * 200)
    }
}
