//! Discount curve defined by pillars.

use serde::{Deserialize, Serialize};

use ratekit_core::daycounts::DayCountConvention;
use ratekit_core::types::Date;
use ratekit_math::interpolation::{Interpolator, LinearInterpolator, LogLinearInterpolator};

use crate::error::{CurveError, CurveResult};
use crate::interpolation::Interpolation;
use crate::traits::{curve_time, Curve};

/// A solved (date, discount factor) point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    /// Pillar date.
    pub date: Date,
    /// Discount factor from the reference date.
    pub discount_factor: f64,
}

impl Pillar {
    /// Creates a pillar.
    #[must_use]
    pub fn new(date: Date, discount_factor: f64) -> Self {
        Self {
            date,
            discount_factor,
        }
    }
}

/// Interpolator over curve time, anchored at `(0, DF = 1)`.
#[derive(Debug, Clone)]
enum Interpolant {
    /// Discount factors, log-linear.
    Discount(LogLinearInterpolator),
    /// Continuously-compounded zero rates, linear.
    Zero(LinearInterpolator),
}

/// Discount curve through a set of pillars.
///
/// Time is ACT/365F from the reference date. Between pillars the curve
/// follows its [`Interpolation`]; beyond the last pillar it extends the
/// last forward rate flat, unless extrapolation is disabled.
///
/// ```rust
/// use ratekit_core::types::Date;
/// use ratekit_curves::{Curve, Interpolation, YieldCurve};
///
/// let today = Date::from_ymd(2025, 1, 15).unwrap();
/// let curve = YieldCurve::from_pillars(
///     today,
///     vec![
///         (Date::from_ymd(2026, 1, 15).unwrap(), 0.97),
///         (Date::from_ymd(2027, 1, 15).unwrap(), 0.93),
///     ],
///     Interpolation::LogLinearDiscount,
/// )
/// .unwrap();
///
/// let mid = Date::from_ymd(2026, 7, 16).unwrap();
/// let df = curve.discount_factor(mid).unwrap();
/// assert!(df < 0.97 && df > 0.93);
/// ```
#[derive(Debug, Clone)]
pub struct YieldCurve {
    reference_date: Date,
    pillars: Vec<Pillar>,
    times: Vec<f64>,
    interpolation: Interpolation,
    interpolant: Interpolant,
    allow_extrapolation: bool,
    day_count: DayCountConvention,
}

impl YieldCurve {
    /// Builds a curve from (date, discount factor) pairs.
    ///
    /// Dates must be strictly increasing and after the reference date; a
    /// leading pillar on the reference date is accepted only with a
    /// discount factor of exactly 1.0 and is then dropped. Discount factors
    /// must be finite and positive. Extrapolation is enabled.
    pub fn from_pillars(
        reference_date: Date,
        pillars: Vec<(Date, f64)>,
        interpolation: Interpolation,
    ) -> CurveResult<Self> {
        let mut points: Vec<Pillar> = Vec::with_capacity(pillars.len());
        for (date, df) in pillars {
            if date < reference_date {
                return Err(CurveError::invalid_pillar(format!(
                    "pillar {date} precedes reference date {reference_date}"
                )));
            }
            if !df.is_finite() || df <= 0.0 {
                return Err(CurveError::invalid_pillar(format!(
                    "discount factor {df} at {date} must be finite and positive"
                )));
            }
            if date == reference_date {
                if df != 1.0 {
                    return Err(CurveError::invalid_pillar(format!(
                        "reference date discount factor must be 1, got {df}"
                    )));
                }
                continue;
            }
            if let Some(last) = points.last() {
                if date == last.date {
                    return Err(CurveError::DuplicatePillar {
                        date,
                        first: format!("DF {}", last.discount_factor),
                        second: format!("DF {df}"),
                    });
                }
                if date < last.date {
                    return Err(CurveError::invalid_pillar(format!(
                        "pillar dates must be increasing: {date} after {}",
                        last.date
                    )));
                }
            }
            points.push(Pillar::new(date, df));
        }

        if points.is_empty() {
            return Err(CurveError::invalid_pillar("at least one pillar is required"));
        }

        let times: Vec<f64> = points
            .iter()
            .map(|p| curve_time(reference_date, p.date))
            .collect();
        let interpolant = build_interpolant(interpolation, &times, &points)?;

        Ok(Self {
            reference_date,
            pillars: points,
            times,
            interpolation,
            interpolant,
            allow_extrapolation: true,
            day_count: DayCountConvention::Act365Fixed,
        })
    }

    /// Enables or disables flat-forward extrapolation past the last pillar.
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// Sets the day count used for simple forward rates.
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// The pillars, in date order.
    pub fn pillars(&self) -> &[Pillar] {
        &self.pillars
    }

    /// The interpolation scheme.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Whether extrapolation past the last pillar is enabled.
    pub fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    /// `ln(DF)` at curve time `t` within the pillar range.
    fn log_df_inside(&self, t: f64) -> CurveResult<f64> {
        Ok(match &self.interpolant {
            Interpolant::Discount(interp) => interp.interpolate_log(t)?,
            Interpolant::Zero(interp) => -interp.interpolate(t)? * t,
        })
    }

    /// Continuously-compounded forward between the last two nodes.
    fn last_forward(&self) -> f64 {
        let n = self.pillars.len();
        let (t_prev, ln_prev) = if n >= 2 {
            (self.times[n - 2], self.pillars[n - 2].discount_factor.ln())
        } else {
            (0.0, 0.0)
        };
        let (t_last, ln_last) = (self.times[n - 1], self.pillars[n - 1].discount_factor.ln());
        (ln_prev - ln_last) / (t_last - t_prev)
    }
}

fn build_interpolant(
    interpolation: Interpolation,
    times: &[f64],
    pillars: &[Pillar],
) -> CurveResult<Interpolant> {
    let mut xs = Vec::with_capacity(times.len() + 1);
    xs.push(0.0);
    xs.extend_from_slice(times);
    let interpolant = match interpolation {
        Interpolation::LogLinearDiscount => {
            let mut dfs = Vec::with_capacity(xs.len());
            dfs.push(1.0);
            dfs.extend(pillars.iter().map(|p| p.discount_factor));
            Interpolant::Discount(LogLinearInterpolator::new(xs, dfs)?)
        }
        Interpolation::LinearZero => {
            let zeros: Vec<f64> = times
                .iter()
                .zip(pillars)
                .map(|(t, p)| -p.discount_factor.ln() / t)
                .collect();
            let mut ys = Vec::with_capacity(xs.len());
            ys.push(zeros[0]);
            ys.extend(zeros);
            Interpolant::Zero(LinearInterpolator::new(xs, ys)?)
        }
    };
    Ok(interpolant)
}

impl Curve for YieldCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        if date == self.reference_date {
            return Ok(1.0);
        }
        let last = self.pillars[self.pillars.len() - 1];
        if date < self.reference_date || (date > last.date && !self.allow_extrapolation) {
            return Err(CurveError::date_out_of_range(
                date,
                self.reference_date,
                last.date,
            ));
        }

        let t = curve_time(self.reference_date, date);
        let t_last = self.times[self.times.len() - 1];
        if t <= t_last {
            return Ok(self.log_df_inside(t)?.exp());
        }
        Ok(last.discount_factor * (-self.last_forward() * (t - t_last)).exp())
    }

    fn max_date(&self) -> Date {
        self.pillars[self.pillars.len() - 1].date
    }

    fn day_count(&self) -> DayCountConvention {
        self.day_count
    }
}
