//! Composite curves over shared parents.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ratekit_core::types::Date;

use crate::error::{CurveError, CurveResult};
use crate::traits::{curve_time, Curve};

/// Policy at a segment boundary of a prioritized hybrid curve.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Blend {
    /// Hard switch. The limit itself belongs to the lower segment.
    #[default]
    None,
    /// Continuously-compounded zero rates blended linearly across
    /// `[limit - window/2, limit + window/2]` (years).
    Linear {
        /// Width of the blending window in years.
        window: f64,
    },
}

#[derive(Clone)]
struct Segment {
    curve: Arc<dyn Curve>,
    limit: f64,
}

#[derive(Clone)]
enum Composition {
    Prioritized { segments: Vec<Segment>, blend: Blend },
    Weighted(Vec<(Arc<dyn Curve>, f64)>),
}

/// Curve composed from several parents sharing a reference date.
///
/// In prioritized mode each parent covers tenors up to its limit (years of
/// curve time) and the last parent is open-ended. In weighted mode the zero
/// rate is the weighted sum of the parents' zero rates, as when stacking a
/// spread curve on a government curve.
#[derive(Clone)]
pub struct HybridYieldCurve {
    reference_date: Date,
    composition: Composition,
}

impl std::fmt::Debug for HybridYieldCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("HybridYieldCurve");
        s.field("reference_date", &self.reference_date);
        match &self.composition {
            Composition::Prioritized { segments, blend } => {
                let limits: Vec<f64> = segments.iter().map(|seg| seg.limit).collect();
                s.field("limits", &limits).field("blend", blend);
            }
            Composition::Weighted(parts) => {
                let weights: Vec<f64> = parts.iter().map(|(_, w)| *w).collect();
                s.field("weights", &weights);
            }
        }
        s.finish_non_exhaustive()
    }
}

fn common_reference<'a>(
    curves: impl IntoIterator<Item = &'a Arc<dyn Curve>>,
) -> CurveResult<Date> {
    let mut iter = curves.into_iter();
    let first = iter
        .next()
        .ok_or_else(|| CurveError::invalid_curve("at least one parent curve is required"))?
        .reference_date();
    for curve in iter {
        if curve.reference_date() != first {
            return Err(CurveError::ReferenceDateMismatch {
                expected: first,
                got: curve.reference_date(),
            });
        }
    }
    Ok(first)
}

impl HybridYieldCurve {
    /// Prioritized composition from `(parent, tenor limit in years)` pairs.
    ///
    /// Limits must be strictly increasing; the last limit is ignored.
    /// Blending windows must be non-negative and must not overlap.
    pub fn new(segments: Vec<(Arc<dyn Curve>, f64)>, blend: Blend) -> CurveResult<Self> {
        let reference_date = common_reference(segments.iter().map(|(c, _)| c))?;

        let n = segments.len();
        let limits: Vec<f64> = segments.iter().take(n - 1).map(|(_, l)| *l).collect();
        for pair in limits.windows(2) {
            if pair[1] <= pair[0] {
                return Err(CurveError::invalid_curve(format!(
                    "segment limits must be increasing: {} after {}",
                    pair[1], pair[0]
                )));
            }
        }
        if limits.iter().any(|l| !l.is_finite() || *l <= 0.0) {
            return Err(CurveError::invalid_curve("segment limits must be positive"));
        }
        if let Blend::Linear { window } = blend {
            if !window.is_finite() || window < 0.0 {
                return Err(CurveError::invalid_curve(format!(
                    "blend window must be non-negative, got {window}"
                )));
            }
            if limits.first().is_some_and(|l| *l - window / 2.0 < 0.0) {
                return Err(CurveError::invalid_curve(
                    "blend window extends before the reference date",
                ));
            }
            if limits.windows(2).any(|pair| pair[1] - pair[0] < window) {
                return Err(CurveError::invalid_curve("blend windows overlap"));
            }
        }

        let segments = segments
            .into_iter()
            .map(|(curve, limit)| Segment { curve, limit })
            .collect();
        Ok(Self {
            reference_date,
            composition: Composition::Prioritized { segments, blend },
        })
    }

    /// Weighted composition: `ln DF = Σ wᵢ ln DFᵢ`.
    pub fn weighted(parts: Vec<(Arc<dyn Curve>, f64)>) -> CurveResult<Self> {
        let reference_date = common_reference(parts.iter().map(|(c, _)| c))?;
        if parts.iter().any(|(_, w)| !w.is_finite()) {
            return Err(CurveError::invalid_curve("weights must be finite"));
        }
        Ok(Self {
            reference_date,
            composition: Composition::Weighted(parts),
        })
    }

    /// Index of the segment covering curve time `t`.
    fn segment_index(segments: &[Segment], t: f64) -> usize {
        segments
            .iter()
            .take(segments.len() - 1)
            .position(|seg| t <= seg.limit)
            .unwrap_or(segments.len() - 1)
    }

    fn prioritized_df(&self, segments: &[Segment], blend: Blend, date: Date) -> CurveResult<f64> {
        let t = curve_time(self.reference_date, date);
        let idx = Self::segment_index(segments, t);

        if let Blend::Linear { window } = blend {
            if window > 0.0 {
                let boundary = segments.iter().take(segments.len() - 1).enumerate().find(
                    |(_, seg)| (t - seg.limit).abs() < window / 2.0,
                );
                if let Some((lower, seg)) = boundary {
                    let alpha = (t - (seg.limit - window / 2.0)) / window;
                    let ln_lower = segments[lower].curve.discount_factor(date)?.ln();
                    let ln_upper = segments[lower + 1].curve.discount_factor(date)?.ln();
                    // Blending -ln(DF)/t linearly is the same as blending ln(DF)
                    return Ok(((1.0 - alpha) * ln_lower + alpha * ln_upper).exp());
                }
            }
        }

        segments[idx].curve.discount_factor(date)
    }
}

impl Curve for HybridYieldCurve {
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
        match &self.composition {
            Composition::Prioritized { segments, blend } => {
                self.prioritized_df(segments, *blend, date)
            }
            Composition::Weighted(parts) => {
                let mut ln_df = 0.0;
                for (curve, weight) in parts {
                    ln_df += weight * curve.discount_factor(date)?.ln();
                }
                Ok(ln_df.exp())
            }
        }
    }

    fn max_date(&self) -> Date {
        match &self.composition {
            Composition::Prioritized { segments, .. } => segments
                .last()
                .map_or(self.reference_date, |seg| seg.curve.max_date()),
            Composition::Weighted(parts) => parts
                .iter()
                .map(|(c, _)| c.max_date())
                .min()
                .unwrap_or(self.reference_date),
        }
    }
}
