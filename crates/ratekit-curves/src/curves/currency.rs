//! Foreign-currency discounting implied by FX forwards.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use ratekit_core::types::Date;
use ratekit_math::interpolation::{Interpolator, LinearInterpolator};

use crate::error::{CurveError, CurveResult};
use crate::traits::{curve_time, Curve};

/// An outright FX forward at a date, in domestic units per foreign unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FxForwardNode {
    /// Delivery date.
    pub date: Date,
    /// Outright forward.
    pub forward: f64,
}

/// Basis between the FX-implied and the quoted foreign curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FxBasis {
    /// Constant continuously-compounded spread over the foreign curve.
    Flat {
        /// The spread.
        spread: f64,
    },
    /// Outright forwards, linearly interpolated in curve time from spot at
    /// the reference date.
    Forwards(Vec<FxForwardNode>),
}

/// Discount curve for the foreign currency consistent with FX forwards.
///
/// With spot `S` quoted as domestic units per foreign unit and forward
/// `F(T)`, covered interest parity gives
/// `DF(T) = DF_domestic(T) · F(T) / S`. Under a flat basis `b`,
/// `DF(T) = DF_foreign(T) · e^{-bT}` and the forward follows.
#[derive(Clone)]
pub struct CurrencyCurve {
    reference_date: Date,
    domestic: Arc<dyn Curve>,
    foreign: Arc<dyn Curve>,
    spot: f64,
    basis: FxBasis,
    forwards: Option<LinearInterpolator>,
    last_node: Option<FxForwardNode>,
    allow_extrapolation: bool,
}

impl std::fmt::Debug for CurrencyCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrencyCurve")
            .field("reference_date", &self.reference_date)
            .field("spot", &self.spot)
            .field("basis", &self.basis)
            .field("allow_extrapolation", &self.allow_extrapolation)
            .finish_non_exhaustive()
    }
}

impl CurrencyCurve {
    /// Composes a currency curve.
    ///
    /// Both parents must share the reference date. Forward nodes must be
    /// after the reference date, strictly increasing and positive.
    pub fn new(
        domestic: Arc<dyn Curve>,
        foreign: Arc<dyn Curve>,
        spot: f64,
        basis: FxBasis,
    ) -> CurveResult<Self> {
        let reference_date = domestic.reference_date();
        if foreign.reference_date() != reference_date {
            return Err(CurveError::ReferenceDateMismatch {
                expected: reference_date,
                got: foreign.reference_date(),
            });
        }
        if !spot.is_finite() || spot <= 0.0 {
            return Err(CurveError::invalid_curve(format!("FX spot must be positive, got {spot}")));
        }

        let (forwards, last_node) = match &basis {
            FxBasis::Flat { spread } => {
                if !spread.is_finite() {
                    return Err(CurveError::invalid_curve("FX basis spread must be finite"));
                }
                (None, None)
            }
            FxBasis::Forwards(nodes) => {
                let mut xs = vec![0.0];
                let mut ys = vec![spot];
                for node in nodes {
                    if node.date <= reference_date {
                        return Err(CurveError::invalid_pillar(format!(
                            "FX forward node {} is not after reference date {reference_date}",
                            node.date
                        )));
                    }
                    if !node.forward.is_finite() || node.forward <= 0.0 {
                        return Err(CurveError::invalid_pillar(format!(
                            "FX forward at {} must be positive, got {}",
                            node.date, node.forward
                        )));
                    }
                    xs.push(curve_time(reference_date, node.date));
                    ys.push(node.forward);
                }
                let last = nodes.last().copied().ok_or_else(|| {
                    CurveError::invalid_curve("at least one FX forward node is required")
                })?;
                (Some(LinearInterpolator::new(xs, ys)?), Some(last))
            }
        };

        Ok(Self {
            reference_date,
            domestic,
            foreign,
            spot,
            basis,
            forwards,
            last_node,
            allow_extrapolation: true,
        })
    }

    /// Enables or disables flat-basis extrapolation past the last forward node.
    pub fn with_extrapolation(mut self, allow: bool) -> Self {
        self.allow_extrapolation = allow;
        self
    }

    /// FX spot.
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// The basis specification.
    pub fn basis(&self) -> &FxBasis {
        &self.basis
    }

    /// Outright FX forward for delivery at `date`.
    pub fn fx_forward(&self, date: Date) -> CurveResult<f64> {
        if date == self.reference_date {
            return Ok(self.spot);
        }
        let df = self.discount_factor(date)?;
        Ok(self.spot * df / self.domestic.discount_factor(date)?)
    }

    /// Continuously-compounded spread of this curve over the foreign curve.
    pub fn implied_basis(&self, date: Date) -> CurveResult<f64> {
        if let FxBasis::Flat { spread } = self.basis {
            self.check_date(date)?;
            return Ok(spread);
        }
        let date = if date == self.reference_date {
            date.add_days(1)
        } else {
            date
        };
        let df = self.discount_factor(date)?;
        let df_foreign = self.foreign.discount_factor(date)?;
        Ok(-(df / df_foreign).ln() / curve_time(self.reference_date, date))
    }

    fn check_date(&self, date: Date) -> CurveResult<()> {
        if date < self.reference_date {
            return Err(CurveError::date_out_of_range(
                date,
                self.reference_date,
                self.max_date(),
            ));
        }
        Ok(())
    }
}

impl Curve for CurrencyCurve {
    fn reference_date(&self) -> Date {
        self.reference_date
    }

    fn discount_factor(&self, date: Date) -> CurveResult<f64> {
        self.check_date(date)?;
        if date == self.reference_date {
            return Ok(1.0);
        }
        let t = curve_time(self.reference_date, date);

        match (&self.basis, &self.forwards, self.last_node) {
            (FxBasis::Flat { spread }, _, _) => {
                Ok(self.foreign.discount_factor(date)? * (-spread * t).exp())
            }
            (FxBasis::Forwards(_), Some(forwards), Some(last)) => {
                if date <= last.date {
                    let forward = forwards.interpolate(t)?;
                    return Ok(self.domestic.discount_factor(date)? * forward / self.spot);
                }
                if !self.allow_extrapolation {
                    return Err(CurveError::date_out_of_range(
                        date,
                        self.reference_date,
                        last.date,
                    ));
                }
                let basis = self.implied_basis(last.date)?;
                Ok(self.foreign.discount_factor(date)? * (-basis * t).exp())
            }
            (FxBasis::Forwards(_), _, _) => Err(CurveError::invalid_curve(
                "FX forward nodes were not prepared",
            )),
        }
    }

    fn max_date(&self) -> Date {
        match self.last_node {
            Some(last) => last.date,
            None => self.domestic.max_date().min(self.foreign.max_date()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::FlatForwardCurve;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn parents() -> (Arc<dyn Curve>, Arc<dyn Curve>) {
        let r = d(2025, 1, 15);
        (
            Arc::new(FlatForwardCurve::new(r, 0.12)),
            Arc::new(FlatForwardCurve::new(r, 0.04)),
        )
    }

    #[test]
    fn test_flat_basis_discounting_and_parity() {
        let (dom, fgn) = parents();
        let curve = CurrencyCurve::new(dom, fgn, 5.0, FxBasis::Flat { spread: 0.01 }).unwrap();
        let one_y = d(2026, 1, 15);

        assert_relative_eq!(curve.discount_factor(one_y).unwrap(), (-0.05f64).exp(), epsilon = 1e-15);
        // F = S · DF_ccy / DF_dom = 5 · e^{-0.05} / e^{-0.12}
        assert_relative_eq!(curve.fx_forward(one_y).unwrap(), 5.0 * 0.07f64.exp(), epsilon = 1e-12);
        assert_relative_eq!(curve.implied_basis(one_y).unwrap(), 0.01);
        assert_eq!(curve.discount_factor(d(2025, 1, 15)).unwrap(), 1.0);
    }

    #[test]
    fn test_forward_nodes_reprice_and_extrapolate() {
        let (dom, fgn) = parents();
        let one_y = d(2026, 1, 15);
        let forward = 5.0 * 0.07f64.exp();
        let curve = CurrencyCurve::new(
            dom.clone(),
            fgn,
            5.0,
            FxBasis::Forwards(vec![FxForwardNode { date: one_y, forward }]),
        )
        .unwrap();

        assert_relative_eq!(curve.fx_forward(one_y).unwrap(), forward, epsilon = 1e-12);
        assert_relative_eq!(curve.implied_basis(one_y).unwrap(), 0.01, epsilon = 1e-12);

        let two_y = d(2027, 1, 15);
        let expected = (-0.04f64 * 2.0).exp() * (-0.01f64 * 2.0).exp();
        assert_relative_eq!(curve.discount_factor(two_y).unwrap(), expected, epsilon = 1e-12);

        let strict = curve.with_extrapolation(false);
        assert!(matches!(
            strict.discount_factor(two_y),
            Err(CurveError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_reference_date_mismatch() {
        let (dom, _) = parents();
        let other: Arc<dyn Curve> = Arc::new(FlatForwardCurve::new(d(2025, 1, 16), 0.04));
        assert!(matches!(
            CurrencyCurve::new(dom, other, 5.0, FxBasis::Flat { spread: 0.0 }),
            Err(CurveError::ReferenceDateMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_nodes() {
        let (dom, fgn) = parents();
        assert!(CurrencyCurve::new(dom.clone(), fgn.clone(), 5.0, FxBasis::Forwards(vec![])).is_err());
        assert!(CurrencyCurve::new(
            dom,
            fgn,
            5.0,
            FxBasis::Forwards(vec![FxForwardNode { date: d(2025, 1, 15), forward: 5.1 }])
        )
        .is_err());
    }
}
