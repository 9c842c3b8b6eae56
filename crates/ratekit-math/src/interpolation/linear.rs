//! Linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{find_segment, validate, Interpolator};

/// Piecewise linear interpolation.
///
/// With extrapolation enabled, the end segments are extended.
///
/// ```rust
/// use ratekit_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 4.0]).unwrap();
/// assert_eq!(interp.interpolate(1.5).unwrap(), 2.5);
/// assert!(interp.interpolate(3.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    allow_extrapolation: bool,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Errors
    ///
    /// Fewer than two points, mismatched lengths, non-finite values or xs
    /// that are not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate(&xs, &ys)?;
        Ok(Self {
            xs,
            ys,
            allow_extrapolation: false,
        })
    }

    /// Enables extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// The abscissae.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// The ordinates.
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    fn check_range(&self, x: f64) -> MathResult<()> {
        if !self.allow_extrapolation && !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        Ok(())
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let i = find_segment(&self.xs, x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        Ok(y0 + (x - x0) / (x1 - x0) * (y1 - y0))
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        self.check_range(x)?;
        let i = find_segment(&self.xs, x);
        Ok((self.ys[i + 1] - self.ys[i]) / (self.xs[i + 1] - self.xs[i]))
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
