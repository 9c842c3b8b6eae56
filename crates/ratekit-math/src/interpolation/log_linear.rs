//! Log-linear interpolation.

use crate::error::{MathError, MathResult};
use crate::interpolation::{find_segment, validate, Interpolator};

/// Linear interpolation of `ln(y)`; requires strictly positive ordinates.
///
/// On discount factors this gives piecewise-flat continuously-compounded
/// forward rates.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLinearInterpolator {
    xs: Vec<f64>,
    log_ys: Vec<f64>,
    allow_extrapolation: bool,
}

impl LogLinearInterpolator {
    /// Creates a new log-linear interpolator.
    ///
    /// # Errors
    ///
    /// As [`LinearInterpolator::new`](super::LinearInterpolator::new), plus
    /// any ordinate that is not strictly positive.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate(&xs, &ys)?;
        if let Some(bad) = ys.iter().find(|y| **y <= 0.0) {
            return Err(MathError::invalid_input(format!(
                "log-linear interpolation requires positive values, got {bad}"
            )));
        }
        Ok(Self {
            log_ys: ys.iter().map(|y| y.ln()).collect(),
            xs,
            allow_extrapolation: false,
        })
    }

    /// Enables extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Interpolated `ln(y)`.
    pub fn interpolate_log(&self, x: f64) -> MathResult<f64> {
        if !self.allow_extrapolation && !self.in_range(x) {
            return Err(MathError::ExtrapolationNotAllowed {
                x,
                min: self.min_x(),
                max: self.max_x(),
            });
        }
        let i = find_segment(&self.xs, x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (l0, l1) = (self.log_ys[i], self.log_ys[i + 1]);
        Ok(l0 + (x - x0) / (x1 - x0) * (l1 - l0))
    }
}

impl Interpolator for LogLinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        self.interpolate_log(x).map(f64::exp)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        let y = self.interpolate(x)?;
        let i = find_segment(&self.xs, x);
        let slope = (self.log_ys[i + 1] - self.log_ys[i]) / (self.xs[i + 1] - self.xs[i]);
        Ok(y * slope)
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_forward_between_discount_factors() {
        // DF(1) = e^-0.03, DF(2) = e^-0.07 => forward 4% on [1, 2]
        let interp =
            LogLinearInterpolator::new(vec![0.0, 1.0, 2.0], vec![1.0, (-0.03f64).exp(), (-0.07f64).exp()])
                .unwrap();
        let df = interp.interpolate(1.5).unwrap();
        assert_relative_eq!(df, (-0.05f64).exp(), epsilon = 1e-14);
        let fwd = -interp.derivative(1.5).unwrap() / df;
        assert_relative_eq!(fwd, 0.04, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(LogLinearInterpolator::new(vec![0.0, 1.0], vec![1.0, 0.0]).is_err());
    }
}
