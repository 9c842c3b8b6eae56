//! Interpolation over strictly increasing abscissae.
//!
//! - [`LinearInterpolator`]: piecewise linear, used for zero rates, zero
//!   spreads and FX forward nodes
//! - [`LogLinearInterpolator`]: linear in `ln(y)`, used for discount factors
//!   (piecewise constant continuously-compounded forwards)

mod linear;
mod log_linear;

pub use linear::LinearInterpolator;
pub use log_linear::LogLinearInterpolator;

use crate::error::{MathError, MathResult};

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Smallest abscissa.
    fn min_x(&self) -> f64;

    /// Largest abscissa.
    fn max_x(&self) -> f64;

    /// Checks if x is within the data range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// Validates interpolation input: at least two points, equal lengths,
/// finite values and strictly increasing xs.
pub(crate) fn validate(xs: &[f64], ys: &[f64]) -> MathResult<()> {
    if xs.len() < 2 {
        return Err(MathError::insufficient_data(2, xs.len()));
    }
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("non-finite interpolation input"));
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::invalid_input("x values must be strictly increasing"));
    }
    Ok(())
}

/// Index `i` such that `xs[i] <= x < xs[i + 1]`, clamped to the end segments.
pub(crate) fn find_segment(xs: &[f64], x: f64) -> usize {
    let upper = xs.partition_point(|node| *node <= x);
    upper.saturating_sub(1).min(xs.len() - 2)
}
