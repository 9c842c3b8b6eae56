//! Bracket search for unbounded problems.

use crate::error::{MathError, MathResult};

/// Widens `[lo, hi]` geometrically until `f` changes sign.
///
/// Each round moves the endpoint with the smaller `|f|` outward by
/// `growth` times the current width. Returns the bracket and the objective
/// values at its ends.
///
/// ```rust
/// use ratekit_math::solvers::expand_bracket;
///
/// let (lo, hi) = expand_bracket(|x| x - 10.0, 0.0, 1.0, 1.6, 50).unwrap();
/// assert!(lo <= 10.0 && hi >= 10.0);
/// ```
pub fn expand_bracket<F>(
    f: F,
    lo: f64,
    hi: f64,
    growth: f64,
    max_rounds: u32,
) -> MathResult<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    if lo.is_nan() || hi.is_nan() || hi <= lo || growth <= 0.0 {
        return Err(MathError::invalid_input(format!(
            "cannot expand bracket [{lo}, {hi}] by {growth}"
        )));
    }

    let (mut lo, mut hi) = (lo, hi);
    let mut f_lo = f(lo);
    let mut f_hi = f(hi);

    for _ in 0..max_rounds {
        if f_lo.is_finite() && f_hi.is_finite() && f_lo * f_hi <= 0.0 {
            return Ok((lo, hi));
        }
        let width = hi - lo;
        if !f_hi.is_finite() || (f_lo.is_finite() && f_lo.abs() < f_hi.abs()) {
            lo -= growth * width;
            f_lo = f(lo);
        } else {
            hi += growth * width;
            f_hi = f(hi);
        }
    }

    if f_lo.is_finite() && f_hi.is_finite() && f_lo * f_hi <= 0.0 {
        return Ok((lo, hi));
    }
    Err(MathError::InvalidBracket {
        a: lo,
        b: hi,
        fa: f_lo,
        fb: f_hi,
    })
}
