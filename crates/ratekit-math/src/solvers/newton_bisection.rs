//! Safeguarded Newton iteration inside a bracket.

use tracing::debug;

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Bounded Newton-bisection root finder.
///
/// Requires `f(lo)` and `f(hi)` of opposite sign (or one of them zero).
/// Each iteration takes a Newton step from the current iterate when it
/// lands strictly inside the current bracket, and bisects otherwise. The
/// bracket shrinks around the sign change after every evaluation.
///
/// Converged when `|f(x)| < tolerance`. A non-finite objective value is
/// reported as `InvalidInput`. Running out of iterations, or a bracket
/// that collapses to adjacent floats without a root, is `ConvergenceFailed`
/// with the iterations actually taken and the last iterate.
///
/// ```rust
/// use ratekit_math::solvers::{newton_bisection, SolverConfig};
///
/// let r = newton_bisection(|x| x * x - 2.0, |x| 2.0 * x, 1.0, (0.0, 2.0), &SolverConfig::default())
///     .unwrap();
/// assert!((r.root - 2f64.sqrt()).abs() < 1e-10);
/// ```
pub fn newton_bisection<F, D>(
    f: F,
    df: D,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    let (a, b) = if bounds.0 <= bounds.1 {
        bounds
    } else {
        (bounds.1, bounds.0)
    };

    let fa = finite(a, f(a))?;
    if fa.abs() < config.tolerance {
        return Ok(SolverResult {
            root: a,
            iterations: 0,
            residual: fa,
        });
    }
    let fb = finite(b, f(b))?;
    if fb.abs() < config.tolerance {
        return Ok(SolverResult {
            root: b,
            iterations: 0,
            residual: fb,
        });
    }
    if fa * fb > 0.0 {
        return Err(MathError::InvalidBracket { a, b, fa, fb });
    }

    // Orient so that f(neg) < 0 < f(pos).
    let (mut neg, mut pos) = if fa < 0.0 { (a, b) } else { (b, a) };

    let mut x = if initial_guess > a && initial_guess < b {
        initial_guess
    } else {
        0.5 * (a + b)
    };
    let mut fx = f64::NAN;
    let mut used = 0;

    for iteration in 1..=config.max_iterations {
        used = iteration;
        fx = finite(x, f(x))?;
        if fx.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        if fx < 0.0 {
            neg = x;
        } else {
            pos = x;
        }

        let lo = neg.min(pos);
        let hi = neg.max(pos);
        if hi - lo <= f64::EPSILON * x.abs().max(1.0) {
            break;
        }

        let slope = df(x);
        let newton = x - fx / slope;
        x = if slope.is_finite() && slope != 0.0 && newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };
    }

    debug!(
        last_iterate = x,
        residual = fx,
        iterations = used,
        "newton-bisection did not converge"
    );
    Err(MathError::convergence_failed(used, fx, x))
}

/// [`newton_bisection`] with a central finite-difference derivative.
pub fn newton_bisection_numerical<F>(
    f: F,
    initial_guess: f64,
    bounds: (f64, f64),
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    let df = |x: f64| {
        let h = 1e-6 * x.abs().max(1e-4);
        (f(x + h) - f(x - h)) / (2.0 * h)
    };
    newton_bisection(&f, df, initial_guess, bounds, config)
}

fn finite(x: f64, fx: f64) -> MathResult<f64> {
    if fx.is_finite() {
        Ok(fx)
    } else {
        Err(MathError::invalid_input(format!(
            "objective is not finite at {x}"
        )))
    }
}
