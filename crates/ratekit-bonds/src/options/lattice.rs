//! Recombining Ho-Lee short-rate lattice.
//!
//! At step `i` there are `i + 1` nodes. The short rate at node `j` is
//!
//! ```text
//! r(i, j) = θ(i) + σ √dt (2j - i)
//! ```
//!
//! with up and down moves of probability ½. The drift `θ(i)` is fitted
//! step by step with Arrow-Debreu prices so that a zero-coupon bond
//! maturing at any step reprices the curve exactly.

use ratekit_curves::Curve;

use crate::error::{BondError, BondResult};

/// Ho-Lee lattice calibrated to a discount curve.
#[derive(Debug, Clone)]
pub struct HoLeeLattice {
    dt: f64,
    sigma: f64,
    theta: Vec<f64>,
    discounts: Vec<f64>,
}

impl HoLeeLattice {
    /// Fits the lattice to `curve` over `horizon` years of curve time.
    ///
    /// # Errors
    ///
    /// `InvalidSpec` for a non-positive horizon, zero steps or a negative
    /// volatility; curve errors when the horizon is not covered.
    pub fn calibrate(curve: &dyn Curve, horizon: f64, steps: usize, sigma: f64) -> BondResult<Self> {
        if !(horizon.is_finite() && horizon > 0.0) || steps == 0 {
            return Err(BondError::invalid_spec(format!(
                "lattice needs a positive horizon and steps, got {horizon} years in {steps} steps"
            )));
        }
        if !(sigma.is_finite() && sigma >= 0.0) {
            return Err(BondError::invalid_spec(format!("volatility must be non-negative, got {sigma}")));
        }

        let dt = horizon / steps as f64;
        let discounts = (0..=steps)
            .map(|i| discount_at_time(curve, i as f64 * dt))
            .collect::<BondResult<Vec<_>>>()?;

        let dx = sigma * dt.sqrt();
        let mut theta = Vec::with_capacity(steps);
        let mut arrow_debreu = vec![1.0];
        for i in 0..steps {
            let sum: f64 = arrow_debreu
                .iter()
                .enumerate()
                .map(|(j, q)| q * (-dx * offset(i, j) * dt).exp())
                .sum();
            let theta_i = (sum / discounts[i + 1]).ln() / dt;
            theta.push(theta_i);

            let mut next = vec![0.0; i + 2];
            for (j, q) in arrow_debreu.iter().enumerate() {
                let carried = 0.5 * q * (-(theta_i + dx * offset(i, j)) * dt).exp();
                next[j] += carried;
                next[j + 1] += carried;
            }
            arrow_debreu = next;
        }

        Ok(Self {
            dt,
            sigma,
            theta,
            discounts,
        })
    }

    /// Number of steps.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.theta.len()
    }

    /// Step length in years.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Short-rate volatility.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Curve time of step `i`.
    #[must_use]
    pub fn time(&self, i: usize) -> f64 {
        i as f64 * self.dt
    }

    /// Curve discount factor to step `i`.
    #[must_use]
    pub fn curve_discount(&self, i: usize) -> f64 {
        self.discounts[i]
    }

    /// Short rate at node `(i, j)`, `i < steps`.
    #[must_use]
    pub fn rate(&self, i: usize, j: usize) -> f64 {
        self.theta[i] + self.sigma * self.dt.sqrt() * offset(i, j)
    }

    /// Step closest to curve time `t`.
    #[must_use]
    pub fn nearest_step(&self, t: f64) -> usize {
        let raw = (t / self.dt).round();
        if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(self.steps())
        }
    }

    /// Discounted expectation at step `i` of `next`, the node values at
    /// step `i + 1`.
    #[must_use]
    pub fn roll_back(&self, i: usize, next: &[f64]) -> Vec<f64> {
        (0..=i)
            .map(|j| {
                let df = (-self.rate(i, j) * self.dt).exp();
                df * 0.5 * (next[j] + next[j + 1])
            })
            .collect()
    }
}

fn offset(i: usize, j: usize) -> f64 {
    2.0 * j as f64 - i as f64
}

/// Discount factor at fractional curve time, log-linear between days.
fn discount_at_time(curve: &dyn Curve, t: f64) -> BondResult<f64> {
    let reference = curve.reference_date();
    let days = t * 365.0;
    let whole = days.floor();
    let weight = days - whole;
    let first = reference.add_days(whole as i64);
    let df0 = curve.discount_factor(first)?;
    if weight < 1e-12 {
        return Ok(df0);
    }
    let df1 = curve.discount_factor(first.add_days(1))?;
    Ok((df0.ln() * (1.0 - weight) + df1.ln() * weight).exp())
}
