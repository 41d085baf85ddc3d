//! Synthetic multi-exponential test signals.
//!
//! Purpose
//! -------
//! Generate clean decay curves `y(t) = Σ_k a_k·exp(−t/τ_k)` on a uniform
//! time grid, paired with a unit-variance series, for exercising the full
//! inversion pipeline without external data files.
//!
//! Conventions
//! -----------
//! - Deterministic: no randomness, so fixtures built from the same
//!   configuration are bitwise identical across runs.
//! - The reported variance is `1.0` everywhere, which makes the residual
//!   term an unweighted sum of squares. Callers modeling heteroscedastic
//!   noise supply their own variance series instead.
use crate::inversion::errors::{ContinError, ContinResult};
use ndarray::Array1;

/// Build `(t, y, variance)` for a sum of decaying exponentials sampled at
/// `n` uniform points on `[t0, t_end]`.
///
/// # Errors
/// [`ContinError::InvalidSyntheticConfig`] on an empty mode list, a
/// length mismatch between amplitudes and time constants, fewer than two
/// sample points, a non-finite or inverted time range, or a
/// non-positive/non-finite time constant.
pub fn multi_exponential_series(
    amplitudes: &[f64], time_constants: &[f64], n: usize, t0: f64, t_end: f64,
) -> ContinResult<(Array1<f64>, Array1<f64>, Array1<f64>)> {
    if amplitudes.is_empty() {
        return Err(ContinError::InvalidSyntheticConfig { reason: "no modes given" });
    }
    if time_constants.len() != amplitudes.len() {
        return Err(ContinError::InvalidSyntheticConfig {
            reason: "amplitudes and time constants differ in length",
        });
    }
    if n < 2 {
        return Err(ContinError::InvalidSyntheticConfig {
            reason: "at least two sample points are required",
        });
    }
    if !t0.is_finite() || !t_end.is_finite() || t0 >= t_end {
        return Err(ContinError::InvalidSyntheticConfig {
            reason: "time range must be finite with t0 < t_end",
        });
    }
    if amplitudes.iter().any(|a| !a.is_finite()) {
        return Err(ContinError::InvalidSyntheticConfig { reason: "non-finite amplitude" });
    }
    if time_constants.iter().any(|tau| !tau.is_finite() || *tau <= 0.0) {
        return Err(ContinError::InvalidSyntheticConfig {
            reason: "time constants must be finite and > 0",
        });
    }

    let dt = (t_end - t0) / (n - 1) as f64;
    let t = Array1::from_shape_fn(n, |i| t0 + i as f64 * dt);
    let y = t.mapv(|ti| {
        amplitudes
            .iter()
            .zip(time_constants.iter())
            .map(|(a, tau)| a * (-ti / tau).exp())
            .sum::<f64>()
    });
    let variance = Array1::ones(n);
    Ok((t, y, variance))
}
