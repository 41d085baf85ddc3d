//! Problem discretization for the Contin inversion.
//!
//! Purpose
//! -------
//! Turn raw observations `(t, y, variance)` plus a τ-grid description and
//! kernel choice into a dense, validated, immutable problem instance: the
//! kernel matrix, trapezoidal quadrature weights, and inverse-variance
//! data weights the objective evaluator consumes.
//!
//! Key behaviors
//! -------------
//! - [`ProblemInstance::build`] validates every input before allocating
//!   anything derived, so configuration mistakes fail fast with a
//!   specific [`ContinError`] and no optimizer work is wasted.
//! - The τ-grid is a uniform subdivision of `[tau0, tau1]` with
//!   `m` points; quadrature weights follow the trapezoidal rule
//!   (`Δτ/2` at both endpoints, `Δτ` inside).
//! - Construction is deterministic: identical inputs produce identical
//!   instances, bit for bit.
//!
//! Invariants & assumptions
//! ------------------------
//! - `t`, `y`, `variance` are equal-length, non-empty, finite;
//!   `variance > 0` elementwise.
//! - `m >= 3` (the curvature penalty needs interior points) and
//!   `tau0 < tau1`, both finite; `alpha` finite and `>= 0`.
//! - After `build` returns, the instance is read-only; it may be shared
//!   across concurrent inversion runs, each with its own solver state.
//!
//! Conventions
//! -----------
//! - `n` is the number of observations, `m` the number of grid points;
//!   the kernel matrix is `n x m` with `kernel[[i, j]] = K(t_i, τ_j)`.
//! - Data weights are `w_i = 1 / variance_i` (inverse-square weights on
//!   the residual norm).
use crate::inversion::{
    errors::{ContinError, ContinResult},
    kernel::KernelKind,
};
use ndarray::{Array1, Array2};

/// Immutable, validated discretization of one inversion problem.
///
/// Fields are public and read-only by convention; nothing in this crate
/// mutates an instance after [`ProblemInstance::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance {
    /// Time axis of the observed data (length `n`).
    pub t: Array1<f64>,
    /// Observed values (length `n`).
    pub y: Array1<f64>,
    /// Uniform τ-grid (length `m`).
    pub tau: Array1<f64>,
    /// Kernel matrix, `kernel[[i, j]] = K(t_i, τ_j)` (`n x m`).
    pub kernel: Array2<f64>,
    /// Trapezoidal quadrature weights over the τ-grid (length `m`).
    pub quadrature: Array1<f64>,
    /// Inverse-variance data weights (length `n`).
    pub weights: Array1<f64>,
    /// Regularization strength α (enters the objective as α²).
    pub alpha: f64,
    /// Which kernel variant built the matrix.
    pub kind: KernelKind,
}

impl ProblemInstance {
    /// Build a validated problem instance.
    ///
    /// Parameters
    /// ----------
    /// - `t`, `y`, `variance`: observation triples; equal length, finite,
    ///   `variance > 0`.
    /// - `tau0`, `tau1`: τ-grid endpoints, finite with `tau0 < tau1`.
    /// - `m`: number of grid points, at least 3.
    /// - `kind`: kernel variant to discretize.
    /// - `alpha`: regularization strength, finite and non-negative.
    ///
    /// # Errors
    /// The first violated invariant, as the matching [`ContinError`]
    /// variant (`EmptyObservations`, `ObservationLengthMismatch`,
    /// `NonFiniteSample`, `NonPositiveVariance`, `GridTooSmall`,
    /// `InvalidTauRange`, `InvalidAlpha`).
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        t: &Array1<f64>, y: &Array1<f64>, variance: &Array1<f64>, tau0: f64, tau1: f64, m: usize,
        kind: KernelKind, alpha: f64,
    ) -> ContinResult<Self> {
        let n = t.len();
        if n == 0 {
            return Err(ContinError::EmptyObservations);
        }
        if y.len() != n {
            return Err(ContinError::ObservationLengthMismatch {
                series: "y",
                expected: n,
                found: y.len(),
            });
        }
        if variance.len() != n {
            return Err(ContinError::ObservationLengthMismatch {
                series: "variance",
                expected: n,
                found: variance.len(),
            });
        }
        validate_finite("t", t)?;
        validate_finite("y", y)?;
        for (index, &value) in variance.iter().enumerate() {
            if !value.is_finite() {
                return Err(ContinError::NonFiniteSample { series: "variance", index, value });
            }
            if value <= 0.0 {
                return Err(ContinError::NonPositiveVariance { index, value });
            }
        }
        if m < 3 {
            return Err(ContinError::GridTooSmall { m });
        }
        if !tau0.is_finite() || !tau1.is_finite() || tau1 <= tau0 {
            return Err(ContinError::InvalidTauRange { tau0, tau1 });
        }
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(ContinError::InvalidAlpha { value: alpha });
        }

        let dtau = (tau1 - tau0) / (m as f64 - 1.0);
        let tau = Array1::from_shape_fn(m, |j| tau0 + j as f64 * dtau);
        let kernel = Array2::from_shape_fn((n, m), |(i, j)| kind.evaluate(t[i], tau[j]));
        let quadrature =
            Array1::from_shape_fn(m, |j| if j == 0 || j == m - 1 { 0.5 * dtau } else { dtau });
        let weights = variance.mapv(|v| 1.0 / v);

        Ok(Self {
            t: t.clone(),
            y: y.clone(),
            tau,
            kernel,
            quadrature,
            weights,
            alpha,
            kind,
        })
    }

    /// Number of observations.
    pub fn n(&self) -> usize {
        self.y.len()
    }

    /// Number of τ-grid points.
    pub fn m(&self) -> usize {
        self.tau.len()
    }

    /// Dimension of the solution vector `(g, b)`: `m + 1`.
    pub fn dim(&self) -> usize {
        self.m() + 1
    }
}

fn validate_finite(series: &'static str, values: &Array1<f64>) -> ContinResult<()> {
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(ContinError::NonFiniteSample { series, index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Grid, quadrature, kernel-matrix, and weight values on small
    //   hand-checkable instances.
    // - Rejection of every malformed-configuration class with the specific
    //   error variant.
    //
    // They intentionally DO NOT cover:
    // - Objective evaluation on the instance (tested in `objective`).
    // -------------------------------------------------------------------------

    fn toy_observations() -> (Array1<f64>, Array1<f64>, Array1<f64>) {
        (array![0.0, 1.0, 2.0, 3.0], array![3.0, 1.5, 0.8, 0.4], array![1.0, 1.0, 4.0, 1.0])
    }

    #[test]
    fn build_produces_uniform_grid_and_trapezoid_weights() {
        let (t, y, var) = toy_observations();
        let p = ProblemInstance::build(&t, &y, &var, 0.5, 2.5, 5, KernelKind::MultiExponential, 0.1)
            .expect("build should succeed");

        assert_eq!((p.n(), p.m(), p.dim()), (4, 5, 6));
        let expected_tau = [0.5, 1.0, 1.5, 2.0, 2.5];
        for (got, want) in p.tau.iter().zip(expected_tau.iter()) {
            assert_abs_diff_eq!(*got, *want, epsilon = 1e-15);
        }
        // Trapezoidal rule: half weight at both endpoints.
        assert_abs_diff_eq!(p.quadrature[0], 0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(p.quadrature[2], 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(p.quadrature[4], 0.25, epsilon = 1e-15);
        // Quadrature weights integrate the constant 1 to the grid span.
        assert_abs_diff_eq!(p.quadrature.sum(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn build_fills_kernel_matrix_pointwise() {
        let (t, y, var) = toy_observations();
        let p = ProblemInstance::build(&t, &y, &var, 0.5, 2.5, 5, KernelKind::MultiExponential, 0.0)
            .expect("build should succeed");

        for i in 0..p.n() {
            for j in 0..p.m() {
                assert_abs_diff_eq!(
                    p.kernel[[i, j]],
                    (-t[i] / p.tau[j]).exp(),
                    epsilon = 1e-15
                );
            }
        }
    }

    #[test]
    fn build_inverts_variances_into_weights() {
        let (t, y, var) = toy_observations();
        let p = ProblemInstance::build(&t, &y, &var, 0.1, 4.0, 3, KernelKind::MultiLorentzian, 0.0)
            .expect("build should succeed");
        assert_abs_diff_eq!(p.weights[2], 0.25, epsilon = 1e-15);
    }

    #[test]
    fn build_is_deterministic() {
        let (t, y, var) = toy_observations();
        let a = ProblemInstance::build(&t, &y, &var, 0.1, 4.0, 7, KernelKind::MultiExponential, 0.3)
            .expect("build should succeed");
        let b = ProblemInstance::build(&t, &y, &var, 0.1, 4.0, 7, KernelKind::MultiExponential, 0.3)
            .expect("build should succeed");
        assert_eq!(a, b);
    }

    #[test]
    fn build_rejects_empty_and_mismatched_series() {
        let empty = Array1::<f64>::zeros(0);
        assert_eq!(
            ProblemInstance::build(
                &empty, &empty, &empty, 0.1, 4.0, 5, KernelKind::MultiExponential, 0.0
            ),
            Err(ContinError::EmptyObservations)
        );

        let (t, y, _) = toy_observations();
        let short_var = array![1.0, 1.0];
        assert!(matches!(
            ProblemInstance::build(
                &t, &y, &short_var, 0.1, 4.0, 5, KernelKind::MultiExponential, 0.0
            ),
            Err(ContinError::ObservationLengthMismatch { series: "variance", .. })
        ));
    }

    #[test]
    fn build_rejects_bad_variances() {
        let (t, y, _) = toy_observations();
        let var = array![1.0, 0.0, 1.0, 1.0];
        assert_eq!(
            ProblemInstance::build(&t, &y, &var, 0.1, 4.0, 5, KernelKind::MultiExponential, 0.0),
            Err(ContinError::NonPositiveVariance { index: 1, value: 0.0 })
        );
    }

    #[test]
    fn build_rejects_degenerate_grid() {
        let (t, y, var) = toy_observations();
        assert_eq!(
            ProblemInstance::build(&t, &y, &var, 0.1, 4.0, 2, KernelKind::MultiExponential, 0.0),
            Err(ContinError::GridTooSmall { m: 2 })
        );
        assert_eq!(
            ProblemInstance::build(&t, &y, &var, 4.0, 0.1, 5, KernelKind::MultiExponential, 0.0),
            Err(ContinError::InvalidTauRange { tau0: 4.0, tau1: 0.1 })
        );
    }

    #[test]
    fn build_rejects_negative_alpha() {
        let (t, y, var) = toy_observations();
        assert_eq!(
            ProblemInstance::build(&t, &y, &var, 0.1, 4.0, 5, KernelKind::MultiExponential, -0.5),
            Err(ContinError::InvalidAlpha { value: -0.5 })
        );
    }
}
