//! Regularized least-squares objective for the Contin inversion.
//!
//! Purpose
//! -------
//! Evaluate the smoothness-regularized, variance-weighted residual
//! objective over a candidate solution `x = (g, b)` — spectral weights
//! plus additive background — together with its analytic gradient and a
//! matrix-free Hessian-vector product, against a fixed
//! [`ProblemInstance`].
//!
//! Key behaviors
//! -------------
//! - Prediction: `z_i = b + Σ_j c_j·K[i][j]·g_j` (quadrature-weighted
//!   kernel application plus background).
//! - Objective: `f(x) = Σ_i w_i (y_i − z_i)² + α² Σ_j (D²g_j)²` — the
//!   curvature penalty grows with α, favoring smoother spectra.
//! - Gradient: derived analytically; the regularizer contributes the
//!   discrete fourth difference, obtained by applying the second-difference
//!   operator twice.
//! - Hessian-vector product: `f` is quadratic in `x`, so `H` is constant
//!   and applied without ever being formed — `2·CᵀWC·v` for the residual
//!   block (`C = [diag(c)·K | 1]`) plus `2α²·(D²)ᵀD²·v_g` for the
//!   regularizer — keeping the per-call cost O(nm).
//! - Every evaluation is validated: a non-finite value, gradient entry,
//!   or product entry surfaces as the matching
//!   [`OptError`](crate::optimization::errors::OptError) variant instead
//!   of propagating silently.
//!
//! Invariants & assumptions
//! ------------------------
//! - The solution vector has length `m + 1`: `g = x[0..m]`, `b = x[m]`.
//! - The discrete second difference uses the one-sided boundary
//!   convention `D²g_0 = −2g_0 + g_1` and `D²g_{m−1} = g_{m−2} − 2g_{m−1}`.
//!   This exact convention is part of the numerical contract — changing
//!   it changes recovered spectra at the grid edges.
//! - The borrowed [`ProblemInstance`] is immutable; all three evaluations
//!   are pure functions of `x`.
//!
//! Testing notes
//! -------------
//! - The gradient is checked against one-sided finite differences over a
//!   grid of step sizes, and against the central-difference helper; the
//!   Hessian-vector product against the finite-difference directional
//!   derivative of the gradient. This is the most error-prone code in the
//!   crate and is tested accordingly.
use crate::inversion::problem::ProblemInstance;
use crate::optimization::{
    errors::OptResult,
    objective::BoxObjective,
    types::{Cost, Grad, Point},
    validation::{validate_grad, validate_hessian_vec, validate_point, validate_value},
};
use ndarray::{s, Array1, ArrayView1};

/// The Contin objective over a borrowed, immutable problem instance.
///
/// Implements [`BoxObjective`], so it plugs directly into the SPG solver
/// and into the finite-difference check helpers.
#[derive(Debug, Clone, Copy)]
pub struct ContinObjective<'a> {
    problem: &'a ProblemInstance,
}

impl<'a> ContinObjective<'a> {
    pub fn new(problem: &'a ProblemInstance) -> Self {
        Self { problem }
    }

    /// Predicted signal `z` for the candidate `(g, b)`.
    fn predictions(&self, g: &ArrayView1<'_, f64>, b: f64) -> Array1<f64> {
        let cg = &self.problem.quadrature * g;
        self.problem.kernel.dot(&cg) + b
    }
}

/// Discrete second derivative with one-sided boundary handling:
/// interior `g[j−1] − 2g[j] + g[j+1]`, ends `−2g[0] + g[1]` and
/// `g[m−2] − 2g[m−1]`. Not zero-padded and not reflecting; reproduced
/// exactly for numerical equivalence with the reference behavior.
fn second_difference(g: &ArrayView1<'_, f64>) -> Array1<f64> {
    let m = g.len();
    let mut out = Array1::zeros(m);
    for j in 1..m - 1 {
        out[j] = g[j - 1] - 2.0 * g[j] + g[j + 1];
    }
    out[0] = -2.0 * g[0] + g[1];
    out[m - 1] = g[m - 2] - 2.0 * g[m - 1];
    out
}

impl BoxObjective for ContinObjective<'_> {
    /// `f(x) = Σ_i w_i (y_i − z_i)² + α² Σ_j (D²g_j)²`.
    ///
    /// # Errors
    /// - [`OptError::PointDimMismatch`](crate::optimization::errors::OptError::PointDimMismatch)
    ///   if `x.len() != m + 1`.
    /// - [`OptError::NonFiniteCost`](crate::optimization::errors::OptError::NonFiniteCost)
    ///   on numerical overflow.
    fn value(&self, x: &Point) -> OptResult<Cost> {
        let p = self.problem;
        let m = p.m();
        validate_point(x, p.dim())?;

        let g = x.slice(s![..m]);
        let z = self.predictions(&g, x[m]);
        let residual = &p.y - &z;
        let fit = (&p.weights * &residual).dot(&residual);

        let d2g = second_difference(&g);
        let f = fit + p.alpha * p.alpha * d2g.dot(&d2g);
        validate_value(f)?;
        Ok(f)
    }

    /// Analytic gradient:
    /// `∂f/∂g_j = 2 Σ_i w_i (z_i − y_i) c_j K[i][j] + 2α² (D⁴g)_j`,
    /// `∂f/∂b = 2 Σ_i w_i (z_i − y_i)`.
    ///
    /// # Errors
    /// Same dimension check as `value`; non-finite entries surface as
    /// [`OptError::InvalidGradient`](crate::optimization::errors::OptError::InvalidGradient).
    fn gradient(&self, x: &Point) -> OptResult<Grad> {
        let p = self.problem;
        let m = p.m();
        validate_point(x, p.dim())?;

        let g = x.slice(s![..m]);
        let z = self.predictions(&g, x[m]);
        let weighted_residual = &p.weights * &(&z - &p.y);

        // Fourth difference: the second-difference operator applied twice.
        let d2g = second_difference(&g);
        let d4g = second_difference(&d2g.view());

        let alpha2 = p.alpha * p.alpha;
        let fit_part = &p.quadrature * &p.kernel.t().dot(&weighted_residual);

        let mut grad = Array1::zeros(p.dim());
        grad.slice_mut(s![..m])
            .assign(&(2.0 * &fit_part + 2.0 * alpha2 * &d4g));
        grad[m] = 2.0 * weighted_residual.sum();

        validate_grad(&grad, p.dim())?;
        Ok(grad)
    }

    /// Matrix-free `H·v`. `f` is quadratic, so `H` does not depend on `x`;
    /// the point argument is only dimension-checked.
    ///
    /// # Errors
    /// Dimension mismatches on `x` or `v`; non-finite entries surface as
    /// [`OptError::InvalidHessianVec`](crate::optimization::errors::OptError::InvalidHessianVec).
    fn hessian_vec(&self, x: &Point, v: &Point) -> OptResult<Grad> {
        let p = self.problem;
        let m = p.m();
        validate_point(x, p.dim())?;
        validate_point(v, p.dim())?;

        let v_g = v.slice(s![..m]);
        // u = C·v with C = [diag(c)·K | 1]: the linearized prediction of v.
        let u = self.predictions(&v_g, v[m]);
        let wu = &p.weights * &u;

        let d2v = second_difference(&v_g);
        let d4v = second_difference(&d2v.view());

        let alpha2 = p.alpha * p.alpha;
        let fit_part = &p.quadrature * &p.kernel.t().dot(&wu);

        let mut hv = Array1::zeros(p.dim());
        hv.slice_mut(s![..m])
            .assign(&(2.0 * &fit_part + 2.0 * alpha2 * &d4v));
        hv[m] = 2.0 * wu.sum();

        validate_hessian_vec(&hv, p.dim())?;
        Ok(hv)
    }

    fn check(&self, x: &Point) -> OptResult<()> {
        validate_point(x, self.problem.dim())
    }
}
