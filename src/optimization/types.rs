//! optimization::types — shared numeric aliases and solver defaults.
//!
//! Centralize the core numeric types used by the box-constrained solver so
//! the rest of the optimization code stays agnostic to `ndarray` and can
//! evolve if the backend changes.
use ndarray::Array1;

/// Solution vector `x` for box-constrained minimization.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical point type
/// throughout the optimizer.
pub type Point = Array1<f64>;

/// Gradient vector `∇f(x)`.
///
/// Alias for `ndarray::Array1<f64>`, matching the shape of `Point`.
pub type Grad = Array1<f64>;

/// Scalar objective value.
pub type Cost = f64;

/// Default non-monotone line-search window (number of recent objective
/// values an accepted trial is compared against).
pub const DEFAULT_MEMORY: usize = 10;

/// Default sufficient-decrease parameter for the non-monotone Armijo test.
pub const DEFAULT_GAMMA: f64 = 1e-4;

/// Default lower safeguard for quadratic-interpolation backtracking.
pub const DEFAULT_SIGMA1: f64 = 0.1;

/// Default upper safeguard for quadratic-interpolation backtracking.
pub const DEFAULT_SIGMA2: f64 = 0.9;

/// Default clamp range for the Barzilai–Borwein spectral step.
pub const DEFAULT_STEP_MIN: f64 = 1e-30;
pub const DEFAULT_STEP_MAX: f64 = 1e30;

/// Default projected-gradient sup-norm tolerance.
pub const DEFAULT_TOL: f64 = 1e-4;

/// Default iteration cap.
pub const DEFAULT_MAX_ITER: usize = 100_000;

/// Hard cap on backtracking steps inside one line search. A descent
/// direction shrinks past machine precision long before this.
pub const MAX_BACKTRACKS: usize = 100;
