//! Regularized spectral inversion: recover a non-negative distribution
//! from noisy integral-transformed samples.
//!
//! Purpose
//! -------
//! Implement the Contin problem end to end: discretize the continuous
//! model `y(t) = b + ∫ K(t, τ) s(τ) dτ` on a uniform τ-grid, evaluate the
//! smoothness-regularized least-squares objective, and drive the
//! box-constrained solver in [`crate::optimization`] to a non-negative
//! spectrum plus additive background.
//!
//! Key behaviors
//! -------------
//! - [`problem`] validates raw observations once and freezes them, with
//!   the kernel matrix, trapezoidal quadrature, and inverse-variance
//!   weights precomputed, into an immutable [`ProblemInstance`].
//! - [`objective`] evaluates the regularized objective, its analytic
//!   gradient, and a matrix-free Hessian-vector product.
//! - [`driver`] assembles bounds and a deterministic seed, runs SPG, and
//!   unpacks the fit; [`driver::contin`] is the one-call entry point.
//! - [`synthetic`] generates clean multi-exponential fixtures and
//!   [`export`] writes two-column text files for plotting.
//!
//! Invariants & assumptions
//! ------------------------
//! - A solution vector always has length `m + 1`: spectral weights first,
//!   background last.
//! - Validation is fail-fast and happens at construction; evaluation and
//!   solving assume validated inputs and only re-check dimensions.
//!
//! Downstream usage
//! ----------------
//! Most callers need only the [`prelude`]:
//!
//! ```ignore
//! use contin::inversion::prelude::*;
//!
//! let (t, y, var) = multi_exponential_series(&[1.0, 2.0], &[0.4, 1.6], 200, 0.0, 4.0)?;
//! let fit = contin(&t, &y, &var, 0.1, 4.0, 10,
//!                  KernelKind::MultiExponential, 0.01, &ContinOptions::default())?;
//! save_xy("spectrum.dat", &fit.tau, &fit.spectrum)?;
//! ```
pub mod driver;
pub mod errors;
pub mod export;
pub mod kernel;
pub mod objective;
pub mod problem;
pub mod synthetic;

pub use driver::{contin, invert, ContinFit, ContinOptions, ContinStatus};
pub use errors::{ContinError, ContinResult};
pub use export::{save_xy, write_xy, ExportError};
pub use kernel::KernelKind;
pub use objective::ContinObjective;
pub use problem::ProblemInstance;
pub use synthetic::multi_exponential_series;

/// Everything a typical inversion needs in one import.
pub mod prelude {
    pub use super::driver::{contin, invert, ContinFit, ContinOptions, ContinStatus};
    pub use super::errors::{ContinError, ContinResult};
    pub use super::export::{save_xy, write_xy};
    pub use super::kernel::KernelKind;
    pub use super::objective::ContinObjective;
    pub use super::problem::ProblemInstance;
    pub use super::synthetic::multi_exponential_series;
}
