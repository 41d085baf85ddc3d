//! contin — regularized inversion of noisy integral-transformed signals.
//!
//! Purpose
//! -------
//! Serve as the crate root for the Contin engine: recover a non-negative
//! spectral distribution `s(τ)` and an additive background `b` from noisy
//! samples `y(t) = b + ∫ K(t, τ) s(τ) dτ`, using Tikhonov curvature
//! regularization and a box-constrained spectral projected-gradient
//! solver.
//!
//! Key behaviors
//! -------------
//! - Re-export the two core modules as the public crate surface:
//!   [`inversion`] (problem assembly, objective, driver, fixtures,
//!   export) and [`optimization`] (bounds, SPG solver, finite-difference
//!   checks).
//! - Keep the layers decoupled: [`optimization`] knows nothing about
//!   kernels or spectra — it minimizes any
//!   [`BoxObjective`](optimization::objective::BoxObjective) over a box.
//!
//! Conventions
//! -----------
//! - All vectors are `ndarray::Array1<f64>`; solution vectors stack the
//!   `m` spectral weights first and the background last.
//! - Constructors validate fail-fast and return rich error enums; nothing
//!   panics on malformed input.
//!
//! Downstream usage
//! ----------------
//! ```ignore
//! use contin::inversion::prelude::*;
//!
//! let (t, y, var) = multi_exponential_series(&[1.0, 2.0], &[0.4, 1.6], 200, 0.0, 4.0)?;
//! let fit = contin(&t, &y, &var, 0.1, 4.0, 10,
//!                  KernelKind::MultiExponential, 0.01, &ContinOptions::default())?;
//! ```
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules;
//!   end-to-end spectrum recovery lives in the integration tests.

pub mod inversion;
pub mod optimization;

pub use inversion::{
    contin, invert, ContinError, ContinFit, ContinOptions, ContinResult, ContinStatus, KernelKind,
    ProblemInstance,
};
pub use optimization::{bounds::Bounds, spg::SpgOptions};
