//! Errors for the Contin inversion layer (observation validation, grid and
//! kernel configuration checks, and optimizer failures).
//!
//! This module defines [`ContinError`], the error type used across problem
//! construction and the inversion driver, plus the [`ContinResult`] alias.
//!
//! ## Conventions
//! - **Indices are 0-based.**
//! - Variances must be **strictly positive and finite** (they become
//!   inverse-square weights).
//! - Configuration problems are detected at build time, before any
//!   optimizer work; optimizer failures are normalized through the
//!   [`ContinError::Optimization`] bridge.
//! - Reaching the iteration cap is **not** an error; it is reported as a
//!   status on the fit result.
use crate::optimization::errors::OptError;

/// Crate-wide result alias for inversion operations that may produce
/// [`ContinError`].
pub type ContinResult<T> = Result<T, ContinError>;

/// Unified error type for Contin inversion.
///
/// Covers observation/data validation, τ-grid and regularization
/// configuration, kernel selection, and failures surfaced by the
/// box-constrained solver.
#[derive(Debug, Clone, PartialEq)]
pub enum ContinError {
    // ---- Observation validation ----
    /// Observation series is empty.
    EmptyObservations,

    /// Companion series length does not match the time axis.
    ObservationLengthMismatch { series: &'static str, expected: usize, found: usize },

    /// An observation element is NaN/±inf.
    NonFiniteSample { series: &'static str, index: usize, value: f64 },

    /// A variance is ≤ 0 (weights are inverse variances).
    NonPositiveVariance { index: usize, value: f64 },

    // ---- Grid / regularization configuration ----
    /// Fewer than three grid points cannot carry the curvature penalty.
    GridTooSmall { m: usize },

    /// τ-range endpoints are non-finite or ordered `tau1 <= tau0`.
    InvalidTauRange { tau0: f64, tau1: f64 },

    /// Regularization strength must be finite and non-negative.
    InvalidAlpha { value: f64 },

    // ---- Kernel selection ----
    /// Unknown kernel name.
    InvalidKernelName { name: String, reason: &'static str },

    // ---- Driver configuration ----
    /// Spectrum upper bound must be finite and strictly positive.
    InvalidWeightUpper { value: f64 },

    /// Background bounds are NaN or ordered `lower > upper`.
    InvalidBackgroundBounds { lower: f64, upper: f64 },

    // ---- Synthetic data ----
    /// Malformed synthetic-series configuration.
    InvalidSyntheticConfig { reason: &'static str },

    // ---- Optimizer ----
    /// Failure surfaced by the box-constrained solver (malformed box,
    /// numerical instability, line-search breakdown).
    Optimization(OptError),
}

impl std::error::Error for ContinError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContinError::Optimization(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Observation validation ----
            ContinError::EmptyObservations => {
                write!(f, "Observation series is empty")
            }
            ContinError::ObservationLengthMismatch { series, expected, found } => {
                write!(
                    f,
                    "Observation length mismatch: {series} has {found} entries, expected {expected}"
                )
            }
            ContinError::NonFiniteSample { series, index, value } => {
                write!(f, "Non-finite {series} sample at index {index}: {value}")
            }
            ContinError::NonPositiveVariance { index, value } => {
                write!(f, "Non-positive variance at index {index}: {value}")
            }

            // ---- Grid / regularization configuration ----
            ContinError::GridTooSmall { m } => {
                write!(f, "Grid needs at least 3 points, got {m}")
            }
            ContinError::InvalidTauRange { tau0, tau1 } => {
                write!(f, "Invalid tau range [{tau0}, {tau1}]: endpoints must be finite with tau0 < tau1")
            }
            ContinError::InvalidAlpha { value } => {
                write!(f, "Invalid regularization strength {value}: must be finite and >= 0")
            }

            // ---- Kernel selection ----
            ContinError::InvalidKernelName { name, reason } => {
                write!(f, "Invalid kernel '{name}': {reason}")
            }

            // ---- Driver configuration ----
            ContinError::InvalidWeightUpper { value } => {
                write!(f, "Invalid spectrum upper bound {value}: must be finite and > 0")
            }
            ContinError::InvalidBackgroundBounds { lower, upper } => {
                write!(f, "Invalid background bounds [{lower}, {upper}]")
            }

            // ---- Synthetic data ----
            ContinError::InvalidSyntheticConfig { reason } => {
                write!(f, "Invalid synthetic series configuration: {reason}")
            }

            // ---- Optimizer ----
            ContinError::Optimization(err) => {
                write!(f, "Optimization failed: {err}")
            }
        }
    }
}

impl From<OptError> for ContinError {
    fn from(err: OptError) -> Self {
        ContinError::Optimization(err)
    }
}
