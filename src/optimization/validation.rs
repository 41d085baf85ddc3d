//! Validation helpers for box-constrained optimization.
//!
//! This module centralizes common consistency checks used across the
//! solver interface:
//!
//! - **Tolerance checks**: [`verify_tol_grad`] ensures the stopping
//!   tolerance is finite and strictly positive.
//! - **Point validation**: [`validate_point`] enforces correct dimension
//!   and finite entries.
//! - **Gradient validation**: [`validate_grad`] does the same for
//!   gradient vectors.
//! - **Objective values**: [`validate_value`] checks scalar outputs for
//!   finiteness.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`OptError`] variants, making higher-level code more uniform and easier
//! to debug.
use crate::optimization::{
    errors::{OptError, OptResult},
    types::{Grad, Point},
};

/// Validate the projected-gradient tolerance.
///
/// The value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate a point against dimension and finiteness.
///
/// Checks:
/// - `x.len() == dim`
/// - every element is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`OptError::PointDimMismatch`] if length does not match `dim`.
/// - [`OptError::NonFinitePoint`] with the index/value of the first
///   offending element.
pub fn validate_point(x: &Point, dim: usize) -> OptResult<()> {
    if x.len() != dim {
        return Err(OptError::PointDimMismatch { expected: dim, found: x.len() });
    }
    for (index, &value) in x.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::NonFinitePoint { index, value });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate a Hessian-vector product against dimension and finiteness.
///
/// # Errors
/// - [`OptError::HessianVecDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidHessianVec`] with the index/value of the first
///   offending element.
pub fn validate_hessian_vec(hv: &Grad, dim: usize) -> OptResult<()> {
    if hv.len() != dim {
        return Err(OptError::HessianVecDimMismatch { expected: dim, found: hv.len() });
    }
    for (index, &value) in hv.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessianVec { index, value });
        }
    }
    Ok(())
}

/// Validate that a scalar objective value is finite.
///
/// Negative values are fine as long as they are finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}
