//! Finite-difference check helpers for boxed objectives.
//!
//! Purpose
//! -------
//! Provide finite-difference approximations to the gradient and to the
//! Hessian-vector product of a [`BoxObjective`], with error capture and
//! post-hoc validation, so analytic derivatives can be verified without
//! depending directly on the `finitediff` API at every call site.
//!
//! Key behaviors
//! -------------
//! - Compute central-difference gradients with error capture via
//!   [`fd_gradient`], falling back on the caller to choose
//!   [`fd_gradient_forward`] near domain edges.
//! - Approximate `H(x)·v` as the central difference of the analytic
//!   gradient along `v` via [`fd_hessian_vec`].
//! - Route any error raised inside an evaluation closure into a shared
//!   cell and surface it as the result, never as a silent NaN.
//!
//! Conventions
//! -----------
//! - The finite-difference closures must return `f64`, so `?` cannot be
//!   used inside them; the first captured error wins and the closure
//!   returns `NaN`, which validation would otherwise reject.
//! - These helpers are check tooling: solvers use analytic derivatives
//!   from the [`BoxObjective`] contract directly.
use crate::optimization::{
    errors::{OptError, OptResult},
    objective::BoxObjective,
    types::{Grad, Point},
    validation::{validate_grad, validate_hessian_vec},
};
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Central-difference gradient of `obj.value` at `x`, validated.
///
/// # Errors
/// - Any error raised by `obj.value` during the sweep (first one wins).
/// - [`OptError::GradientDimMismatch`] / [`OptError::InvalidGradient`] if
///   the approximation fails validation.
pub fn fd_gradient<O: BoxObjective>(obj: &O, x: &Point) -> OptResult<Grad> {
    let closure_err: RefCell<Option<OptError>> = RefCell::new(None);
    let f = capture_value(obj, &closure_err);
    let grad = x.central_diff(&f);
    finish_gradient(grad, x.len(), &closure_err)
}

/// Forward-difference gradient of `obj.value` at `x`, validated.
///
/// Useful when `x` sits on a domain edge where the central stencil would
/// step outside the feasible region.
///
/// # Errors
/// Same as [`fd_gradient`].
pub fn fd_gradient_forward<O: BoxObjective>(obj: &O, x: &Point) -> OptResult<Grad> {
    let closure_err: RefCell<Option<OptError>> = RefCell::new(None);
    let f = capture_value(obj, &closure_err);
    let grad = x.forward_diff(&f);
    finish_gradient(grad, x.len(), &closure_err)
}

/// Central-difference directional derivative of the analytic gradient,
/// i.e. `(∇f(x + h·v) − ∇f(x − h·v)) / (2h)` — a finite-difference
/// approximation to `H(x)·v`.
///
/// # Errors
/// - [`OptError::InvalidStepBounds`] if `h` is not finite and positive.
/// - Any error raised by `obj.gradient` at the stencil points.
/// - Validation errors if the approximation is non-finite.
pub fn fd_hessian_vec<O: BoxObjective>(
    obj: &O, x: &Point, v: &Point, h: f64,
) -> OptResult<Grad> {
    if !h.is_finite() || h <= 0.0 {
        return Err(OptError::InvalidStepBounds {
            min: h,
            max: h,
            reason: "Finite-difference step must be finite and positive.",
        });
    }
    let forward = obj.gradient(&(x + &(h * v)))?;
    let backward = obj.gradient(&(x - &(h * v)))?;
    let hv = (forward - backward) / (2.0 * h);
    validate_hessian_vec(&hv, x.len())?;
    Ok(hv)
}

/// Wrap `obj.value` into an `f64`-returning closure that stores the first
/// evaluation error in `closure_err` and yields `NaN` in its place.
fn capture_value<'a, O: BoxObjective>(
    obj: &'a O, closure_err: &'a RefCell<Option<OptError>>,
) -> impl Fn(&Point) -> f64 + 'a {
    move |x: &Point| match obj.value(x) {
        Ok(value) => value,
        Err(e) => {
            let mut slot = closure_err.borrow_mut();
            if slot.is_none() {
                *slot = Some(e);
            }
            f64::NAN
        }
    }
}

/// Surface a captured closure error, then validate the FD gradient.
fn finish_gradient(
    grad: Grad, dim: usize, closure_err: &RefCell<Option<OptError>>,
) -> OptResult<Grad> {
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&grad, dim)?;
    Ok(grad)
}
