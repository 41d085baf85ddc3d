//! Boxed differentiable objective — the contract the SPG solver consumes.
//!
//! - [`BoxObjective`]: trait users implement for their problem.
//!
//! Convention: the solver *minimizes* `f(x)` over a coordinate-wise box.
//! Implementations report invalid inputs and non-finite evaluations as
//! recoverable [`OptError`](crate::optimization::errors::OptError) values,
//! never as panics; the solver treats any such error as a hard stop.
use crate::optimization::{
    errors::{OptError, OptResult},
    types::{Cost, Grad, Point},
};

/// User-implemented objective interface for box-constrained minimization.
///
/// Required:
/// - `value(&Point) -> OptResult<Cost>`: evaluate `f(x)`.
/// - `gradient(&Point) -> OptResult<Grad>`: analytic gradient `∇f(x)`, same
///   length as `x`.
///
/// Optional:
/// - `hessian_vec(&Point, &Point) -> OptResult<Grad>`: the product `H(x)·v`
///   applied without forming `H`. Defaults to
///   [`OptError::HessianVecNotImplemented`]; first-order solvers never call
///   it, but callers can use it for curvature checks.
/// - `check(&Point) -> OptResult<()>`: validation hook to reject obviously
///   invalid starting points. Called once before optimization.
pub trait BoxObjective {
    // Required methods
    fn value(&self, x: &Point) -> OptResult<Cost>;
    fn gradient(&self, x: &Point) -> OptResult<Grad>;

    // Optional methods
    fn hessian_vec(&self, _x: &Point, _v: &Point) -> OptResult<Grad> {
        Err(OptError::HessianVecNotImplemented)
    }

    fn check(&self, _x: &Point) -> OptResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The default `hessian_vec` and `check` implementations.
    //
    // They intentionally DO NOT cover:
    // - Any concrete objective (tested where the objective lives).
    // -------------------------------------------------------------------------

    struct Paraboloid;

    impl BoxObjective for Paraboloid {
        fn value(&self, x: &Point) -> OptResult<Cost> {
            Ok(x.dot(x))
        }

        fn gradient(&self, x: &Point) -> OptResult<Grad> {
            Ok(2.0 * x)
        }
    }

    #[test]
    fn default_hessian_vec_is_not_implemented() {
        let x = array![1.0, 2.0];
        let v = array![0.0, 1.0];
        assert_eq!(
            Paraboloid.hessian_vec(&x, &v),
            Err(OptError::HessianVecNotImplemented)
        );
    }

    #[test]
    fn default_check_accepts_any_point() {
        let x = array![f64::NAN];
        assert!(Paraboloid.check(&x).is_ok());
    }
}
