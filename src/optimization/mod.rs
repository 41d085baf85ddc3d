//! optimization — box-constrained solver stack and unified error surface.
//!
//! Purpose
//! -------
//! Provide a generic, self-contained optimization layer for minimizing
//! differentiable objectives over coordinate-wise boxes. Callers implement
//! [`objective::BoxObjective`], describe the feasible box with
//! [`bounds::Bounds`], and drive the spectral projected gradient solver
//! either step by step or through its convenience loop.
//!
//! Key behaviors
//! -------------
//! - Expose the boxed-objective capability (`objective`) — value, analytic
//!   gradient, and an optional matrix-free Hessian-vector product.
//! - Supply the SPG solver (`spg`) with a step-level state machine
//!   (`initialize` / `step` / `is_optimal`) plus a `minimize` loop, using
//!   a Barzilai–Borwein step and non-monotone line search.
//! - Provide finite-difference check helpers (`finite_diff`) so analytic
//!   derivatives can be verified against numerical differentiation.
//! - Normalize configuration issues and numerical failures into a single
//!   enum (`errors::OptError`) with a common result alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Objective implementations report invalid inputs and non-finite
//!   evaluations as recoverable `OptError` values, not panics; the solver
//!   treats them as hard stops and never advances past a non-finite state.
//! - Bounds are validated at construction (`lower <= upper`, no NaN), so
//!   stepping code can project without re-checking.
//! - The layer is synchronous and deterministic: no randomness, no I/O in
//!   the iteration path, and per-iteration stderr diagnostics only when
//!   explicitly requested.
//!
//! Conventions
//! -----------
//! - Points, gradients, and objective values use the `ndarray`-based
//!   aliases in `types` (`Point`, `Grad`, `Cost`).
//! - Public entrypoints that can fail return `OptResult<T>`.
//!
//! Downstream usage
//! ----------------
//! - The Contin inversion layer implements `BoxObjective` for its
//!   regularized least-squares objective and drives `SpgSolver::minimize`
//!   from its driver; other callers can reuse the solver against any boxed
//!   differentiable objective (e.g., quadratic-programming fixtures in the
//!   unit tests).
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns: bounds
//!   validation and projection, validation helpers, FD agreement on known
//!   quadratics, and SPG behavior on constrained fixtures.
//! - End-to-end solver behavior on the Contin objective lives in the
//!   crate's integration tests.

pub mod bounds;
pub mod errors;
pub mod finite_diff;
pub mod objective;
pub mod spg;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::bounds::Bounds;
pub use self::errors::{OptError, OptResult};
pub use self::objective::BoxObjective;
pub use self::spg::{SpgOptions, SpgOutcome, SpgSolver, SpgState};
pub use self::types::{Cost, Grad, Point};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use contin::optimization::prelude::*;
//
// to import the main solver surface in a single line.

pub mod prelude {
    pub use super::bounds::Bounds;
    pub use super::errors::{OptError, OptResult};
    pub use super::objective::BoxObjective;
    pub use super::spg::{SpgOptions, SpgOutcome, SpgSolver, SpgState};
    pub use super::types::{Cost, Grad, Point};
}
