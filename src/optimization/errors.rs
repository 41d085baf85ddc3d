//! Errors for the box-constrained optimization layer (bounds validation,
//! options checks, and numerical-instability detection).
//!
//! This module defines [`OptError`], the error type shared by the boxed
//! objective contract and the SPG solver. Two families matter to callers:
//!
//! - **Configuration errors** (`InvalidBound`, `InvalidTolGrad`, …) are
//!   raised before any solver work starts.
//! - **Numerical instability** (`NonFiniteCost`, `InvalidGradient`,
//!   `InvalidHessianVec`, `NonFinitePoint`, `LineSearchFailed`) stops a run
//!   immediately; the last finite state is never overwritten by values
//!   computed from non-finite intermediates.

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

/// Unified error type for the optimization layer.
#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Bounds ----
    /// Lower and upper bound vectors differ in length.
    BoundsDimMismatch { lower: usize, upper: usize },

    /// Bounds must describe at least one coordinate.
    EmptyBounds,

    /// A coordinate-wise bound pair is NaN or ordered `lower > upper`.
    InvalidBound { index: usize, lower: f64, upper: f64 },

    /// A point has the wrong dimension for the bounds or objective.
    PointDimMismatch { expected: usize, found: usize },

    /// A point element is NaN/±inf.
    NonFinitePoint { index: usize, value: f64 },

    // ---- Objective evaluations ----
    /// Objective returned a non-finite value.
    NonFiniteCost { value: f64 },

    /// Gradient dimensions do not match the point dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite.
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    /// Hessian-vector product dimensions do not match the point dimensions.
    HessianVecDimMismatch { expected: usize, found: usize },

    /// Hessian-vector product elements need to be finite.
    InvalidHessianVec { index: usize, value: f64 },

    /// Objective does not provide a Hessian-vector product.
    HessianVecNotImplemented,

    // ---- SpgOptions ----
    /// Projected-gradient tolerance needs to be positive and finite.
    InvalidTolGrad { tol: f64, reason: &'static str },

    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// Non-monotone window needs at least one entry.
    InvalidMemory { memory: usize, reason: &'static str },

    /// Sufficient-decrease parameter must lie strictly in (0, 1).
    InvalidSufficientDecrease { gamma: f64, reason: &'static str },

    /// Backtracking safeguards must satisfy 0 < sigma1 < sigma2 < 1.
    InvalidBacktrackSafeguards { sigma1: f64, sigma2: f64, reason: &'static str },

    /// Spectral step clamp must satisfy 0 < min < max, both finite.
    InvalidStepBounds { min: f64, max: f64, reason: &'static str },

    // ---- Line search ----
    /// No finite accepted step within the backtrack budget.
    LineSearchFailed { backtracks: usize },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Bounds ----
            OptError::BoundsDimMismatch { lower, upper } => {
                write!(f, "Bounds dimension mismatch: lower has {lower}, upper has {upper}")
            }
            OptError::EmptyBounds => {
                write!(f, "Bounds must describe at least one coordinate")
            }
            OptError::InvalidBound { index, lower, upper } => {
                write!(f, "Invalid bound at index {index}: [{lower}, {upper}]")
            }
            OptError::PointDimMismatch { expected, found } => {
                write!(f, "Point dimension mismatch: expected {expected}, found {found}")
            }
            OptError::NonFinitePoint { index, value } => {
                write!(f, "Non-finite point element at index {index}: {value}")
            }

            // ---- Objective evaluations ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite objective value: {value}")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }
            OptError::HessianVecDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian-vector product dimension mismatch: expected {expected}, found {found}"
                )
            }
            OptError::InvalidHessianVec { index, value } => {
                write!(f, "Non-finite Hessian-vector product element at index {index}: {value}")
            }
            OptError::HessianVecNotImplemented => {
                write!(f, "Objective does not implement a Hessian-vector product")
            }

            // ---- SpgOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid projected-gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidMemory { memory, reason } => {
                write!(f, "Invalid non-monotone window {memory}: {reason}")
            }
            OptError::InvalidSufficientDecrease { gamma, reason } => {
                write!(f, "Invalid sufficient-decrease parameter {gamma}: {reason}")
            }
            OptError::InvalidBacktrackSafeguards { sigma1, sigma2, reason } => {
                write!(f, "Invalid backtracking safeguards ({sigma1}, {sigma2}): {reason}")
            }
            OptError::InvalidStepBounds { min, max, reason } => {
                write!(f, "Invalid spectral step bounds ({min}, {max}): {reason}")
            }

            // ---- Line search ----
            OptError::LineSearchFailed { backtracks } => {
                write!(
                    f,
                    "Line search found no finite accepted step in {backtracks} backtracks"
                )
            }
        }
    }
}
