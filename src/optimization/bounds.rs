//! Coordinate-wise box constraints for the SPG solver.
//!
//! [`Bounds`] holds validated per-coordinate `[lower, upper]` intervals.
//! Infinite bounds are accepted on either side (a coordinate can be left
//! effectively unconstrained); NaN bounds and `lower > upper` are rejected
//! at construction time, so downstream code never re-checks ordering.
use crate::optimization::{
    errors::{OptError, OptResult},
    types::Point,
};
use ndarray::Array1;

/// Validated coordinate-wise box `[lower_i, upper_i]`.
///
/// Invariants (enforced by [`Bounds::new`]):
/// - `lower.len() == upper.len() > 0`
/// - no NaN entries
/// - `lower_i <= upper_i` for every coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Array1<f64>,
    upper: Array1<f64>,
}

impl Bounds {
    /// Construct validated bounds from per-coordinate vectors.
    ///
    /// # Errors
    /// - [`OptError::BoundsDimMismatch`] if the vectors differ in length.
    /// - [`OptError::EmptyBounds`] if the vectors are empty.
    /// - [`OptError::InvalidBound`] at the first coordinate with a NaN
    ///   endpoint or `lower > upper`.
    pub fn new(lower: Array1<f64>, upper: Array1<f64>) -> OptResult<Self> {
        if lower.len() != upper.len() {
            return Err(OptError::BoundsDimMismatch { lower: lower.len(), upper: upper.len() });
        }
        if lower.is_empty() {
            return Err(OptError::EmptyBounds);
        }
        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if lo.is_nan() || hi.is_nan() || lo > hi {
                return Err(OptError::InvalidBound { index, lower: lo, upper: hi });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Construct a box with the same `[lower, upper]` interval on every
    /// coordinate.
    ///
    /// # Errors
    /// Same as [`Bounds::new`].
    pub fn uniform(dim: usize, lower: f64, upper: f64) -> OptResult<Self> {
        Self::new(Array1::from_elem(dim, lower), Array1::from_elem(dim, upper))
    }

    /// Number of coordinates the box constrains.
    pub fn len(&self) -> usize {
        self.lower.len()
    }

    /// Always `false`; empty bounds are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Per-coordinate lower bounds.
    pub fn lower(&self) -> &Array1<f64> {
        &self.lower
    }

    /// Per-coordinate upper bounds.
    pub fn upper(&self) -> &Array1<f64> {
        &self.upper
    }

    /// Return the Euclidean projection of `x` onto the box.
    pub fn project(&self, x: &Point) -> Point {
        let mut out = x.clone();
        self.project_into(&mut out);
        out
    }

    /// Clamp `x` into the box in place.
    pub fn project_into(&self, x: &mut Point) {
        for ((xi, &lo), &hi) in x.iter_mut().zip(self.lower.iter()).zip(self.upper.iter()) {
            *xi = xi.max(lo).min(hi);
        }
    }

    /// `true` if every coordinate of `x` lies inside the box.
    pub fn contains(&self, x: &Point) -> bool {
        x.iter()
            .zip(self.lower.iter())
            .zip(self.upper.iter())
            .all(|((&xi, &lo), &hi)| xi >= lo && xi <= hi)
    }
}
