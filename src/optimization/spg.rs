//! Spectral projected gradient (SPG) solver for box-constrained problems.
//!
//! Purpose
//! -------
//! Minimize any [`BoxObjective`] over a coordinate-wise box using the
//! Birgin–Martínez–Raydan spectral projected gradient method: a
//! projection-arc search direction, a Barzilai–Borwein step informed by
//! curvature along the previous step, and a non-monotone
//! (Grippo–Lampariello–Lucidi) line search.
//!
//! Key behaviors
//! -------------
//! - Expose a step-level state machine — [`SpgSolver::initialize`],
//!   [`SpgSolver::step`], [`SpgSolver::is_optimal`] — so callers can
//!   interleave their own cancellation or wall-clock checks between
//!   iterations.
//! - Provide [`SpgSolver::minimize`], a convenience loop that runs to
//!   convergence or the iteration cap and normalizes the result into an
//!   [`SpgOutcome`].
//! - Declare convergence when the sup-norm of the projected gradient
//!   `P(x − ∇f(x)) − x` falls below `tol`; hitting `max_iter` is a
//!   non-fatal outcome (`converged = false`), not an error.
//! - Treat any non-finite objective, gradient, or trial value as a hard
//!   stop: the error propagates and the state keeps the last finite
//!   iterate.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every iterate lies inside the box: the seed is projected, and trial
//!   points `x + t·d` with `t ∈ (0, 1]` stay feasible because both `x`
//!   and `x + d` are.
//! - [`SpgOptions`] values are validated on construction and treated as
//!   internally consistent by the stepping code.
//! - The solver is synchronous, single-threaded, and allocation-light;
//!   one [`SpgState`] must not be shared between concurrent callers.
//!
//! Conventions
//! -----------
//! - The solver only ever calls `value` and `gradient` on the objective;
//!   `hessian_vec` is part of the objective contract for callers and
//!   checks, not for this solver.
//! - Deterministic: no randomness anywhere, so identical inputs produce
//!   bitwise-identical iterates.
//!
//! Testing notes
//! -------------
//! - Unit tests drive the solver on box-constrained quadratic fixtures
//!   with known solutions, including actively constrained ones, and
//!   assert feasibility and the bounded non-monotone descent property.
//! - End-to-end behavior on the Contin objective is covered by the
//!   integration tests.
use crate::optimization::{
    bounds::Bounds,
    errors::{OptError, OptResult},
    objective::BoxObjective,
    types::{
        Cost, Grad, Point, DEFAULT_GAMMA, DEFAULT_MAX_ITER, DEFAULT_MEMORY, DEFAULT_SIGMA1,
        DEFAULT_SIGMA2, DEFAULT_STEP_MAX, DEFAULT_STEP_MIN, DEFAULT_TOL, MAX_BACKTRACKS,
    },
    validation::{validate_grad, validate_value, verify_tol_grad},
};
use std::collections::VecDeque;

/// Validated SPG configuration.
///
/// Fields:
/// - `tol`: projected-gradient sup-norm convergence tolerance.
/// - `max_iter`: hard cap on iterations for [`SpgSolver::minimize`].
/// - `memory`: non-monotone window; accepted trials are compared against
///   the maximum of this many recent objective values. `1` recovers a
///   monotone Armijo search.
/// - `gamma`: sufficient-decrease parameter in the Armijo test.
/// - `sigma1`, `sigma2`: safeguards keeping each quadratic-interpolation
///   backtrack inside `[sigma1·t, sigma2·t]`.
/// - `step_min`, `step_max`: clamp range for the Barzilai–Borwein step.
/// - `verbose`: if `true`, prints per-iteration progress to stderr.
#[derive(Debug, Clone, PartialEq)]
pub struct SpgOptions {
    pub tol: f64,
    pub max_iter: usize,
    pub memory: usize,
    pub gamma: f64,
    pub sigma1: f64,
    pub sigma2: f64,
    pub step_min: f64,
    pub step_max: f64,
    pub verbose: bool,
}

impl SpgOptions {
    /// Construct validated options.
    ///
    /// # Rules
    /// - `tol` must be finite and strictly positive.
    /// - `max_iter` and `memory` must be `> 0`.
    /// - `gamma` must lie strictly in `(0, 1)`.
    /// - `0 < sigma1 < sigma2 < 1`.
    /// - `0 < step_min < step_max`, both finite.
    ///
    /// # Errors
    /// The matching [`OptError`] variant for the first violated rule.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tol: f64, max_iter: usize, memory: usize, gamma: f64, sigma1: f64, sigma2: f64,
        step_min: f64, step_max: f64, verbose: bool,
    ) -> OptResult<Self> {
        verify_tol_grad(tol)?;
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        if memory == 0 {
            return Err(OptError::InvalidMemory {
                memory,
                reason: "Non-monotone window must hold at least one value.",
            });
        }
        if !gamma.is_finite() || gamma <= 0.0 || gamma >= 1.0 {
            return Err(OptError::InvalidSufficientDecrease {
                gamma,
                reason: "Sufficient-decrease parameter must lie strictly in (0, 1).",
            });
        }
        if !sigma1.is_finite() || !sigma2.is_finite() || sigma1 <= 0.0 || sigma1 >= sigma2
            || sigma2 >= 1.0
        {
            return Err(OptError::InvalidBacktrackSafeguards {
                sigma1,
                sigma2,
                reason: "Safeguards must satisfy 0 < sigma1 < sigma2 < 1.",
            });
        }
        if !step_min.is_finite() || !step_max.is_finite() || step_min <= 0.0
            || step_min >= step_max
        {
            return Err(OptError::InvalidStepBounds {
                min: step_min,
                max: step_max,
                reason: "Step clamp must satisfy 0 < min < max, both finite.",
            });
        }
        Ok(Self { tol, max_iter, memory, gamma, sigma1, sigma2, step_min, step_max, verbose })
    }
}

impl Default for SpgOptions {
    fn default() -> Self {
        Self {
            tol: DEFAULT_TOL,
            max_iter: DEFAULT_MAX_ITER,
            memory: DEFAULT_MEMORY,
            gamma: DEFAULT_GAMMA,
            sigma1: DEFAULT_SIGMA1,
            sigma2: DEFAULT_SIGMA2,
            step_min: DEFAULT_STEP_MIN,
            step_max: DEFAULT_STEP_MAX,
            verbose: false,
        }
    }
}

/// Mutable per-run solver state.
///
/// Owned by one caller at a time; produced by [`SpgSolver::initialize`]
/// and advanced in place by [`SpgSolver::step`]. All fields describe the
/// current (always feasible, always finite) iterate.
#[derive(Debug, Clone, PartialEq)]
pub struct SpgState {
    /// Current iterate, inside the box.
    pub x: Point,
    /// Objective value at `x`.
    pub f: Cost,
    /// Gradient at `x`.
    pub grad: Grad,
    /// Sup-norm of the projected gradient at `x`.
    pub pg_norm: f64,
    /// Current Barzilai–Borwein spectral step.
    pub spectral_step: f64,
    /// Completed iterations.
    pub iterations: usize,
    /// Recent objective values for the non-monotone acceptance test.
    history: VecDeque<Cost>,
}

/// Normalized result of an SPG run.
///
/// - `x`: best (final) iterate, inside the box.
/// - `f`: objective value at `x`.
/// - `converged`: `true` if the projected-gradient test passed; `false`
///   means the iteration cap was reached with the best point so far.
/// - `iterations`: iterations performed.
/// - `pg_norm`: final projected-gradient sup-norm.
#[derive(Debug, Clone, PartialEq)]
pub struct SpgOutcome {
    pub x: Point,
    pub f: Cost,
    pub converged: bool,
    pub iterations: usize,
    pub pg_norm: f64,
}

/// Spectral projected gradient solver over a [`BoxObjective`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpgSolver {
    pub opts: SpgOptions,
}

impl SpgSolver {
    pub fn new(opts: SpgOptions) -> Self {
        Self { opts }
    }

    /// Seed a solver state: project `x0` into the box, evaluate the
    /// objective and gradient, and derive the initial spectral step from
    /// the projected gradient.
    ///
    /// # Errors
    /// - [`OptError::PointDimMismatch`] if `x0` and the bounds disagree.
    /// - Any error from `objective.check`.
    /// - Non-finite initial value/gradient surfaces as
    ///   [`OptError::NonFiniteCost`] / [`OptError::InvalidGradient`].
    pub fn initialize<O: BoxObjective>(
        &self, objective: &O, bounds: &Bounds, x0: Point,
    ) -> OptResult<SpgState> {
        if x0.len() != bounds.len() {
            return Err(OptError::PointDimMismatch { expected: bounds.len(), found: x0.len() });
        }
        let x = bounds.project(&x0);
        objective.check(&x)?;

        let f = objective.value(&x)?;
        validate_value(f)?;
        let grad = objective.gradient(&x)?;
        validate_grad(&grad, x.len())?;

        let pg_norm = projected_gradient_norm(bounds, &x, &grad);
        // 1/||pg||_inf scales the first projection arc to unit displacement
        // on the steepest coordinate.
        let spectral_step = if pg_norm > 0.0 {
            (1.0 / pg_norm).clamp(self.opts.step_min, self.opts.step_max)
        } else {
            1.0
        };

        let mut history = VecDeque::with_capacity(self.opts.memory);
        history.push_back(f);

        Ok(SpgState { x, f, grad, pg_norm, spectral_step, iterations: 0, history })
    }

    /// `true` once the projected-gradient sup-norm at the current iterate
    /// is below the configured tolerance.
    pub fn is_optimal(&self, state: &SpgState) -> bool {
        state.pg_norm <= self.opts.tol
    }

    /// Advance the state by one SPG iteration.
    ///
    /// Computes the projection-arc direction `d = P(x − λ·∇f) − x`, finds
    /// an acceptable step along it with the non-monotone line search,
    /// moves the iterate, and updates the Barzilai–Borwein spectral step
    /// from the accepted displacement and gradient change.
    ///
    /// # Errors
    /// - [`OptError::NonFiniteCost`] / [`OptError::InvalidGradient`] if an
    ///   evaluation turns non-finite; the state is left at the last finite
    ///   iterate.
    /// - [`OptError::LineSearchFailed`] if no finite accepted step exists
    ///   within the backtrack budget.
    pub fn step<O: BoxObjective>(
        &self, objective: &O, bounds: &Bounds, state: &mut SpgState,
    ) -> OptResult<()> {
        let direction = bounds.project(&(&state.x - &(state.spectral_step * &state.grad)))
            - &state.x;
        let slope: f64 = state.grad.dot(&direction);

        let f_reference = state
            .history
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);

        // Non-monotone Armijo on the segment x + t·d, t ∈ (0, 1].
        let mut t = 1.0_f64;
        let mut accepted: Option<(Point, Cost)> = None;
        for _ in 0..MAX_BACKTRACKS {
            let trial = &state.x + &(t * &direction);
            let f_trial = objective.value(&trial)?;
            validate_value(f_trial)?;

            if f_trial <= f_reference + self.opts.gamma * t * slope {
                accepted = Some((trial, f_trial));
                break;
            }

            // Safeguarded quadratic interpolation on t.
            let t_quad = -0.5 * t * t * slope / (f_trial - state.f - t * slope);
            t = if t_quad.is_finite() && t_quad >= self.opts.sigma1 * t
                && t_quad <= self.opts.sigma2 * t
            {
                t_quad
            } else {
                0.5 * t
            };
        }
        let (x_next, f_next) = match accepted {
            Some(pair) => pair,
            None => return Err(OptError::LineSearchFailed { backtracks: MAX_BACKTRACKS }),
        };

        let grad_next = objective.gradient(&x_next)?;
        validate_grad(&grad_next, x_next.len())?;

        // Barzilai–Borwein update from s = Δx, y = Δ∇f.
        let s = &x_next - &state.x;
        let y = &grad_next - &state.grad;
        let sy: f64 = s.dot(&y);
        state.spectral_step = if sy <= 0.0 {
            self.opts.step_max
        } else {
            (s.dot(&s) / sy).clamp(self.opts.step_min, self.opts.step_max)
        };

        state.x = x_next;
        state.f = f_next;
        state.grad = grad_next;
        state.pg_norm = projected_gradient_norm(bounds, &state.x, &state.grad);
        state.iterations += 1;
        if state.history.len() == self.opts.memory {
            state.history.pop_front();
        }
        state.history.push_back(state.f);

        if self.opts.verbose {
            self.echo(state);
        }
        Ok(())
    }

    /// Run `initialize` + `step` until optimality or the iteration cap.
    ///
    /// Reaching `max_iter` is reported through `converged = false` on the
    /// outcome, never as an `Err`.
    ///
    /// # Errors
    /// Propagates any initialization or stepping error unchanged.
    pub fn minimize<O: BoxObjective>(
        &self, objective: &O, bounds: &Bounds, x0: Point,
    ) -> OptResult<SpgOutcome> {
        let mut state = self.initialize(objective, bounds, x0)?;
        while state.iterations < self.opts.max_iter && !self.is_optimal(&state) {
            self.step(objective, bounds, &mut state)?;
        }
        Ok(SpgOutcome {
            converged: self.is_optimal(&state),
            iterations: state.iterations,
            pg_norm: state.pg_norm,
            f: state.f,
            x: state.x,
        })
    }

    /// Per-iteration progress line on stderr: iteration count, objective,
    /// projected-gradient norm, and the leading coordinates.
    fn echo(&self, state: &SpgState) {
        let head: Vec<f64> = state.x.iter().copied().take(3).collect();
        eprintln!(
            "iter {:>6}: f = {:+.6e}, ||pg||_inf = {:.6e}, x = {head:?}...",
            state.iterations, state.f, state.pg_norm
        );
    }
}

/// Sup-norm of the projected gradient `P(x − ∇f(x)) − x` — the standard
/// optimality measure for box-constrained problems.
fn projected_gradient_norm(bounds: &Bounds, x: &Point, grad: &Grad) -> f64 {
    let projected = bounds.project(&(x - grad));
    (&projected - x)
        .iter()
        .fold(0.0_f64, |acc, &v| acc.max(v.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Options validation for each rule in `SpgOptions::new`.
    // - Convergence on unconstrained and actively box-constrained
    //   quadratics with known minimizers.
    // - Feasibility of every iterate and the bounded non-monotone descent
    //   property of accepted objective values.
    // - Hard-stop behavior on non-finite objectives.
    //
    // They intentionally DO NOT cover:
    // - The Contin objective (tested in `inversion`), or FD helpers
    //   (tested in `finite_diff`).
    // -------------------------------------------------------------------------

    /// f(x) = Σ (x_i − target_i)², separable with minimizer `target`.
    struct ShiftedParaboloid {
        target: Array1<f64>,
    }

    impl BoxObjective for ShiftedParaboloid {
        fn value(&self, x: &Point) -> OptResult<Cost> {
            let d = x - &self.target;
            Ok(d.dot(&d))
        }

        fn gradient(&self, x: &Point) -> OptResult<Grad> {
            Ok(2.0 * (x - &self.target))
        }
    }

    struct BlowsUp;

    impl BoxObjective for BlowsUp {
        fn value(&self, _x: &Point) -> OptResult<Cost> {
            Ok(f64::INFINITY)
        }

        fn gradient(&self, x: &Point) -> OptResult<Grad> {
            Ok(x.clone())
        }
    }

    fn solver(tol: f64, max_iter: usize) -> SpgSolver {
        let opts = SpgOptions { tol, max_iter, ..SpgOptions::default() };
        SpgSolver::new(opts)
    }

    #[test]
    fn options_new_validates_each_rule() {
        assert!(SpgOptions::new(1e-6, 100, 10, 1e-4, 0.1, 0.9, 1e-30, 1e30, false).is_ok());
        assert!(matches!(
            SpgOptions::new(0.0, 100, 10, 1e-4, 0.1, 0.9, 1e-30, 1e30, false),
            Err(OptError::InvalidTolGrad { .. })
        ));
        assert!(matches!(
            SpgOptions::new(1e-6, 0, 10, 1e-4, 0.1, 0.9, 1e-30, 1e30, false),
            Err(OptError::InvalidMaxIter { .. })
        ));
        assert!(matches!(
            SpgOptions::new(1e-6, 100, 0, 1e-4, 0.1, 0.9, 1e-30, 1e30, false),
            Err(OptError::InvalidMemory { .. })
        ));
        assert!(matches!(
            SpgOptions::new(1e-6, 100, 10, 1.0, 0.1, 0.9, 1e-30, 1e30, false),
            Err(OptError::InvalidSufficientDecrease { .. })
        ));
        assert!(matches!(
            SpgOptions::new(1e-6, 100, 10, 1e-4, 0.9, 0.1, 1e-30, 1e30, false),
            Err(OptError::InvalidBacktrackSafeguards { .. })
        ));
        assert!(matches!(
            SpgOptions::new(1e-6, 100, 10, 1e-4, 0.1, 0.9, 1e30, 1e-30, false),
            Err(OptError::InvalidStepBounds { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Unconstrained-in-practice quadratic: the minimizer lies strictly
    // inside a wide box, so SPG must find it to high accuracy.
    fn minimize_reaches_interior_minimizer() {
        let objective = ShiftedParaboloid { target: array![1.0, -2.0, 0.5] };
        let bounds = Bounds::uniform(3, -10.0, 10.0).expect("bounds should be valid");
        let outcome = solver(1e-8, 1_000)
            .minimize(&objective, &bounds, array![5.0, 5.0, 5.0])
            .expect("minimize should succeed");

        assert!(outcome.converged);
        for (xi, ti) in outcome.x.iter().zip(objective.target.iter()) {
            assert_abs_diff_eq!(*xi, *ti, epsilon = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Actively constrained quadratic: the unconstrained minimizer sits
    // outside the box, so the solution must stick to the boundary.
    fn minimize_respects_active_bounds() {
        let objective = ShiftedParaboloid { target: array![-3.0, 0.5] };
        let bounds = Bounds::uniform(2, 0.0, 1.0).expect("bounds should be valid");
        let outcome = solver(1e-8, 1_000)
            .minimize(&objective, &bounds, array![0.9, 0.9])
            .expect("minimize should succeed");

        assert!(outcome.converged);
        assert_abs_diff_eq!(outcome.x[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(outcome.x[1], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn initialize_projects_infeasible_seed() {
        let objective = ShiftedParaboloid { target: array![0.5, 0.5] };
        let bounds = Bounds::uniform(2, 0.0, 1.0).expect("bounds should be valid");
        let state = solver(1e-8, 10)
            .initialize(&objective, &bounds, array![-5.0, 99.0])
            .expect("initialize should succeed");

        assert!(bounds.contains(&state.x));
        assert_eq!(state.iterations, 0);
    }

    #[test]
    // Purpose
    // -------
    // Every iterate stays inside the box, and each accepted objective
    // value is bounded by the maximum over the non-monotone window.
    fn iterates_stay_feasible_with_bounded_descent() {
        let objective = ShiftedParaboloid { target: array![2.0, -2.0, 2.0, -2.0] };
        let bounds = Bounds::uniform(4, -1.0, 1.0).expect("bounds should be valid");
        let spg = solver(1e-10, 200);
        let mut state = spg
            .initialize(&objective, &bounds, Array1::zeros(4))
            .expect("initialize should succeed");

        let memory = spg.opts.memory;
        let mut recent = vec![state.f];
        while state.iterations < 200 && !spg.is_optimal(&state) {
            spg.step(&objective, &bounds, &mut state).expect("step should succeed");
            assert!(bounds.contains(&state.x), "iterate left the box");
            let window_max =
                recent.iter().rev().take(memory).copied().fold(f64::NEG_INFINITY, f64::max);
            assert!(state.f <= window_max + 1e-12, "objective exceeded the window maximum");
            recent.push(state.f);
        }
        assert!(spg.is_optimal(&state));
    }

    #[test]
    fn max_iterations_is_an_outcome_not_an_error() {
        // One iteration cannot reach the distant minimizer, so the cap
        // must trigger. (Two could: on a separable quadratic the BB step
        // is exact after the first update.)
        let objective = ShiftedParaboloid { target: array![1.0e6, -1.0e6] };
        let bounds = Bounds::uniform(2, -1.0e7, 1.0e7).expect("bounds should be valid");
        let outcome = solver(1e-14, 1)
            .minimize(&objective, &bounds, array![0.0, 0.0])
            .expect("minimize should not error on the iteration cap");

        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 1);
    }

    #[test]
    fn non_finite_objective_is_a_hard_stop() {
        let bounds = Bounds::uniform(2, -1.0, 1.0).expect("bounds should be valid");
        let result = solver(1e-8, 10).minimize(&BlowsUp, &bounds, array![0.5, 0.5]);
        assert!(matches!(result, Err(OptError::NonFiniteCost { .. })));
    }

    #[test]
    fn converged_state_is_a_fixed_point_of_is_optimal() {
        let objective = ShiftedParaboloid { target: array![0.25] };
        let bounds = Bounds::uniform(1, 0.0, 1.0).expect("bounds should be valid");
        let spg = solver(1e-9, 1_000);
        let outcome = spg
            .minimize(&objective, &bounds, array![1.0])
            .expect("minimize should succeed");
        assert!(outcome.converged);
        assert!(outcome.pg_norm <= spg.opts.tol);
    }
}
