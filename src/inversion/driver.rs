//! End-to-end Contin driver: assemble bounds and a seed, run the solver,
//! unpack the fit.
//!
//! Purpose
//! -------
//! Tie the pieces together: given a validated [`ProblemInstance`], build
//! the box constraints and starting point, minimize the regularized
//! objective with SPG, and repackage the solution vector as a
//! [`ContinFit`] with the spectrum and background separated out.
//!
//! Key behaviors
//! -------------
//! - Bounds: every spectral weight lives in `[0, weight_upper]`
//!   (non-negativity is what makes the recovered spectrum physical); the
//!   background coordinate gets its own interval, `[0, 100]` by default.
//! - Seed: all spectral weights start at `1.0`, the background at `0.0`.
//!   Deterministic; two identical runs produce bitwise-identical fits.
//! - Hitting the iteration cap is a reported outcome
//!   (`ContinStatus::MaxIterationsReached`), not an error — the partial
//!   fit is still returned.
//! - Any solver failure (non-finite values, failed line search, invalid
//!   configuration) surfaces as
//!   [`ContinError::Optimization`](crate::inversion::errors::ContinError::Optimization).
//!
//! Downstream usage
//! ----------------
//! [`contin`] is the one-call entry point: raw samples in, fit out. Code
//! that wants to reuse a discretization across several α values builds a
//! [`ProblemInstance`] once and calls [`invert`] per α.
use crate::inversion::{
    errors::{ContinError, ContinResult},
    kernel::KernelKind,
    objective::ContinObjective,
    problem::ProblemInstance,
};
use crate::optimization::{bounds::Bounds, spg::{SpgOptions, SpgSolver}};
use ndarray::{s, Array1};

/// Default upper bound on each spectral weight.
pub const DEFAULT_WEIGHT_UPPER: f64 = 100.0;
/// Default box for the background coordinate.
pub const DEFAULT_BACKGROUND_LOWER: f64 = 0.0;
pub const DEFAULT_BACKGROUND_UPPER: f64 = 100.0;

/// How the solver finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinStatus {
    /// The projected-gradient norm dropped below tolerance.
    Converged,
    /// The iteration cap was hit first; the fit is the best iterate so far.
    MaxIterationsReached,
}

/// A recovered distribution plus run diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinFit {
    /// The τ-grid the spectrum is defined on (length `m`).
    pub tau: Array1<f64>,
    /// Recovered spectral weights `g` (length `m`, all within bounds).
    pub spectrum: Array1<f64>,
    /// Recovered additive background `b`.
    pub background: f64,
    pub status: ContinStatus,
    pub iterations: usize,
    /// Final objective value.
    pub objective: f64,
    /// Final sup-norm of the projected gradient.
    pub grad_norm: f64,
}

/// Driver configuration: solver options plus the box geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinOptions {
    pub spg: SpgOptions,
    /// Upper bound applied to every spectral weight.
    pub weight_upper: f64,
    pub background_lower: f64,
    pub background_upper: f64,
}

impl ContinOptions {
    /// Validated constructor.
    ///
    /// # Errors
    /// - [`ContinError::InvalidWeightUpper`] if `weight_upper` is not
    ///   finite and positive.
    /// - [`ContinError::InvalidBackgroundBounds`] if the background
    ///   interval is non-finite or inverted.
    pub fn new(
        spg: SpgOptions, weight_upper: f64, background_lower: f64, background_upper: f64,
    ) -> ContinResult<Self> {
        if !weight_upper.is_finite() || weight_upper <= 0.0 {
            return Err(ContinError::InvalidWeightUpper { value: weight_upper });
        }
        if !background_lower.is_finite()
            || !background_upper.is_finite()
            || background_lower > background_upper
        {
            return Err(ContinError::InvalidBackgroundBounds {
                lower: background_lower,
                upper: background_upper,
            });
        }
        Ok(Self { spg, weight_upper, background_lower, background_upper })
    }
}

impl Default for ContinOptions {
    fn default() -> Self {
        Self {
            spg: SpgOptions::default(),
            weight_upper: DEFAULT_WEIGHT_UPPER,
            background_lower: DEFAULT_BACKGROUND_LOWER,
            background_upper: DEFAULT_BACKGROUND_UPPER,
        }
    }
}

/// Minimize the regularized objective over the box and unpack the result.
///
/// The seed sets every spectral weight to `1.0` and the background to
/// `0.0`; if the configured box excludes the seed, the solver projects it
/// onto the box before the first evaluation.
///
/// # Errors
/// [`ContinError::Optimization`] wrapping the underlying solver error.
pub fn invert(problem: &ProblemInstance, options: &ContinOptions) -> ContinResult<ContinFit> {
    let m = problem.m();
    let dim = problem.dim();

    let mut lower = Array1::zeros(dim);
    lower[m] = options.background_lower;
    let mut upper = Array1::from_elem(dim, options.weight_upper);
    upper[m] = options.background_upper;
    let bounds = Bounds::new(lower, upper)?;

    let mut x0 = Array1::ones(dim);
    x0[m] = 0.0;

    let objective = ContinObjective::new(problem);
    let solver = SpgSolver::new(options.spg.clone());
    let outcome = solver.minimize(&objective, &bounds, x0)?;

    Ok(ContinFit {
        tau: problem.tau.clone(),
        spectrum: outcome.x.slice(s![..m]).to_owned(),
        background: outcome.x[m],
        status: if outcome.converged {
            ContinStatus::Converged
        } else {
            ContinStatus::MaxIterationsReached
        },
        iterations: outcome.iterations,
        objective: outcome.f,
        grad_norm: outcome.pg_norm,
    })
}

/// One-call inversion: validate and discretize the raw samples, then run
/// [`invert`].
///
/// # Errors
/// Any [`ProblemInstance::build`] rejection, or a solver failure via
/// [`ContinError::Optimization`].
#[allow(clippy::too_many_arguments)]
pub fn contin(
    t: &Array1<f64>, y: &Array1<f64>, variance: &Array1<f64>, tau0: f64, tau1: f64, m: usize,
    kind: KernelKind, alpha: f64, options: &ContinOptions,
) -> ContinResult<ContinFit> {
    let problem = ProblemInstance::build(t, y, variance, tau0, tau1, m, kind, alpha)?;
    invert(&problem, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inversion::synthetic::multi_exponential_series;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Option validation (weight cap, background interval).
    // - A small end-to-end inversion: feasibility of the fit, convergence
    //   status, and determinism across identical runs.
    // - The iteration-cap path reporting `MaxIterationsReached` with a
    //   usable partial fit.
    //
    // They intentionally DO NOT cover:
    // - Recovery accuracy on realistic data (integration tests).
    // -------------------------------------------------------------------------

    fn small_problem() -> ProblemInstance {
        let (t, y, var) =
            multi_exponential_series(&[2.0], &[1.0], 40, 0.0, 3.0).expect("series should build");
        ProblemInstance::build(&t, &y, &var, 0.25, 2.5, 8, KernelKind::MultiExponential, 0.05)
            .expect("problem should build")
    }

    #[test]
    fn options_reject_bad_weight_cap() {
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = ContinOptions::new(SpgOptions::default(), bad, 0.0, 100.0);
            assert!(matches!(result, Err(ContinError::InvalidWeightUpper { .. })), "{bad}");
        }
    }

    #[test]
    fn options_reject_inverted_or_non_finite_background_interval() {
        let inverted = ContinOptions::new(SpgOptions::default(), 100.0, 5.0, 1.0);
        assert!(matches!(inverted, Err(ContinError::InvalidBackgroundBounds { .. })));
        let non_finite = ContinOptions::new(SpgOptions::default(), 100.0, f64::NAN, 1.0);
        assert!(matches!(non_finite, Err(ContinError::InvalidBackgroundBounds { .. })));
    }

    #[test]
    fn default_options_are_valid() {
        let opts = ContinOptions::default();
        let rebuilt = ContinOptions::new(
            opts.spg.clone(),
            opts.weight_upper,
            opts.background_lower,
            opts.background_upper,
        );
        assert!(rebuilt.is_ok());
    }

    #[test]
    fn invert_returns_a_feasible_converged_fit() {
        let problem = small_problem();
        let fit = invert(&problem, &ContinOptions::default()).expect("inversion should succeed");

        assert_eq!(fit.status, ContinStatus::Converged);
        assert_eq!(fit.spectrum.len(), problem.m());
        assert_eq!(fit.tau.len(), problem.m());
        for &g in fit.spectrum.iter() {
            assert!((0.0..=DEFAULT_WEIGHT_UPPER).contains(&g), "weight {g} out of box");
        }
        assert!(
            (DEFAULT_BACKGROUND_LOWER..=DEFAULT_BACKGROUND_UPPER).contains(&fit.background)
        );
        assert!(fit.objective.is_finite() && fit.objective >= 0.0);
    }

    #[test]
    fn identical_runs_produce_bitwise_identical_fits() {
        let problem = small_problem();
        let opts = ContinOptions::default();
        let first = invert(&problem, &opts).expect("first run should succeed");
        let second = invert(&problem, &opts).expect("second run should succeed");
        assert_eq!(first, second);
    }

    #[test]
    fn iteration_cap_is_an_outcome_not_an_error() {
        let problem = small_problem();
        let spg = SpgOptions { max_iter: 1, ..SpgOptions::default() };
        let opts = ContinOptions::new(spg, 100.0, 0.0, 100.0).expect("options should build");
        let fit = invert(&problem, &opts).expect("capped run should still return a fit");
        assert_eq!(fit.status, ContinStatus::MaxIterationsReached);
        assert_eq!(fit.iterations, 1);
        assert!(fit.objective.is_finite());
    }

    #[test]
    fn one_call_entry_point_matches_explicit_pipeline() {
        let (t, y, var) =
            multi_exponential_series(&[1.5], &[0.8], 30, 0.0, 2.4).expect("series should build");
        let opts = ContinOptions::default();
        let via_contin =
            contin(&t, &y, &var, 0.2, 2.0, 6, KernelKind::MultiExponential, 0.1, &opts)
                .expect("contin should succeed");
        let problem =
            ProblemInstance::build(&t, &y, &var, 0.2, 2.0, 6, KernelKind::MultiExponential, 0.1)
                .expect("problem should build");
        let via_invert = invert(&problem, &opts).expect("invert should succeed");
        assert_eq!(via_contin, via_invert);
    }

    #[test]
    fn tau_grid_is_echoed_back_on_the_fit() {
        let problem = small_problem();
        let fit = invert(&problem, &ContinOptions::default()).expect("inversion should succeed");
        assert_abs_diff_eq!(fit.tau[0], 0.25, epsilon = 1e-12);
        let last = fit.tau[fit.tau.len() - 1];
        assert_abs_diff_eq!(last, 2.5, epsilon = 1e-12);
    }
}
