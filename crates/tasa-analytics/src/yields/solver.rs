//! IRR solver.

use serde::{Deserialize, Serialize};
use tasa_core::{TasaError, TasaResult, Timeline};
use tasa_math::solvers::{secant_with_fallback, SolverConfig};
use tasa_math::MathError;

use super::discounted_flows;

/// Lower edge of the rate domain (exclusive).
const RATE_FLOOR: f64 = -1.0;

/// Configuration for [`YieldSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YieldSolverConfig {
    /// Starting rate for the search.
    pub initial_guess: f64,
    /// Offset of the second secant seed from the guess.
    pub secant_step: f64,
    /// Root-finder tolerance on both the residual and the step.
    pub tolerance: f64,
    /// Iteration budget for each phase of the search.
    pub max_iterations: u32,
    /// A rate is accepted only if `|NPV(rate)|` is below this.
    pub npv_tolerance: f64,
}

impl Default for YieldSolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.10,
            secant_step: 0.01,
            tolerance: 1e-12,
            max_iterations: 100,
            npv_tolerance: 1e-8,
        }
    }
}

impl YieldSolverConfig {
    /// Sets the initial guess.
    #[must_use]
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the root-finder tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Solves for the internal rate of return of a timeline.
///
/// Runs a secant search seeded at the initial guess and the guess plus the
/// configured step. If that fails or leaves the domain, a bracket is searched
/// around the guess and refined with Brent's method. The result is accepted
/// only when `|NPV(irr)| < npv_tolerance`; otherwise the solve fails with
/// [`TasaError::Convergence`].
///
/// The solver is deterministic: identical inputs give identical rates.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldSolver {
    config: YieldSolverConfig,
}

impl YieldSolver {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: YieldSolverConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &YieldSolverConfig {
        &self.config
    }

    /// Solves from the configured initial guess.
    pub fn solve(&self, timeline: &Timeline) -> TasaResult<f64> {
        self.solve_from(timeline, self.config.initial_guess)
    }

    /// Solves from an explicit initial guess.
    pub fn solve_from(&self, timeline: &Timeline, initial_guess: f64) -> TasaResult<f64> {
        if !initial_guess.is_finite() || initial_guess <= RATE_FLOOR {
            return Err(TasaError::convergence(
                0,
                format!("initial guess {initial_guess} is outside the rate domain (-1, inf)"),
            ));
        }

        let flows = discounted_flows(timeline);
        let objective = |rate: f64| flows.npv(rate);
        let solver_config = SolverConfig::new(self.config.tolerance, self.config.max_iterations);

        let result = secant_with_fallback(
            objective,
            initial_guess,
            self.config.secant_step,
            Some(RATE_FLOOR),
            &solver_config,
        )
        .map_err(|e| self.convergence_error(&e))?;

        let residual = flows.npv(result.root);
        if !residual.is_finite() || residual.abs() >= self.config.npv_tolerance {
            return Err(TasaError::convergence(
                result.iterations,
                format!(
                    "NPV at rate {} is {residual:e}, above tolerance {:e}",
                    result.root, self.config.npv_tolerance
                ),
            ));
        }

        log::debug!(
            "irr {} after {} iterations (npv {residual:e})",
            result.root,
            result.iterations
        );
        Ok(result.root)
    }

    fn convergence_error(&self, err: &MathError) -> TasaError {
        let iterations = match err {
            MathError::ConvergenceFailed { iterations, .. } => *iterations,
            _ => self.config.max_iterations,
        };
        TasaError::convergence(iterations, err.to_string())
    }
}
