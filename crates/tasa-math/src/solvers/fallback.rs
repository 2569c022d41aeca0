//! Secant solver with a bracketing fallback.

use crate::error::{MathError, MathResult};
use crate::solvers::{brent, find_bracket, secant, SolverConfig, SolverResult};

/// Secant method seeded at `initial_guess` and `initial_guess + step`,
/// falling back to a bracket search followed by Brent's method.
///
/// The secant result is kept only when its residual is below the configured
/// tolerance and its root lies above `floor`. Otherwise the search restarts
/// from `initial_guess` with [`find_bracket`] and [`brent`].
///
/// # Arguments
///
/// * `f` - The function for which to find a root
/// * `initial_guess` - Starting point for both phases
/// * `step` - Offset of the second secant seed
/// * `floor` - Exclusive lower edge of the function's domain, if any
/// * `config` - Solver configuration shared by both phases
pub fn secant_with_fallback<F>(
    f: F,
    initial_guess: f64,
    step: f64,
    floor: Option<f64>,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
{
    if !initial_guess.is_finite() {
        return Err(MathError::invalid_input("initial guess must be finite"));
    }
    if let Some(floor) = floor {
        if initial_guess <= floor {
            return Err(MathError::invalid_input(format!(
                "initial guess {initial_guess} is not above floor {floor}"
            )));
        }
    }

    let in_domain = |x: f64| floor.map_or(true, |floor| x > floor);

    match secant(&f, initial_guess, initial_guess + step, config) {
        Ok(result) if result.residual.abs() < config.tolerance && in_domain(result.root) => {
            return Ok(result);
        }
        Ok(result) => {
            log::debug!(
                "secant settled at {} with residual {:.2e}, trying bracket search",
                result.root,
                result.residual
            );
        }
        Err(e) => {
            log::debug!("secant failed ({e}), trying bracket search");
        }
    }

    let (low, high) = find_bracket(&f, initial_guess, floor)?;
    let result = brent(&f, low, high, config)?;
    log::debug!(
        "brent converged to {} in {} iterations on [{low}, {high}]",
        result.root,
        result.iterations
    );
    Ok(result)
}
