//! Root-finding algorithms.
//!
//! - [`secant`]: derivative-free, superlinear, needs two starting points
//! - [`brent`]: guaranteed convergence inside a sign-changing bracket
//! - [`find_bracket`]: expands outward from a guess until the sign changes
//! - [`secant_with_fallback`]: secant first, then bracket search and Brent
//!
//! | Solver | Speed | Reliability | Requires |
//! |--------|-------|-------------|----------|
//! | Secant | Fast (superlinear) | May diverge | Two guesses |
//! | Brent | Fast (superlinear) | Guaranteed | Bracket |
//! | Fallback | Fast | Guaranteed* | Initial guess |
//!
//! *When a bracket can be found above the domain floor.
//!
//! # Example
//!
//! ```rust
//! use tasa_math::solvers::{secant_with_fallback, SolverConfig};
//!
//! // Pay 100 today, receive 110 in one year
//! let npv = |r: f64| -100.0 + 110.0 / (1.0 + r);
//!
//! let result = secant_with_fallback(npv, 0.05, 0.01, Some(-1.0), &SolverConfig::default()).unwrap();
//! assert!((result.root - 0.10).abs() < 1e-10);
//! ```

mod bracket;
mod brent;
mod fallback;
mod secant;

pub use bracket::find_bracket;
pub use brent::brent;
pub use fallback::secant_with_fallback;
pub use secant::secant;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solver_config() {
        let config = SolverConfig::default()
            .with_tolerance(1e-8)
            .with_max_iterations(50);

        assert!((config.tolerance - 1e-8).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 50);
    }

    /// Annual-pay bond price at a flat yield.
    fn bond_price(yield_rate: f64, coupon: f64, face: f64, years: i32) -> f64 {
        let mut pv = 0.0;
        for t in 1..=years {
            pv += coupon / (1.0 + yield_rate).powi(t);
        }
        pv + face / (1.0 + yield_rate).powi(years)
    }

    #[test]
    fn test_ytm_par_bond() {
        let f = |y: f64| bond_price(y, 5.0, 100.0, 10) - 100.0;

        let result = secant(f, 0.04, 0.06, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, 0.05, epsilon = 1e-10);
    }

    #[test]
    fn test_solvers_agree() {
        let f = |y: f64| bond_price(y, 6.0, 100.0, 7) - 98.0;
        let config = SolverConfig::default();

        let brent_result = brent(f, 0.0, 0.20, &config).unwrap();
        let secant_result = secant(f, 0.05, 0.07, &config).unwrap();
        let fallback_result = secant_with_fallback(f, 0.10, 0.01, Some(-1.0), &config).unwrap();

        assert_relative_eq!(brent_result.root, secant_result.root, epsilon = 1e-8);
        assert_relative_eq!(brent_result.root, fallback_result.root, epsilon = 1e-8);
    }
}
