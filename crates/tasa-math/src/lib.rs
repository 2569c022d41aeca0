//! # Tasa Math
//!
//! Derivative-free root finders for the Tasa bond valuation engine.
//!
//! This crate provides:
//!
//! - **Solvers**: secant and Brent root finders
//! - **Bracketing**: automatic bracket search bounded by a domain floor
//! - **Fallback**: secant seeded from a guess with a Brent fallback
//!
//! Objective functions may return non-finite values outside their domain
//! (for example a discount factor undefined below some rate). Every solver
//! here treats a non-finite evaluation as a hard error instead of iterating
//! on NaN.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        brent, find_bracket, secant, secant_with_fallback, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
