//! Net present value and internal rate of return.
//!
//! Flows are discounted on annual compounding over 365-day year fractions
//! measured from the timeline anchor:
//!
//! ```text
//! NPV(r) = Σ (interest_i + principal_i) / (1 + r)^t_i
//! ```
//!
//! The IRR is the rate where `NPV(r) = 0`. Rates at or below -100% are
//! outside the domain; [`npv`] reports them as NaN and [`YieldSolver`]
//! never returns one.

mod npv;
mod solver;

pub use npv::npv;
pub use solver::{YieldSolver, YieldSolverConfig};

pub(crate) use npv::{discounted_flows, DiscountedFlows};
