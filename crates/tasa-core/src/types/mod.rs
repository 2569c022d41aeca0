//! Domain types for bond valuation.
//!
//! - [`CashFlowEvent`]: a dated interest and principal payment
//! - [`EventKind`]: whether an event comes from the schedule or is the purchase
//! - [`Timeline`]: date-ordered events anchoring a valuation

mod cashflow;

pub use cashflow::{CashFlowEvent, EventKind, Timeline};
