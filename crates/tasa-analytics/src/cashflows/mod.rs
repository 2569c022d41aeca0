//! Cash-flow timeline construction.
//!
//! A [`Timeline`](tasa_core::Timeline) for valuation is an instrument's
//! payment schedule with one purchase event merged in at the valuation date.

mod builder;

pub use builder::CashFlowBuilder;
