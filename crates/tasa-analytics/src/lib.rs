//! # Tasa Analytics
//!
//! Valuation analytics over cash-flow timelines.
//!
//! - **Cash Flows**: merge a purchase event into an instrument's schedule
//! - **Yields**: NPV and the internal rate of return implied by a price
//! - **Risk**: Macaulay and modified duration at the solved rate
//!
//! ## Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use tasa_analytics::prelude::*;
//! use tasa_core::CashFlowEvent;
//!
//! let schedule = vec![CashFlowEvent::scheduled(
//!     NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
//!     dec!(10),
//!     dec!(100),
//! )];
//! let bought = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//!
//! let timeline = CashFlowBuilder::with_purchase_price(&schedule, 100.0, Some(bought)).unwrap();
//! let irr = YieldSolver::default().solve(&timeline).unwrap();
//! let durations = DurationCalculator::default().compute(&timeline, irr).unwrap();
//!
//! assert!((irr - 0.10).abs() < 1e-9);
//! assert!((durations.macaulay - 1.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cashflows;
pub mod risk;
pub mod yields;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::CashFlowBuilder;
    pub use crate::risk::duration::{
        macaulay_duration, modified_duration, DurationCalculator, Durations,
        DEFAULT_COMPOUNDING_PERIODS,
    };
    pub use crate::yields::{npv, YieldSolver, YieldSolverConfig};
}
