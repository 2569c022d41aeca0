//! # Tasa Core
//!
//! Core types, time arithmetic, and the error taxonomy for the Tasa bond
//! valuation engine.
//!
//! This crate provides the foundational building blocks used throughout Tasa:
//!
//! - **Types**: [`CashFlowEvent`], [`Timeline`] and [`EventKind`]
//! - **Time Basis**: Year fractions on a fixed 365-day year ([`TimeBasis`])
//! - **Errors**: [`TasaError`], shared by every calculation crate
//!
//! ## Example
//!
//! ```rust
//! use tasa_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let coupon = CashFlowEvent::scheduled(
//!     chrono::NaiveDate::from_ymd_opt(2026, 1, 9).unwrap(),
//!     dec!(0.375),
//!     dec!(4),
//! );
//! assert_eq!(coupon.amount(), dec!(4.375));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod time_basis;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{TasaError, TasaResult};
    pub use crate::time_basis::TimeBasis;
    pub use crate::types::{CashFlowEvent, EventKind, Timeline};
}

pub use error::{TasaError, TasaResult};
pub use time_basis::TimeBasis;
pub use types::{CashFlowEvent, EventKind, Timeline};
