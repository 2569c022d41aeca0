//! # Tasa Traits
//!
//! Trait definitions for the Tasa valuation pipeline.
//!
//! This crate contains ONLY trait definitions and the identifier and outcome
//! types they exchange. Implementations live in the extension crates
//! (`tasa-ext-file`, `tasa-ext-web`).
//!
//! ## Module Structure
//!
//! - [`market_data`]: Price sources and parsed price outcomes
//! - [`reference_data`]: Payment schedule sources
//! - [`ids`]: Ticker identifiers
//!
//! ## Dependency Injection
//!
//! The valuation pipeline uses these traits via dependency injection:
//!
//! ```ignore
//! ValuationPipelineBuilder::new()
//!     .with_prices(impl PriceSource)
//!     .with_schedules(impl ScheduleSource)
//!     .build()
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ids;
pub mod market_data;
pub mod reference_data;

// Re-export commonly used types
pub use error::TraitError;
pub use ids::*;
pub use market_data::{ParsedPrice, PriceSource, SourceType};
pub use reference_data::ScheduleSource;
