//! # Tasa Engine
//!
//! Concurrent valuation pipeline for Tasa.
//!
//! For each ticker the pipeline runs
//!
//! ```text
//! FetchPrice ─> BuildTimeline ─> SolveYield ─> ComputeDurations ─> AssembleResult
//! ```
//!
//! and collects what every ticker reached into a [`ValuationRun`]. Tickers
//! are independent: one that fails is recorded with its [`Stage`] and
//! [`FaultKind`] while the rest complete.
//!
//! ## Usage
//!
//! ```ignore
//! let pipeline = ValuationPipeline::builder()
//!     .with_prices(Arc::new(WebPriceSource::new(Site::Rava)?))
//!     .with_schedules(Arc::new(CsvScheduleSource::new("data")?))
//!     .with_config(PipelineConfig::default())
//!     .build()?;
//!
//! let run = pipeline.update_default().await;
//! for (ticker, result) in run.results() {
//!     println!("{ticker}: {:.2}%", result.irr * 100.0);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;

// Re-exports
pub use builder::ValuationPipelineBuilder;
pub use config::PipelineConfig;
pub use context::{Failure, ValuationResult, ValuationRun};
pub use error::{EngineError, FaultKind, Stage};
pub use pipeline::{default_tickers, CancelHandle, ValuationPipeline, DEFAULT_TICKERS};
