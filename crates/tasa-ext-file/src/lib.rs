//! # Tasa Ext File
//!
//! File-based schedule and price sources for the Tasa valuation pipeline.
//!
//! - [`CsvScheduleSource`]: one `<TICKER>.DAT` payment schedule per instrument
//! - [`CsvPriceSource`]: `ticker,price` rows for offline runs and tests

#![warn(missing_docs)]
#![warn(clippy::all)]

mod market_data;
mod reference_data;

pub use market_data::*;
pub use reference_data::*;
