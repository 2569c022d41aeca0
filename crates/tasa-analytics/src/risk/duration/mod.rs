//! Duration analytics.
//!
//! - [`macaulay_duration`]: PV-weighted average time of the flows after purchase
//! - [`modified_duration`]: Macaulay duration adjusted for compounding
//! - [`DurationCalculator`]: both at once, with a fixed compounding frequency

mod macaulay;
mod modified;

pub use macaulay::macaulay_duration;
pub use modified::modified_duration;

use serde::{Deserialize, Serialize};
use tasa_core::{TasaResult, Timeline};

/// Compounding periods per year used for modified duration by default.
pub const DEFAULT_COMPOUNDING_PERIODS: f64 = 2.0;

/// Macaulay and modified duration of one timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Durations {
    /// Macaulay duration in years.
    pub macaulay: f64,
    /// Modified duration in years.
    pub modified: f64,
}

/// Computes durations with a fixed compounding frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationCalculator {
    periods: f64,
}

impl Default for DurationCalculator {
    fn default() -> Self {
        Self {
            periods: DEFAULT_COMPOUNDING_PERIODS,
        }
    }
}

impl DurationCalculator {
    /// Creates a calculator compounding `periods` times per year.
    #[must_use]
    pub fn new(periods: f64) -> Self {
        Self { periods }
    }

    /// Returns the compounding periods per year.
    #[must_use]
    pub fn periods(&self) -> f64 {
        self.periods
    }

    /// Macaulay duration of `timeline` at `irr`.
    pub fn macaulay(&self, timeline: &Timeline, irr: f64) -> TasaResult<f64> {
        macaulay_duration(timeline, irr)
    }

    /// Modified duration from a Macaulay duration.
    pub fn modified(&self, macaulay: f64, irr: f64) -> TasaResult<f64> {
        modified_duration(macaulay, irr, self.periods)
    }

    /// Both durations of `timeline` at `irr`.
    pub fn compute(&self, timeline: &Timeline, irr: f64) -> TasaResult<Durations> {
        let macaulay = self.macaulay(timeline, irr)?;
        let modified = self.modified(macaulay, irr)?;
        Ok(Durations { macaulay, modified })
    }
}
