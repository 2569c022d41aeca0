//! Year fractions on a fixed 365-day year.
//!
//! All time offsets in a valuation are measured from the first event of a
//! [`Timeline`] in units of 365-day years. The computation uses the exact
//! elapsed time between timestamps (sub-second precision) and never adjusts
//! for leap years.
//!
//! # Formula
//!
//! $$\text{Year Fraction} = \frac{\text{elapsed seconds}}{60 \cdot 60 \cdot 24 \cdot 365}$$

use chrono::NaiveDateTime;

use crate::types::Timeline;

/// Actual/365 Fixed time basis over timestamps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeBasis;

impl TimeBasis {
    /// Seconds in a 365-day year.
    pub const SECONDS_PER_YEAR: f64 = 60.0 * 60.0 * 24.0 * 365.0;

    /// Returns the year fraction from `anchor` to `date`.
    ///
    /// Negative when `date` precedes `anchor`. `year_fraction(a, a)` is 0.
    #[must_use]
    pub fn year_fraction(date: NaiveDateTime, anchor: NaiveDateTime) -> f64 {
        let elapsed = date - anchor;
        let seconds = elapsed.num_seconds() as f64 + f64::from(elapsed.subsec_nanos()) * 1e-9;
        seconds / Self::SECONDS_PER_YEAR
    }

    /// Returns one year fraction per event, anchored on the first event.
    ///
    /// The anchor's own offset is exactly 0.
    #[must_use]
    pub fn year_fractions(timeline: &Timeline) -> Vec<f64> {
        let Some(anchor) = timeline.anchor() else {
            return Vec::new();
        };
        timeline
            .events()
            .iter()
            .map(|event| Self::year_fraction(event.date(), anchor))
            .collect()
    }
}
