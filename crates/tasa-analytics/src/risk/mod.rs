//! Risk analytics for cash-flow timelines.
//!
//! - **Duration**: Macaulay and modified duration at a solved IRR

pub mod duration;

pub use duration::{macaulay_duration, modified_duration, DurationCalculator, Durations};
