//! Error types for the Tasa valuation engine.
//!
//! The taxonomy separates "no usable data" faults from computational faults
//! so that callers can tell bad input apart from bad market or model
//! conditions. See [`TasaError::is_computational`].

use thiserror::Error;

/// A specialized Result type for Tasa operations.
pub type TasaResult<T> = Result<T, TasaError>;

/// The main error type for Tasa operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TasaError {
    /// A schedule row could not be parsed.
    #[error("Schedule parse error at line {line}: {reason}")]
    ScheduleParse {
        /// One-based line number of the offending row (0 when not row-specific).
        line: usize,
        /// Description of what was wrong with the row.
        reason: String,
    },

    /// A ticker, schedule, or price is unknown or missing.
    #[error("Not found: {what}")]
    NotFound {
        /// What could not be found.
        what: String,
    },

    /// The yield solver exceeded its budget or hit an undefined rate.
    #[error("Convergence failed after {iterations} iterations: {reason}")]
    Convergence {
        /// Number of iterations attempted.
        iterations: u32,
        /// Description of the failure (residual, domain violation, ...).
        reason: String,
    },

    /// Duration could not be computed (zero or non-finite denominator).
    #[error("Duration error: {reason}")]
    Duration {
        /// Description of the failure.
        reason: String,
    },

    /// The cash-flow timeline violates a structural precondition.
    #[error("Invalid timeline: {reason}")]
    Schedule {
        /// Description of the violated precondition.
        reason: String,
    },

    /// A price could not be used to build a purchase event.
    #[error("Invalid price: {value} - {reason}")]
    InvalidPrice {
        /// The offending price.
        value: f64,
        /// Reason for invalidity.
        reason: String,
    },

    /// A date could not be parsed or constructed.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },
}

impl TasaError {
    /// Creates a schedule parse error.
    #[must_use]
    pub fn schedule_parse(line: usize, reason: impl Into<String>) -> Self {
        Self::ScheduleParse {
            line,
            reason: reason.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Creates a convergence failure error.
    #[must_use]
    pub fn convergence(iterations: u32, reason: impl Into<String>) -> Self {
        Self::Convergence {
            iterations,
            reason: reason.into(),
        }
    }

    /// Creates a duration error.
    #[must_use]
    pub fn duration(reason: impl Into<String>) -> Self {
        Self::Duration {
            reason: reason.into(),
        }
    }

    /// Creates an invalid timeline error.
    #[must_use]
    pub fn schedule(reason: impl Into<String>) -> Self {
        Self::Schedule {
            reason: reason.into(),
        }
    }

    /// Creates an invalid price error.
    #[must_use]
    pub fn invalid_price(value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidPrice {
            value,
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Returns true for faults raised by the numerics rather than the inputs.
    #[must_use]
    pub fn is_computational(&self) -> bool {
        matches!(self, Self::Convergence { .. } | Self::Duration { .. })
    }
}
