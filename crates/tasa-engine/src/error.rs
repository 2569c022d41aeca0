//! Engine error types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tasa_core::TasaError;
use tasa_traits::TraitError;

/// Per-ticker valuation stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Quote retrieval
    FetchPrice,
    /// Schedule lookup and purchase insertion
    BuildTimeline,
    /// IRR root finding
    SolveYield,
    /// Macaulay and modified duration
    ComputeDurations,
    /// Result record assembly
    AssembleResult,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::FetchPrice => "fetch_price",
            Stage::BuildTimeline => "build_timeline",
            Stage::SolveYield => "solve_yield",
            Stage::ComputeDurations => "compute_durations",
            Stage::AssembleResult => "assemble_result",
        };
        f.write_str(name)
    }
}

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaultKind {
    /// The data needed was absent or unreachable.
    MissingData,
    /// The data was there but unusable.
    BadInput,
    /// The inputs were fine but the numerics failed.
    Computation,
    /// The run was cancelled first.
    Cancelled,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaultKind::MissingData => "missing_data",
            FaultKind::BadInput => "bad_input",
            FaultKind::Computation => "computation",
            FaultKind::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Engine error type.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Price or schedule source error
    #[error("source error: {0}")]
    Source(#[from] TraitError),

    /// Valuation analytics error
    #[error(transparent)]
    Valuation(#[from] TasaError),

    /// Quote text that is not a number
    #[error("price is not a number: '{raw}'")]
    NotANumber {
        /// Text as quoted
        raw: String,
    },

    /// Price retrieval exceeded its time budget
    #[error("price retrieval timed out after {0:?}")]
    Timeout(Duration),

    /// Run was cancelled
    #[error("valuation cancelled")]
    Cancelled,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Classifies this error.
    pub fn fault_kind(&self) -> FaultKind {
        match self {
            EngineError::Source(e) => match e {
                TraitError::ConnectionFailed(_)
                | TraitError::NotFound(_)
                | TraitError::SourceNotAvailable(_)
                | TraitError::Timeout
                | TraitError::IoError(_) => FaultKind::MissingData,
                TraitError::ParseError(_)
                | TraitError::ScheduleParse { .. }
                | TraitError::InvalidInput(_) => FaultKind::BadInput,
            },
            EngineError::Valuation(e) => match e {
                TasaError::NotFound { .. } => FaultKind::MissingData,
                TasaError::ScheduleParse { .. }
                | TasaError::Schedule { .. }
                | TasaError::InvalidPrice { .. }
                | TasaError::InvalidDate { .. } => FaultKind::BadInput,
                TasaError::Convergence { .. } | TasaError::Duration { .. } => {
                    FaultKind::Computation
                }
            },
            EngineError::Timeout(_) => FaultKind::MissingData,
            EngineError::NotANumber { .. } | EngineError::ConfigError(_) => FaultKind::BadInput,
            EngineError::Cancelled => FaultKind::Cancelled,
            EngineError::Internal(_) => FaultKind::Computation,
        }
    }
}
