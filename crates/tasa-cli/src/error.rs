//! CLI error types.

use thiserror::Error;

use tasa_core::TasaError;
use tasa_engine::EngineError;
use tasa_traits::TraitError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: {0}. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS.")]
    InvalidDate(String),

    /// Site name that is neither built in nor configured.
    #[error("Unknown site '{0}'. Use rava, eco, or a name under [sites] in the config file.")]
    UnknownSite(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Price or schedule source error.
    #[error(transparent)]
    Source(#[from] TraitError),

    /// Valuation error.
    #[error(transparent)]
    Valuation(#[from] TasaError),

    /// Pipeline error.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
