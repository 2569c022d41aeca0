//! Identifier types used across the valuation pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix a market appends to quote a bond in dollars.
pub const DOLLAR_SUFFIX: &str = "D";

/// Instrument ticker symbol (e.g. `AL30`).
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(pub String);

impl Ticker {
    /// Create a new ticker.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ticker as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ticker of the dollar-denominated line (`AL30` -> `AL30D`).
    pub fn dollar_denominated(&self) -> Ticker {
        Ticker(format!("{}{}", self.0, DOLLAR_SUFFIX))
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Ticker {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Ticker {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
