//! Market data source traits.
//!
//! - [`PriceSource`]: current price of a ticker
//! - [`ParsedPrice`]: explicit outcome of turning quoted text into a number

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TraitError;
use crate::ids::Ticker;

/// Source type for market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Scraped from a remote HTML document
    Web,
    /// File-based (CSV)
    File,
    /// Manual entry or in-memory
    Manual,
}

/// Outcome of parsing a quoted price.
///
/// Unparsable text is kept as [`ParsedPrice::NotANumber`] instead of being
/// turned into NaN, so callers decide how to treat it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParsedPrice {
    /// A finite price.
    Value(f64),
    /// The quoted text did not hold a finite number.
    NotANumber {
        /// Text as received, before normalization.
        raw: String,
    },
}

impl ParsedPrice {
    /// Parses quoted text, accepting a comma as decimal separator.
    ///
    /// Surrounding whitespace is ignored. Text that parses to NaN or
    /// infinity is not a price.
    ///
    /// ```rust
    /// use tasa_traits::ParsedPrice;
    ///
    /// assert_eq!(ParsedPrice::parse("71,35"), ParsedPrice::Value(71.35));
    /// assert!(!ParsedPrice::parse("s/c").is_value());
    /// ```
    pub fn parse(text: &str) -> Self {
        let normalized = text.trim().replace(',', ".");
        match normalized.parse::<f64>() {
            Ok(value) if value.is_finite() => ParsedPrice::Value(value),
            _ => ParsedPrice::NotANumber {
                raw: text.to_string(),
            },
        }
    }

    /// Returns the price, if it is one.
    pub fn value(&self) -> Option<f64> {
        match self {
            ParsedPrice::Value(v) => Some(*v),
            ParsedPrice::NotANumber { .. } => None,
        }
    }

    /// Returns true for a finite price.
    pub fn is_value(&self) -> bool {
        matches!(self, ParsedPrice::Value(_))
    }
}

impl fmt::Display for ParsedPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedPrice::Value(v) => write!(f, "{v}"),
            ParsedPrice::NotANumber { raw } => write!(f, "NaN ({raw:?})"),
        }
    }
}

/// Trait for price providers.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Get the current price of `ticker`.
    ///
    /// Fails with [`TraitError::NotFound`] when the source has no quote for
    /// the ticker at all; a quote that is present but not numeric is
    /// returned as [`ParsedPrice::NotANumber`].
    async fn price(&self, ticker: &Ticker) -> Result<ParsedPrice, TraitError>;
}
