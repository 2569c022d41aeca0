//! File-based price source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;

use tasa_traits::error::TraitError;
use tasa_traits::ids::Ticker;
use tasa_traits::market_data::{ParsedPrice, PriceSource, SourceType};

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// CSV record for prices.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    ticker: String,
    price: String,
}

/// CSV-based price source for offline runs.
///
/// The file has a `ticker,price` header. Prices use the same text rules as
/// scraped quotes, so `61,35` is accepted and `-` is kept as
/// [`ParsedPrice::NotANumber`].
pub struct CsvPriceSource {
    file_path: PathBuf,
    prices: DashMap<Ticker, ParsedPrice>,
}

impl CsvPriceSource {
    /// Create a new CSV price source.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            prices: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload prices from file.
    pub fn reload(&self) -> Result<(), TraitError> {
        if !self.file_path.exists() {
            tracing::warn!(path = %self.file_path.display(), "price file not found, source is empty");
            return Ok(());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        self.prices.clear();
        for result in reader.deserialize() {
            let record: PriceRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            self.prices
                .insert(Ticker::new(record.ticker), ParsedPrice::parse(&record.price));
        }

        tracing::debug!(
            path = %self.file_path.display(),
            count = self.prices.len(),
            "loaded prices"
        );
        Ok(())
    }

    /// Number of tickers with a quote.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no quotes are loaded.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn price(&self, ticker: &Ticker) -> Result<ParsedPrice, TraitError> {
        self.prices
            .get(ticker)
            .map(|p| p.clone())
            .ok_or_else(|| TraitError::NotFound(format!("no price for {ticker}")))
    }
}
