//! Site adapters.

use std::fmt;
use std::str::FromStr;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use tasa_traits::error::TraitError;
use tasa_traits::ids::Ticker;

/// Placeholder replaced by the ticker in an endpoint template.
pub const TICKER_PLACEHOLDER: &str = "{ticker}";

/// Where and how to find a ticker's price on a site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteAdapter {
    /// Quote page URL containing [`TICKER_PLACEHOLDER`].
    pub endpoint_template: String,
    /// CSS selector matching candidate price elements.
    pub selector: String,
    /// Which match (in document order) holds the price.
    ///
    /// A match's text is the concatenation of all its descendant text
    /// nodes, not only its direct children, so `<span><b>61</b>,35</span>`
    /// reads as `61,35`. Matches whose text is blank are not counted.
    #[serde(default)]
    pub result_index: usize,
}

impl SiteAdapter {
    /// Create a new adapter.
    pub fn new(
        endpoint_template: impl Into<String>,
        selector: impl Into<String>,
        result_index: usize,
    ) -> Self {
        Self {
            endpoint_template: endpoint_template.into(),
            selector: selector.into(),
            result_index,
        }
    }

    /// Quote page URL for `ticker`.
    pub fn url_for(&self, ticker: &Ticker) -> String {
        self.endpoint_template
            .replace(TICKER_PLACEHOLDER, ticker.as_str())
    }

    /// Compile the CSS selector.
    pub fn compile_selector(&self) -> Result<Selector, TraitError> {
        Selector::parse(&self.selector).map_err(|e| {
            TraitError::InvalidInput(format!("bad selector '{}': {e:?}", self.selector))
        })
    }

    /// Check the template has a ticker placeholder and the selector parses.
    pub fn validate(&self) -> Result<(), TraitError> {
        if !self.endpoint_template.contains(TICKER_PLACEHOLDER) {
            return Err(TraitError::InvalidInput(format!(
                "endpoint template '{}' has no {TICKER_PLACEHOLDER} placeholder",
                self.endpoint_template
            )));
        }
        self.compile_selector().map(|_| ())
    }
}

/// A site to scrape prices from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Site {
    /// rava.com company profile pages
    Rava,
    /// bonos.ecobolsar.com.ar ticker pages
    Eco,
    /// Any other site
    Custom(SiteAdapter),
}

impl Site {
    /// Adapter describing this site.
    pub fn adapter(&self) -> SiteAdapter {
        match self {
            Site::Rava => SiteAdapter::new(
                "http://www.rava.com/empresas/perfil.php?e={ticker}",
                "td > span",
                0,
            ),
            Site::Eco => SiteAdapter::new(
                "http://bonos.ecobolsar.com.ar/eco/ticker.php?t={ticker}",
                "td.precioticker",
                0,
            ),
            Site::Custom(adapter) => adapter.clone(),
        }
    }

    /// Short name used in configuration and logs.
    pub fn name(&self) -> &str {
        match self {
            Site::Rava => "rava",
            Site::Eco => "eco",
            Site::Custom(_) => "custom",
        }
    }
}

impl Default for Site {
    fn default() -> Self {
        Site::Rava
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Site {
    type Err = TraitError;

    /// Parses a built-in site name; custom sites come from configuration.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rava" => Ok(Site::Rava),
            "eco" => Ok(Site::Eco),
            other => Err(TraitError::NotFound(format!("unknown site '{other}'"))),
        }
    }
}
