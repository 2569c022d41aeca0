//! HTTP fetch and HTML price extraction.

use std::time::Duration;

use async_trait::async_trait;
use scraper::Html;

use tasa_traits::error::TraitError;
use tasa_traits::ids::Ticker;
use tasa_traits::market_data::{ParsedPrice, PriceSource, SourceType};

use crate::site::{Site, SiteAdapter};

/// Request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("tasa/", env!("CARGO_PKG_VERSION"));

/// Extracts the price from a quote page.
///
/// Elements matching `adapter.selector` are taken in document order; those
/// with blank text are skipped. The text of match number `adapter.result_index`
/// is parsed with [`ParsedPrice::parse`]. Fails with
/// [`TraitError::NotFound`] when there are not enough matches.
///
/// ```rust
/// use tasa_ext_web::{extract_price, Site};
/// use tasa_traits::ParsedPrice;
///
/// let html = "<table><tr><td><span>61,35</span></td></tr></table>";
/// let price = extract_price(html, &Site::Rava.adapter()).unwrap();
/// assert_eq!(price, ParsedPrice::Value(61.35));
/// ```
pub fn extract_price(html: &str, adapter: &SiteAdapter) -> Result<ParsedPrice, TraitError> {
    let selector = adapter.compile_selector()?;
    let document = Html::parse_document(html);

    let matches: Vec<String> = document
        .select(&selector)
        .map(|element| element.text().collect::<String>())
        .filter(|text| !text.trim().is_empty())
        .collect();

    let text = matches.get(adapter.result_index).ok_or_else(|| {
        TraitError::NotFound(format!(
            "selector '{}' matched {} elements, wanted index {}",
            adapter.selector,
            matches.len(),
            adapter.result_index
        ))
    })?;

    Ok(ParsedPrice::parse(text))
}

/// Price source scraping a market site over HTTP.
pub struct WebPriceSource {
    client: reqwest::Client,
    site: Site,
    adapter: SiteAdapter,
}

impl WebPriceSource {
    /// Create a source for `site` with the default request timeout.
    pub fn new(site: Site) -> Result<Self, TraitError> {
        Self::with_timeout(site, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a source for `site` whose requests give up after `timeout`.
    pub fn with_timeout(site: Site, timeout: Duration) -> Result<Self, TraitError> {
        let adapter = site.adapter();
        adapter.validate()?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TraitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            site,
            adapter,
        })
    }

    /// The site this source scrapes.
    pub fn site(&self) -> &Site {
        &self.site
    }

    async fn fetch(&self, url: &str) -> Result<String, TraitError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| map_reqwest_error(url, &e))?;

        response.text().await.map_err(|e| map_reqwest_error(url, &e))
    }
}

fn map_reqwest_error(url: &str, e: &reqwest::Error) -> TraitError {
    if e.is_timeout() {
        TraitError::Timeout
    } else if e.status() == Some(reqwest::StatusCode::NOT_FOUND) {
        TraitError::NotFound(url.to_string())
    } else {
        TraitError::ConnectionFailed(format!("{url}: {e}"))
    }
}

#[async_trait]
impl PriceSource for WebPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Web
    }

    async fn price(&self, ticker: &Ticker) -> Result<ParsedPrice, TraitError> {
        let url = self.adapter.url_for(ticker);
        tracing::debug!(site = %self.site, ticker = %ticker, url = %url, "fetching price");

        let body = self.fetch(&url).await?;
        let price = extract_price(&body, &self.adapter)?;

        if let ParsedPrice::NotANumber { raw } = &price {
            tracing::warn!(ticker = %ticker, raw = %raw, "quoted price is not a number");
        }
        Ok(price)
    }
}
