//! # Tasa Ext Web
//!
//! Web price source for the Tasa valuation pipeline.
//!
//! Prices are scraped from a market site's per-ticker quote page. Each site
//! is described by a [`SiteAdapter`]: a URL template, a CSS selector and
//! which match holds the price.
//!
//! - [`Site`]: built-in sites ([`Site::Rava`], [`Site::Eco`]) or a custom adapter
//! - [`WebPriceSource`]: [`PriceSource`](tasa_traits::PriceSource) over HTTP
//! - [`extract_price`]: the HTML-to-price step on its own

#![warn(missing_docs)]
#![warn(clippy::all)]

mod scrape;
mod site;

pub use scrape::{extract_price, WebPriceSource, DEFAULT_REQUEST_TIMEOUT};
pub use site::{Site, SiteAdapter, TICKER_PLACEHOLDER};
