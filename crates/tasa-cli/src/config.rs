//! Configuration file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tasa_engine::{PipelineConfig, DEFAULT_TICKERS};
use tasa_ext_web::{Site, SiteAdapter};

use crate::error::{CliError, CliResult};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "tasa.toml";

/// Contents of `tasa.toml`.
///
/// ```toml
/// site = "quotes"
/// data_dir = "data"
/// tickers = ["AL30", "GD30"]
///
/// [pipeline]
/// dollar_denominated = true
///
/// [sites.quotes]
/// endpoint_template = "https://quotes.example.com/{ticker}"
/// selector = "span.last"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasaConfig {
    /// Price site: a built-in name or a key of `sites`
    #[serde(default = "default_site")]
    pub site: String,

    /// Directory holding `<TICKER>.DAT` schedules
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Offline prices (`ticker,price` CSV) used instead of the site
    pub prices_file: Option<PathBuf>,

    /// Tickers valued when none are given on the command line
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,

    /// Pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Custom site adapters by name
    #[serde(default)]
    pub sites: BTreeMap<String, SiteAdapter>,
}

fn default_site() -> String {
    "rava".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_tickers() -> Vec<String> {
    DEFAULT_TICKERS.iter().map(|t| (*t).to_string()).collect()
}

impl Default for TasaConfig {
    fn default() -> Self {
        Self {
            site: default_site(),
            data_dir: default_data_dir(),
            prices_file: None,
            tickers: default_tickers(),
            pipeline: PipelineConfig::default(),
            sites: BTreeMap::new(),
        }
    }
}

impl TasaConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
    }

    fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads `path`, else [`DEFAULT_CONFIG_FILE`] if present, else defaults.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading configuration");
                Self::from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                tracing::info!(path = DEFAULT_CONFIG_FILE, "loading configuration");
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    /// Resolves a site name; configured sites shadow built-in ones.
    pub fn resolve_site(&self, name: &str) -> CliResult<Site> {
        if let Some(adapter) = self.sites.get(name) {
            adapter.validate()?;
            return Ok(Site::Custom(adapter.clone()));
        }
        name.parse::<Site>()
            .map_err(|_| CliError::UnknownSite(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TasaConfig::from_toml("").unwrap();
        assert_eq!(config.site, "rava");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.tickers, vec!["AL29", "AL30", "AL35", "AE38", "AL41"]);
        assert_eq!(config.pipeline, PipelineConfig::default());
        assert!(config.pipeline.dollar_denominated);
        assert!(config.prices_file.is_none());
    }

    #[test]
    fn test_custom_site() {
        let config = TasaConfig::from_toml(
            r#"
            site = "quotes"
            tickers = ["GD30"]

            [pipeline]
            dollar_denominated = true
            price_timeout_ms = 2500

            [sites.quotes]
            endpoint_template = "https://quotes.example.com/{ticker}"
            selector = "span.last"
            result_index = 1
            "#,
        )
        .unwrap();

        assert!(config.pipeline.dollar_denominated);
        assert_eq!(config.pipeline.price_timeout_ms, 2500);
        assert_eq!(config.pipeline.periods, 2.0);

        let site = config.resolve_site(&config.site).unwrap();
        assert_eq!(site.adapter().result_index, 1);
        assert_eq!(config.resolve_site("eco").unwrap(), Site::Eco);
        assert!(matches!(
            config.resolve_site("bolsar"),
            Err(CliError::UnknownSite(_))
        ));
    }

    #[test]
    fn test_invalid_custom_site_rejected() {
        let config = TasaConfig::from_toml(
            r#"
            [sites.broken]
            endpoint_template = "https://quotes.example.com/"
            selector = "span"
            "#,
        )
        .unwrap();
        assert!(config.resolve_site("broken").is_err());
    }
}
