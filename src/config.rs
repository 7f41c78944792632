//! Browser configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `CATALOG_API_URL` - Catalog endpoint (default: `https://fakestoreapi.com/products`)
//! - `CATALOG_LOG` - Tracing filter used when `RUST_LOG` is unset (default: info)

use thiserror::Error;

use crate::DEFAULT_API_URL;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Endpoint returning the JSON product array
    pub api_url: reqwest::Url,
    /// Default tracing filter
    pub log_filter: String,
}

impl BrowserConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `CATALOG_API_URL` is not an absolute http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::var("CATALOG_API_URL").ok(), std::env::var("CATALOG_LOG").ok())
    }

    fn from_vars(api_url: Option<String>, log_filter: Option<String>) -> Result<Self, ConfigError> {
        let raw = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = reqwest::Url::parse(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".into(), e.to_string()))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "CATALOG_API_URL".into(),
                format!("unsupported scheme `{}`", api_url.scheme()),
            ));
        }

        Ok(Self {
            api_url,
            log_filter: log_filter.filter(|s| !s.trim().is_empty()).unwrap_or_else(|| "info".to_string()),
        })
    }
}
