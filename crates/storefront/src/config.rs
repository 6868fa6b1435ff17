//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPFRONT_CATALOG_URL` - Catalog endpoint returning the product list
//!   (default: <https://fakestoreapi.com/products>)
//! - `SHOPFRONT_CATALOG_TIMEOUT_SECS` - Request timeout for the catalog fetch
//!   (default: none)
//! - `SHOPFRONT_DATABASE_URL` - `SQLite` database holding the cart
//!   (default: `sqlite://shopfront.db?mode=rwc`)
//! - `SHOPFRONT_DELIVERY_DAYS` - Days added to today for the shipping estimate
//!   (default: 5)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com/products";
const DEFAULT_DATABASE_URL: &str = "sqlite://shopfront.db?mode=rwc";
const DEFAULT_DELIVERY_DAYS: &str = "5";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// `SQLite` connection URL for the cart store
    pub database_url: String,
    /// Days from today used for the estimated delivery date
    pub delivery_days: u32,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name (e.g., "production")
    pub sentry_environment: Option<String>,
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Endpoint returning the full product list
    pub endpoint: Url,
    /// Request timeout; `None` leaves the request unbounded
    pub timeout: Option<Duration>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog = CatalogConfig::from_lookup(&lookup)?;
        let database_url = get_or_default(&lookup, "SHOPFRONT_DATABASE_URL", DEFAULT_DATABASE_URL);
        let delivery_days = get_or_default(&lookup, "SHOPFRONT_DELIVERY_DAYS", DEFAULT_DELIVERY_DAYS)
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPFRONT_DELIVERY_DAYS".to_string(), e.to_string())
            })?;

        Ok(Self {
            catalog,
            database_url,
            delivery_days,
            sentry_dsn: get_optional(&lookup, "SENTRY_DSN"),
            sentry_environment: get_optional(&lookup, "SENTRY_ENVIRONMENT"),
        })
    }
}

impl CatalogConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = get_or_default(lookup, "SHOPFRONT_CATALOG_URL", DEFAULT_CATALOG_URL);
        let endpoint = parse_http_url("SHOPFRONT_CATALOG_URL", &raw)?;

        let timeout = get_optional(lookup, "SHOPFRONT_CATALOG_TIMEOUT_SECS")
            .map(|value| {
                value.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "SHOPFRONT_CATALOG_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Ok(Self { endpoint, timeout })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, treating blank values as unset.
fn get_optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key).filter(|value| !value.trim().is_empty())
}

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get_optional(lookup, key).unwrap_or_else(|| default.to_string())
}

/// Parse a URL and require an http(s) scheme.
fn parse_http_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}
