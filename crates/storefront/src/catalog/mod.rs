//! Catalog API client.
//!
//! Issues a single unauthenticated `GET` against the configured endpoint and
//! decodes the JSON array of products. There is no pagination, retry, or
//! caching: each catalog screen mount performs exactly one fetch.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storefront::catalog::{CatalogClient, CatalogOutcome};
//!
//! let client = CatalogClient::new(&config.catalog)?;
//!
//! match client.fetch_all().await {
//!     CatalogOutcome::Loaded(products) => render(products),
//!     CatalogOutcome::Empty => render_empty(),
//!     CatalogOutcome::Failed(reason) => render_unavailable(&reason),
//! }
//! ```

use std::sync::Arc;

use shopfront_core::Product;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::CatalogConfig;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connect, DNS, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog returned a non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not a JSON array.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result of a catalog fetch, as seen by the catalog screen.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogOutcome {
    /// At least one product was decoded.
    Loaded(Vec<Product>),
    /// The catalog answered with no usable products.
    Empty,
    /// The catalog could not be reached or answered with garbage.
    Failed(String),
}

impl CatalogOutcome {
    /// Products from the fetch, with failures collapsed into an empty list.
    #[must_use]
    pub fn into_products(self) -> Vec<Product> {
        match self {
            Self::Loaded(products) => products,
            Self::Empty | Self::Failed(_) => Vec::new(),
        }
    }

    /// Whether the fetch failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl From<Result<Vec<Product>, CatalogError>> for CatalogOutcome {
    fn from(result: Result<Vec<Product>, CatalogError>) -> Self {
        match result {
            Ok(products) if products.is_empty() => Self::Empty,
            Ok(products) => Self::Loaded(products),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote product catalog.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client: builder.build()?,
                endpoint: config.endpoint.clone(),
            }),
        })
    }

    /// The endpoint this client reads from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Fetch the full product list.
    ///
    /// Products that fail to decode are skipped with a warning; the rest of
    /// the listing is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not 2xx, or the
    /// body is not a JSON array.
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        let raw: Vec<serde_json::Value> = match serde_json::from_str(&response_text) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        let products = decode_products(raw);
        debug!(count = products.len(), "Catalog fetched");
        Ok(products)
    }

    /// Fetch the full product list as a tagged outcome.
    ///
    /// Never fails: errors are logged and reported as [`CatalogOutcome::Failed`].
    pub async fn fetch_all(&self) -> CatalogOutcome {
        let result = self.fetch_products().await;
        if let Err(e) = &result {
            tracing::error!(error = %e, endpoint = %self.inner.endpoint, "Catalog fetch failed");
        }
        CatalogOutcome::from(result)
    }
}

/// Decode each listing entry independently, dropping the ones that don't fit.
fn decode_products(raw: Vec<serde_json::Value>) -> Vec<Product> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Product>(value) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed catalog entry");
                None
            }
        })
        .collect()
}
