//! Application state shared across screens.

use std::sync::Arc;

use crate::cart::{CartStore, KeyValueStore, SqliteStore};
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::Result;

/// Application state shared across all screens.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog client, the cart store, and configuration.
pub struct AppState<S = SqliteStore> {
    inner: Arc<AppStateInner<S>>,
}

struct AppStateInner<S> {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: CartStore<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl AppState<SqliteStore> {
    /// Open the configured `SQLite` cart database and build the state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the HTTP client
    /// cannot be built.
    pub async fn connect(config: StorefrontConfig) -> Result<Self> {
        let store = SqliteStore::connect(&config.database_url).await?;
        tracing::info!("Cart database opened");
        Self::new(config, store)
    }
}

impl<S: KeyValueStore> AppState<S> {
    /// Create a new application state over an existing cart backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: StorefrontConfig, store: S) -> Result<Self> {
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: CartStore::new(store),
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore<S> {
        &self.inner.cart
    }
}
