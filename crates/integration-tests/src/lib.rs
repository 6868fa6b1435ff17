//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! The tests need no external services: the catalog is served by
//! [`FakeCatalog`], a local axum server on an ephemeral port, and carts live
//! in [`MemoryStore`] or an `SQLite` database.
//!
//! # Test Categories
//!
//! - `catalog_client` - Catalog fetch outcomes against the fake catalog
//! - `cart_store` - Persisted cart behavior on both backends
//! - `screens` - Handler-driven screen flows end to end

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use serde_json::{Value, json};
use shopfront_storefront::cart::MemoryStore;
use shopfront_storefront::config::{CatalogConfig, StorefrontConfig};
use shopfront_storefront::state::AppState;
use url::Url;

/// Canned response served by [`FakeCatalog`].
#[derive(Debug, Clone)]
struct CatalogResponse {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Debug, Default)]
struct Shared {
    response: Mutex<Option<CatalogResponse>>,
    hits: AtomicUsize,
}

/// Local stand-in for the remote catalog API.
///
/// Serves `GET /products` with whatever response was last configured. The
/// server runs until the test's runtime shuts down.
pub struct FakeCatalog {
    endpoint: Url,
    shared: Arc<Shared>,
}

impl FakeCatalog {
    /// Start a catalog serving `products` as a JSON array.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start(products: &Value) -> Self {
        let shared = Arc::new(Shared::default());
        let app = Router::new()
            .route("/products", get(products_handler))
            .with_state(Arc::clone(&shared));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake catalog");
        let addr = listener.local_addr().expect("Fake catalog has no address");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let endpoint = Url::parse(&format!("http://{addr}/products"))
            .expect("Fake catalog address is a valid URL");

        let catalog = Self { endpoint, shared };
        catalog.set_products(products);
        catalog
    }

    /// Serve `products` from now on.
    pub fn set_products(&self, products: &Value) {
        self.set_response(StatusCode::OK, products.to_string());
    }

    /// Serve an arbitrary status and body from now on.
    pub fn set_response(&self, status: StatusCode, body: impl Into<String>) {
        let mut response = self.lock();
        let delay = response.as_ref().map_or(Duration::ZERO, |r| r.delay);
        *response = Some(CatalogResponse {
            status,
            body: body.into(),
            delay,
        });
    }

    /// Hold every response for `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        if let Some(response) = self.lock().as_mut() {
            response.delay = delay;
        }
    }

    /// Number of requests served so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.shared.hits.load(Ordering::SeqCst)
    }

    /// The `/products` endpoint URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Storefront configuration pointing at this catalog and an in-memory
    /// `SQLite` cart.
    #[must_use]
    pub fn config(&self) -> StorefrontConfig {
        StorefrontConfig {
            catalog: CatalogConfig {
                endpoint: self.endpoint.clone(),
                timeout: None,
            },
            database_url: "sqlite::memory:".to_string(),
            delivery_days: 5,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// Application state over a fresh [`MemoryStore`].
    ///
    /// The store is returned alongside so tests can inspect it or make writes
    /// fail.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn memory_state(&self) -> (AppState<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        let state =
            AppState::new(self.config(), store.clone()).expect("Failed to build app state");
        (state, store)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CatalogResponse>> {
        self.shared
            .response
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

async fn products_handler(State(shared): State<Arc<Shared>>) -> impl IntoResponse {
    shared.hits.fetch_add(1, Ordering::SeqCst);

    let response = shared
        .response
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();

    let Some(response) = response else {
        return (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "text/plain")], String::new());
    };

    if !response.delay.is_zero() {
        tokio::time::sleep(response.delay).await;
    }

    (
        response.status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body,
    )
}

/// Three products in the catalog API's shape.
#[must_use]
pub fn sample_products() -> Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "description": "Your perfect pack for everyday use and walks in the forest. Stash your laptop (up to 15 inches) in the padded sleeve, your everyday",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts",
            "price": 22.3,
            "description": "Slim-fitting style, contrast raglan long sleeve, three-button henley placket.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71-3HjGNDUL._AC_SY879._SX._UX._SY._UY_.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        },
        {
            "id": 3,
            "title": "Mens Cotton Jacket",
            "price": 55.99,
            "description": "Great outerwear jackets for Spring/Autumn/Winter.",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/71li-ujtlUL._AC_UX679_.jpg",
            "rating": { "rate": 4.7, "count": 500 }
        }
    ])
}
