//! Catalog fetch outcomes against a local fake catalog.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::http::StatusCode;
use rust_decimal::dec;
use serde_json::json;
use shopfront_core::ProductId;
use shopfront_integration_tests::{FakeCatalog, sample_products};
use shopfront_storefront::catalog::{CatalogClient, CatalogError, CatalogOutcome};
use shopfront_storefront::config::CatalogConfig;

#[tokio::test]
async fn test_fetch_loads_products_in_order() {
    let catalog = FakeCatalog::start(&sample_products()).await;
    let client = CatalogClient::new(&catalog.config().catalog).unwrap();

    let products = client.fetch_products().await.unwrap();
    let ids: Vec<i64> = products.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(products[0].unit_price().unwrap().amount, dec!(109.95));
    assert_eq!(catalog.hits(), 1);
}

#[tokio::test]
async fn test_empty_catalog_is_empty_not_failed() {
    let catalog = FakeCatalog::start(&json!([])).await;
    let client = CatalogClient::new(&catalog.config().catalog).unwrap();

    assert_eq!(client.fetch_all().await, CatalogOutcome::Empty);
}

#[tokio::test]
async fn test_server_error_is_failed() {
    let catalog = FakeCatalog::start(&sample_products()).await;
    catalog.set_response(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded");
    let client = CatalogClient::new(&catalog.config().catalog).unwrap();

    let err = client.fetch_products().await.unwrap_err();
    assert!(matches!(err, CatalogError::Status { status: 500, .. }));

    let outcome = client.fetch_all().await;
    assert!(outcome.is_failed());
    assert!(outcome.into_products().is_empty());
}

#[tokio::test]
async fn test_non_array_body_is_parse_error() {
    let catalog = FakeCatalog::start(&json!({"products": []})).await;
    let client = CatalogClient::new(&catalog.config().catalog).unwrap();

    let err = client.fetch_products().await.unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[tokio::test]
async fn test_malformed_entries_are_skipped() {
    let catalog = FakeCatalog::start(&json!([
        {"id": 1, "title": "Mug", "price": 8.5},
        {"title": "No id"},
        {"id": "seven", "title": "Bad id"},
        {"id": 4, "title": "Poster", "price": "ask"}
    ]))
    .await;
    let client = CatalogClient::new(&catalog.config().catalog).unwrap();

    let products = client.fetch_products().await.unwrap();
    let ids: Vec<ProductId> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![ProductId::new(1), ProductId::new(4)]);
    assert!(products[1].unit_price().is_none());
}

#[tokio::test]
async fn test_timeout_is_failed() {
    let catalog = FakeCatalog::start(&sample_products()).await;
    catalog.set_delay(Duration::from_secs(3));

    let config = CatalogConfig {
        endpoint: catalog.endpoint().clone(),
        timeout: Some(Duration::from_millis(200)),
    };
    let client = CatalogClient::new(&config).unwrap();

    assert!(matches!(
        client.fetch_products().await,
        Err(CatalogError::Http(_))
    ));
}

#[tokio::test]
async fn test_each_fetch_hits_the_catalog() {
    let catalog = FakeCatalog::start(&sample_products()).await;
    let client = CatalogClient::new(&catalog.config().catalog).unwrap();

    client.fetch_all().await;
    client.fetch_all().await;
    assert_eq!(catalog.hits(), 2);
}
