//! Persisted cart: storage, aggregation, and reconciliation.
//!
//! # Storage layout
//!
//! The whole cart lives under a single key, [`CART_KEY`], as a JSON array of
//! cart items in add order with one entry per product. Per-product lookup and
//! the full listing are both views over that one record, so they cannot
//! disagree.
//!
//! Older installs wrote every add twice: appended to the list under
//! [`CART_KEY`] and again under a per-item key (`@cart_<id>`). Those per-item
//! keys are folded into the single record the first time the cart is loaded.

pub mod aggregate;
pub mod kv;
mod store;

pub use aggregate::{DriftKind, ItemDrift, compute_total, item_count, reconcile};
pub use kv::{KeyValueStore, MemoryStore, SqliteStore};
pub use store::{CART_KEY, CartStore, LEGACY_ITEM_PREFIX};

use thiserror::Error;

/// Errors from the cart storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Cart could not be serialized.
    #[error("Encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// Store refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
