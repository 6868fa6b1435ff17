//! Key-value backends for the cart.
//!
//! The cart is persisted as string values under string keys. Two backends are
//! provided:
//!
//! - [`SqliteStore`] - durable, file-backed, survives restarts
//! - [`MemoryStore`] - process-local, for previews and tests

mod memory;
mod sqlite;

use std::future::Future;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use super::StorageError;

/// String-keyed storage for serialized values.
///
/// Implementations must be thread-safe (`Send + Sync`). A single writer per
/// device is assumed; no cross-process coordination is performed.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;

    /// Delete `key`. Returns true if it existed.
    fn remove(&self, key: &str) -> impl Future<Output = Result<bool, StorageError>> + Send;

    /// All keys starting with `prefix`, in ascending byte-wise order
    /// (`"@cart_10"` sorts before `"@cart_2"`).
    fn keys_with_prefix(
        &self,
        prefix: &str,
    ) -> impl Future<Output = Result<Vec<String>, StorageError>> + Send;
}
