//! Cart store over a [`KeyValueStore`].

use std::collections::HashMap;

use shopfront_core::{AddOutcome, Cart, CartItem, ProductId};
use tracing::{debug, info, instrument, warn};

use super::StorageError;
use super::kv::KeyValueStore;

/// Key holding the cart record.
pub const CART_KEY: &str = "@cart";

/// Prefix of the per-item keys written by older installs.
pub const LEGACY_ITEM_PREFIX: &str = "@cart_";

/// Present while a legacy migration has saved [`CART_KEY`] but not yet
/// deleted every per-item key. Must not start with [`LEGACY_ITEM_PREFIX`].
const MIGRATION_MARKER_KEY: &str = "@cart:migrating";

/// Cart persistence over a key-value backend.
///
/// Every mutation reads the current record, applies the change to an
/// in-memory [`Cart`], and writes the record back in full.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    store: S,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a cart store over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying key-value backend.
    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.store
    }

    /// Load the cart.
    ///
    /// A missing record is an empty cart; a malformed record is logged and
    /// treated as empty. Per-item keys left by older installs are migrated
    /// into the record first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read, or if a legacy
    /// migration cannot be written.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Cart, StorageError> {
        let legacy_keys = self.store.keys_with_prefix(LEGACY_ITEM_PREFIX).await?;
        if !legacy_keys.is_empty() {
            return self.migrate_legacy(&legacy_keys).await;
        }

        self.read_record().await
    }

    /// Add an item, or increase the quantity if its product is already present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be read or written.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub async fn add_item(&self, item: CartItem) -> Result<AddOutcome, StorageError> {
        let mut cart = self.load().await?;
        let outcome = cart.add(item);
        self.save(&cart).await?;
        debug!(?outcome, "Cart item added");
        Ok(outcome)
    }

    /// Remove the entry for `id`.
    ///
    /// Removing a product that is not in the cart does nothing and writes nothing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be read or written.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, id: ProductId) -> Result<Option<CartItem>, StorageError> {
        let mut cart = self.load().await?;
        let removed = cart.remove(id);
        if removed.is_some() {
            self.save(&cart).await?;
            debug!("Cart item removed");
        }
        Ok(removed)
    }

    /// All cart entries in add order, one per product.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be read.
    pub async fn list_all(&self) -> Result<Vec<CartItem>, StorageError> {
        Ok(self.load().await?.to_vec())
    }

    /// The entry for `id`, if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be read.
    pub async fn get_item(&self, id: ProductId) -> Result<Option<CartItem>, StorageError> {
        Ok(self.load().await?.get(id).cloned())
    }

    /// The record under [`CART_KEY`] decoded as-is, without merging or migration.
    ///
    /// Absent or malformed records yield an empty list; individual malformed
    /// entries are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn get_raw_list(&self) -> Result<Vec<CartItem>, StorageError> {
        let raw = self.store.get(CART_KEY).await?;
        Ok(raw.map(|raw| decode_items(&raw)).unwrap_or_default())
    }

    /// Delete the cart record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the delete.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(CART_KEY).await?;
        Ok(())
    }

    async fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let json = serde_json::to_string(cart)?;
        self.store.set(CART_KEY, &json).await
    }

    async fn read_record(&self) -> Result<Cart, StorageError> {
        let raw = self.store.get(CART_KEY).await?;
        Ok(raw.map_or_else(Cart::new, |raw| Cart::from_items(decode_items(&raw))))
    }

    /// Fold per-item keys into the cart record, then delete them.
    ///
    /// Per-item keys were what the cart screen displayed, so they define the
    /// migrated contents. They keep the order in which they first appear in
    /// the old list under [`CART_KEY`]; keys missing from it follow by id.
    ///
    /// [`MIGRATION_MARKER_KEY`] is set between saving the record and deleting
    /// the legacy keys. If some deletes failed, the next load finds the marker
    /// and keeps the saved record instead of rebuilding it from the leftovers.
    async fn migrate_legacy(&self, keys: &[String]) -> Result<Cart, StorageError> {
        let resuming = self.store.get(MIGRATION_MARKER_KEY).await?.is_some();
        let legacy_items = self.read_legacy_items(keys).await?;

        let cart = if resuming {
            let mut cart = self.read_record().await?;
            for item in legacy_items {
                if !cart.contains(item.id) {
                    cart.add(item);
                }
            }
            cart
        } else {
            let mut first_seen: HashMap<ProductId, usize> = HashMap::new();
            for (position, item) in self.get_raw_list().await?.iter().enumerate() {
                first_seen.entry(item.id).or_insert(position);
            }

            let mut items = legacy_items;
            items.sort_by_key(|item| {
                (
                    first_seen.get(&item.id).copied().unwrap_or(usize::MAX),
                    item.id,
                )
            });
            Cart::from_items(items)
        };

        self.save(&cart).await?;
        self.store.set(MIGRATION_MARKER_KEY, "1").await?;
        for key in keys {
            self.store.remove(key).await?;
        }
        self.store.remove(MIGRATION_MARKER_KEY).await?;

        info!(
            legacy_keys = keys.len(),
            items = cart.len(),
            resumed = resuming,
            "Migrated legacy cart layout"
        );
        Ok(cart)
    }

    /// Decode each per-item key as a single-unit item, dropping malformed ones.
    async fn read_legacy_items(&self, keys: &[String]) -> Result<Vec<CartItem>, StorageError> {
        let mut items = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(raw) = self.store.get(key).await? else {
                continue;
            };
            match serde_json::from_str::<CartItem>(&raw) {
                Ok(mut item) => {
                    item.quantity = 1;
                    items.push(item);
                }
                Err(e) => warn!(key = %key, error = %e, "Dropping malformed legacy cart entry"),
            }
        }
        Ok(items)
    }
}

/// Decode a stored JSON array of cart items, skipping entries that don't fit.
fn decode_items(raw: &str) -> Vec<CartItem> {
    let values = match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(values) => values,
        Err(e) => {
            warn!(error = %e, "Stored cart is malformed; treating as empty");
            return Vec::new();
        }
    };

    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<CartItem>(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "Skipping malformed cart entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use shopfront_core::PriceField;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::cart::{MemoryStore, compute_total};

    /// Memory backend whose `fail_on`-th `remove` call fails.
    struct FlakyRemove {
        inner: MemoryStore,
        fail_on: usize,
        removes: AtomicUsize,
    }

    impl FlakyRemove {
        fn new(inner: MemoryStore, fail_on: usize) -> Self {
            Self {
                inner,
                fail_on,
                removes: AtomicUsize::new(0),
            }
        }
    }

    impl KeyValueStore for FlakyRemove {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<bool, StorageError> {
            if self.removes.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
                return Err(StorageError::Unavailable("flaky".to_string()));
            }
            self.inner.remove(key).await
        }

        async fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
            self.inner.keys_with_prefix(prefix).await
        }
    }

    fn ids(items: &[CartItem]) -> Vec<i64> {
        items.iter().map(|i| i.id.as_i64()).collect()
    }

    fn item(id: i64, price: i64) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: "A product".to_string(),
            price: PriceField::from(Decimal::from(price)),
            image: format!("https://example.com/{id}.jpg"),
            category: "misc".to_string(),
            quantity: 1,
            added_at: None,
        }
    }

    fn cart_store() -> CartStore<MemoryStore> {
        CartStore::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_empty_store_is_empty_cart() {
        let store = cart_store();
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.get_raw_list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_distinct_adds_are_listed_once_each() {
        let store = cart_store();
        for id in [4, 1, 9, 2] {
            store.add_item(item(id, 1)).await.unwrap();
        }

        let ids: Vec<i64> = store
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|i| i.id.as_i64())
            .collect();
        assert_eq!(ids, vec![4, 1, 9, 2]);
    }

    #[tokio::test]
    async fn test_add_then_get_item_round_trips() {
        let store = cart_store();
        let x = item(7, 3);
        store.add_item(x.clone()).await.unwrap();
        assert_eq!(store.get_item(x.id).await.unwrap(), Some(x));
    }

    #[tokio::test]
    async fn test_add_same_product_twice_increments_quantity() {
        let store = cart_store();
        assert_eq!(store.add_item(item(1, 10)).await.unwrap(), AddOutcome::Inserted);
        assert_eq!(
            store.add_item(item(1, 10)).await.unwrap(),
            AddOutcome::Incremented { quantity: 2 }
        );

        let items = store.list_all().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(compute_total(&items).amount, Decimal::from(20));
        // The stored record holds a single entry as well
        assert_eq!(store.get_raw_list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_add_remove_scenario() {
        let store = cart_store();
        store.add_item(item(1, 10)).await.unwrap();
        store.add_item(item(2, 5)).await.unwrap();
        store.remove_item(ProductId::new(1)).await.unwrap();

        let items = store.list_all().await.unwrap();
        assert_eq!(items, vec![item(2, 5)]);
        assert_eq!(compute_total(&items).amount, Decimal::from(5));
    }

    #[tokio::test]
    async fn test_remove_absent_id_is_noop() {
        let store = cart_store();
        store.add_item(item(1, 10)).await.unwrap();
        let before = store.backend().entries();

        let removed = store.remove_item(ProductId::new(99)).await.unwrap();
        assert!(removed.is_none());
        assert_eq!(store.backend().entries(), before);
    }

    #[tokio::test]
    async fn test_remove_absent_id_does_not_write() {
        let store = cart_store();
        store.add_item(item(1, 10)).await.unwrap();
        store.backend().fail_writes(true);

        // Would fail if it tried to write
        assert!(store.remove_item(ProductId::new(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_failure_is_reported() {
        let store = cart_store();
        store.backend().fail_writes(true);
        let result = store.add_item(item(1, 10)).await;
        assert!(matches!(result, Err(StorageError::Unavailable(_))));
        store.backend().fail_writes(false);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_record_reads_as_empty() {
        let store = cart_store();
        store.backend().set(CART_KEY, "{not json").await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
        assert!(store.get_raw_list().await.unwrap().is_empty());

        // And the next add replaces it
        store.add_item(item(3, 1)).await.unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_entries_are_skipped() {
        let store = cart_store();
        store
            .backend()
            .set(CART_KEY, r#"[{"id": 1, "title": "A", "price": 2}, {"title": "no id"}, 42]"#)
            .await
            .unwrap();
        let items = store.list_all().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ProductId::new(1));
    }

    #[tokio::test]
    async fn test_raw_list_keeps_duplicates_list_all_merges() {
        let store = cart_store();
        store
            .backend()
            .set(CART_KEY, r#"[{"id": 1, "price": 2}, {"id": 1, "price": 2}]"#)
            .await
            .unwrap();

        assert_eq!(store.get_raw_list().await.unwrap().len(), 2);
        let items = store.list_all().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_legacy_layout_is_migrated() {
        let store = cart_store();
        let kv = store.backend();
        // Old list still contains product 2, which was removed via its per-item key
        kv.set(CART_KEY, r#"[{"id": 1, "price": 10}, {"id": 2, "price": 5}, {"id": 1, "price": 10}]"#)
            .await
            .unwrap();
        kv.set("@cart_1", r#"{"id": 1, "title": "A", "price": 10}"#)
            .await
            .unwrap();
        kv.set("@cart_3", r#"{"id": 3, "title": "C", "price": "n/a"}"#)
            .await
            .unwrap();
        kv.set("@cart_4", "garbage").await.unwrap();

        let items = store.list_all().await.unwrap();
        let ids: Vec<i64> = items.iter().map(|i| i.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(items.iter().all(|i| i.quantity == 1));

        let keys: Vec<String> = kv.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![CART_KEY.to_string()]);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = cart_store();
        store.add_item(item(1, 1)).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_interrupted_migration_keeps_migrated_items() {
        let kv = MemoryStore::new();
        kv.set("@cart_1", r#"{"id": 1, "title": "A", "price": 10}"#)
            .await
            .unwrap();
        kv.set("@cart_2", r#"{"id": 2, "title": "B", "price": 5}"#)
            .await
            .unwrap();

        // Deleting @cart_2 fails after @cart_1 is already gone
        let store = CartStore::new(FlakyRemove::new(kv.clone(), 2));
        assert!(matches!(
            store.list_all().await,
            Err(StorageError::Unavailable(_))
        ));
        assert_eq!(
            store.backend().inner.keys_with_prefix(LEGACY_ITEM_PREFIX).await.unwrap(),
            vec!["@cart_2".to_string()]
        );

        let items = store.list_all().await.unwrap();
        assert_eq!(ids(&items), vec![1, 2]);

        let keys: Vec<String> = kv.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![CART_KEY.to_string()]);
    }

    #[tokio::test]
    async fn test_migration_follows_old_list_order() {
        let store = cart_store();
        let kv = store.backend();
        kv.set(CART_KEY, r#"[{"id": 10, "price": 1}, {"id": 2, "price": 1}, {"id": 10, "price": 1}]"#)
            .await
            .unwrap();
        for id in [7, 2, 10] {
            kv.set(&format!("@cart_{id}"), &format!(r#"{{"id": {id}, "price": 1}}"#))
                .await
                .unwrap();
        }

        assert_eq!(ids(&store.list_all().await.unwrap()), vec![10, 2, 7]);
    }

    #[tokio::test]
    async fn test_migration_without_old_list_orders_by_id() {
        let store = cart_store();
        for id in [10, 2] {
            store
                .backend()
                .set(&format!("@cart_{id}"), &format!(r#"{{"id": {id}, "price": 1}}"#))
                .await
                .unwrap();
        }

        assert_eq!(ids(&store.list_all().await.unwrap()), vec![2, 10]);
    }
}
