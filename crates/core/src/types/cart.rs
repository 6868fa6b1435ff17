//! Cart items and the cart ledger.
//!
//! A [`Cart`] is an insertion-ordered mapping from [`ProductId`] to
//! [`CartItem`]. It holds at most one entry per product; adding a product that
//! is already present increases that entry's quantity.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::ProductId;
use super::price::{Price, PriceField};
use super::product::Product;

/// A frozen snapshot of a [`Product`] taken when it was added to the cart.
///
/// Later catalog changes do not propagate to items already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product id at add time.
    pub id: ProductId,
    /// Product title at add time.
    #[serde(default)]
    pub title: String,
    /// Product description at add time.
    #[serde(default)]
    pub description: String,
    /// Unit price at add time.
    #[serde(default)]
    pub price: PriceField,
    /// Product image URL at add time.
    #[serde(default)]
    pub image: String,
    /// Product category at add time.
    #[serde(default)]
    pub category: String,
    /// Number of units. Entries written before quantities existed decode as 1.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// When the product was first added.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

const fn default_quantity() -> u32 {
    1
}

impl CartItem {
    /// Snapshot a product as a single-unit cart item.
    #[must_use]
    pub fn from_product(product: &Product, added_at: DateTime<Utc>) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
            quantity: 1,
            added_at: Some(added_at),
        }
    }

    /// Unit price times quantity, or `None` when the stored price is not
    /// numeric or the line total is out of range.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.price
            .price()
            .and_then(|price| price.checked_times(self.quantity))
    }
}

/// Result of adding an item to a [`Cart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The product was not in the cart; a new entry was appended.
    Inserted,
    /// The product was already in the cart; its quantity is now `quantity`.
    Incremented {
        /// Quantity after the increment.
        quantity: u32,
    },
}

/// The user's cart: an ordered mapping from product id to item.
///
/// Serializes as a JSON array of [`CartItem`] in add order. Deserializing an
/// array that repeats an id folds the repeats into a single entry, so lists
/// written by older versions (one element per add) load cleanly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: IndexMap<ProductId, CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items in add order, merging repeated ids.
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.add(item);
        }
        cart
    }

    /// Add an item, or increase the quantity of the existing entry for its id.
    ///
    /// An existing entry keeps its original snapshot; only the quantity changes.
    pub fn add(&mut self, mut item: CartItem) -> AddOutcome {
        let quantity = item.quantity.max(1);
        if let Some(existing) = self.items.get_mut(&item.id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            return AddOutcome::Incremented {
                quantity: existing.quantity,
            };
        }
        item.quantity = quantity;
        self.items.insert(item.id, item);
        AddOutcome::Inserted
    }

    /// Remove the entry for `id`, preserving the order of the remaining items.
    pub fn remove(&mut self, id: ProductId) -> Option<CartItem> {
        self.items.shift_remove(&id)
    }

    /// Look up the entry for `id`.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.get(&id)
    }

    /// Whether the cart has an entry for `id`.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.contains_key(&id)
    }

    /// Items in add order.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &CartItem> {
        self.items.values()
    }

    /// Owned copy of the items in add order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<CartItem> {
        self.items.values().cloned().collect()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.values())
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartItem>::deserialize(deserializer).map(Self::from_items)
    }
}

impl FromIterator<CartItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}
