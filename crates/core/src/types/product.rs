//! Catalog product as returned by the catalog API.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::{Price, PriceField};

/// A purchasable product from the remote catalog.
///
/// Read-only: products are fetched once per catalog screen and never persisted
/// directly. The cart stores [`CartItem`](super::CartItem) snapshots instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-assigned product id.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Unit price; non-numeric values are preserved but never summed.
    #[serde(default)]
    pub price: PriceField,
    /// Product image URL.
    #[serde(default)]
    pub image: String,
    /// Catalog category name.
    #[serde(default)]
    pub category: String,
    /// Aggregate review rating, when the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl Product {
    /// The product's numeric price, if it has one.
    #[must_use]
    pub const fn unit_price(&self) -> Option<Price> {
        self.price.price()
    }
}

/// Review rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating (e.g., 3.9).
    pub rate: f64,
    /// Number of reviews.
    pub count: u32,
}
