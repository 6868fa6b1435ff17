//! Derived cart figures.
//!
//! Totals are recomputed from the full item list every time; nothing here is
//! cached.

use std::collections::HashMap;

use shopfront_core::{CartItem, Price, Product, ProductId};

/// Sum of `price × quantity` over `items`.
///
/// Items whose stored price is not numeric contribute zero.
pub fn compute_total<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> Price {
    items.into_iter().filter_map(CartItem::line_total).sum()
}

/// Total number of units in `items`.
pub fn item_count<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> u64 {
    items.into_iter().map(|item| u64::from(item.quantity)).sum()
}

/// How a cart item differs from the live catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum DriftKind {
    /// The catalog price differs from the price captured at add time.
    PriceChanged {
        /// Price captured when the item was added.
        was: Option<Price>,
        /// Current catalog price.
        now: Option<Price>,
    },
    /// The product is no longer listed.
    Unlisted,
}

/// A cart item that no longer matches the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDrift {
    pub id: ProductId,
    pub title: String,
    pub kind: DriftKind,
}

/// Compare cart snapshots against the current catalog.
///
/// Reports, in cart order, every item whose product is missing from `products`
/// or whose price changed. The cart itself is not touched: items keep the
/// price they were added at.
pub fn reconcile<'a>(
    items: impl IntoIterator<Item = &'a CartItem>,
    products: &[Product],
) -> Vec<ItemDrift> {
    let live: HashMap<ProductId, &Product> = products.iter().map(|p| (p.id, p)).collect();

    items
        .into_iter()
        .filter_map(|item| {
            let kind = match live.get(&item.id) {
                None => DriftKind::Unlisted,
                Some(product) => {
                    let was = item.price.price();
                    let now = product.unit_price();
                    if was.map(|p| p.amount) == now.map(|p| p.amount) {
                        return None;
                    }
                    DriftKind::PriceChanged { was, now }
                }
            };
            Some(ItemDrift {
                id: item.id,
                title: item.title.clone(),
                kind,
            })
        })
        .collect()
}
