//! Product detail overlay.

use chrono::NaiveDate;
use shopfront_core::{Product, ProductId};

use crate::filters::{estimated_delivery, format_price};

/// Care instructions printed under every product.
pub const CARE_FACTS: &[&str] = &[
    "Do not use bleach",
    "Do not tumble dry",
    "Dry clean with tetrachloroethylene",
    "Iron at a maximum of 110oC/230oF",
];

/// Shipping line shown above the delivery estimate.
pub const SHIPPING_TITLE: &str = "Free Flat Rate Shipping";

/// Everything the overlay displays for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    /// "3.9 (120 reviews)" when the catalog has a rating.
    pub rating: Option<String>,
    pub care_facts: &'static [&'static str],
    pub shipping_title: &'static str,
    pub estimated_delivery: String,
}

impl DetailView {
    /// Build the overlay for `product`, estimating delivery `delivery_days` after `today`.
    #[must_use]
    pub fn new(product: &Product, today: NaiveDate, delivery_days: u32) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            description: product.description.clone(),
            price: format_price(&product.price),
            image: product.image.clone(),
            category: product.category.clone(),
            rating: product
                .rating
                .map(|r| format!("{:.1} ({} reviews)", r.rate, r.count)),
            care_facts: CARE_FACTS,
            shipping_title: SHIPPING_TITLE,
            estimated_delivery: estimated_delivery(today, delivery_days),
        }
    }
}
