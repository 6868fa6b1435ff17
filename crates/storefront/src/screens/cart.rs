//! Cart list with running total.

use shopfront_core::{CartItem, Price, ProductId};

use super::Notice;
use crate::cart::{compute_total, item_count};
use crate::filters::{UNAVAILABLE_PRICE, format_price, truncate_description};

/// Description length on cart lines.
pub const LINE_DESCRIPTION_LIMIT: usize = 50;

/// State of the cart screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CartState {
    pub mounted: bool,
    pub loading: bool,
    pub items: Vec<CartItem>,
    /// Always `compute_total(&items)`.
    pub total: Price,
    pub notice: Option<Notice>,
}

/// Inputs to the cart screen.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// The stored cart was read.
    Loaded(Vec<CartItem>),
    /// The stored cart could not be read.
    LoadFailed,
    /// An item was removed from storage.
    Removed(ProductId),
    /// Removing an item from storage failed.
    RemoveFailed(ProductId),
    /// The checkout button was pressed.
    Checkout,
    /// The screen was navigated away from.
    Unmount,
}

/// A cart entry as shown in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub image: String,
    /// Unit price, or "N/A".
    pub price: String,
    pub quantity: u32,
    /// Unit price times quantity, or "N/A".
    pub line_total: String,
}

impl CartState {
    /// A freshly mounted screen waiting for the stored cart.
    #[must_use]
    pub const fn mount() -> Self {
        Self {
            mounted: true,
            loading: true,
            items: Vec::new(),
            total: Price::zero(),
            notice: None,
        }
    }

    /// Apply `action` and return the next state.
    #[must_use]
    pub fn update(mut self, action: CartAction) -> Self {
        if !self.mounted {
            return self;
        }

        match action {
            CartAction::Loaded(items) => {
                self.loading = false;
                self.set_items(items);
            }
            CartAction::LoadFailed => {
                self.loading = false;
                self.set_items(Vec::new());
                self.notice = Some(Notice::CartUnavailable);
            }
            CartAction::Removed(id) => {
                let title = self
                    .items
                    .iter()
                    .find(|item| item.id == id)
                    .map(|item| item.title.clone());
                let mut items = std::mem::take(&mut self.items);
                items.retain(|item| item.id != id);
                self.set_items(items);
                self.notice = title.map(|title| Notice::Removed { title });
            }
            CartAction::RemoveFailed(_) => self.notice = Some(Notice::RemoveFailed),
            CartAction::Checkout => self.notice = Some(Notice::CheckoutUnavailable),
            CartAction::Unmount => self.mounted = false,
        }
        self
    }

    /// Number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        item_count(&self.items)
    }

    /// Total formatted for the footer (e.g., "$15.00").
    #[must_use]
    pub fn total_display(&self) -> String {
        self.total.display()
    }

    /// List rows in cart order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLineView> {
        self.items
            .iter()
            .map(|item| CartLineView {
                id: item.id,
                title: item.title.clone(),
                description: truncate_description(&item.description, LINE_DESCRIPTION_LIMIT),
                image: item.image.clone(),
                price: format_price(&item.price),
                quantity: item.quantity,
                line_total: item
                    .line_total()
                    .map_or_else(|| UNAVAILABLE_PRICE.to_string(), |p| p.display()),
            })
            .collect()
    }

    fn set_items(&mut self, items: Vec<CartItem>) {
        self.total = compute_total(&items);
        self.items = items;
    }
}
