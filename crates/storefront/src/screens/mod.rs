//! Screen state as plain data.
//!
//! Each screen is a state struct plus an action enum. `update` consumes the
//! state and an action and returns the next state without doing any I/O; the
//! [`handlers`](crate::handlers) module performs the I/O and feeds the results
//! back in as actions.
//!
//! Every state carries a `mounted` flag. Once a screen is unmounted, late
//! results (a slow catalog fetch, a cart write finishing after navigation) are
//! dropped instead of being applied to a screen nobody is looking at.

pub mod cart;
pub mod catalog;
pub mod detail;

pub use cart::{CartAction, CartLineView, CartState};
pub use catalog::{CatalogAction, CatalogState, CatalogStatus, ProductCard};
pub use detail::DetailView;

/// One-line feedback shown after a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A product was added; `quantity` is its quantity afterwards.
    Added { title: String, quantity: u32 },
    /// Adding a product could not be saved.
    AddFailed { title: String },
    /// A product was removed from the cart.
    Removed { title: String },
    /// Removing a product could not be saved.
    RemoveFailed,
    /// The cart could not be read.
    CartUnavailable,
    /// Checkout is not offered.
    CheckoutUnavailable,
}

impl Notice {
    /// Text shown to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Added { title, quantity: 1 } => format!("Added {title} to your cart"),
            Self::Added { title, quantity } => {
                format!("Added another {title} to your cart ({quantity} in cart)")
            }
            Self::AddFailed { title } => format!("Couldn't add {title} to your cart"),
            Self::Removed { title } => format!("Removed {title} from your cart"),
            Self::RemoveFailed => "Couldn't update your cart".to_string(),
            Self::CartUnavailable => "Your cart couldn't be loaded".to_string(),
            Self::CheckoutUnavailable => "Checkout is not available yet".to_string(),
        }
    }
}
