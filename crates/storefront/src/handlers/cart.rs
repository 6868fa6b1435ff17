//! Cart screen handlers.

use tracing::instrument;

use shopfront_core::ProductId;

use crate::cart::{ItemDrift, KeyValueStore, reconcile};
use crate::catalog::CatalogOutcome;
use crate::error::add_breadcrumb;
use crate::screens::{CartAction, CartState};
use crate::state::AppState;

/// Mount the cart screen: read the stored cart and compute its total.
#[instrument(skip(state))]
pub async fn mount<S: KeyValueStore>(state: &AppState<S>) -> CartState {
    match state.cart().list_all().await {
        Ok(items) => CartState::mount().update(CartAction::Loaded(items)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load cart");
            CartState::mount().update(CartAction::LoadFailed)
        }
    }
}

/// Remove a product from the cart.
///
/// On a storage failure the list is left as it was and a notice is shown.
#[instrument(skip(state, screen))]
pub async fn remove<S: KeyValueStore>(
    state: &AppState<S>,
    screen: CartState,
    id: ProductId,
) -> CartState {
    let product_id = id.to_string();
    add_breadcrumb("cart", "Remove from cart", Some(&[("product_id", product_id.as_str())]));

    match state.cart().remove_item(id).await {
        Ok(_) => screen.update(CartAction::Removed(id)),
        Err(e) => {
            tracing::error!(product_id = %id, error = %e, "Failed to remove item from cart");
            screen.update(CartAction::RemoveFailed(id))
        }
    }
}

/// Checkout is not offered; the screen only shows a notice.
#[must_use]
pub fn checkout(screen: CartState) -> CartState {
    tracing::info!(items = screen.items.len(), "Checkout requested");
    screen.update(CartAction::Checkout)
}

/// Cart items whose product changed price or left the catalog.
///
/// Fetches the catalog once. When the catalog can't be fetched there is
/// nothing to compare against and the result is empty.
#[instrument(skip(state, screen))]
pub async fn price_drift<S: KeyValueStore>(state: &AppState<S>, screen: &CartState) -> Vec<ItemDrift> {
    match state.catalog().fetch_all().await {
        CatalogOutcome::Failed(_) => Vec::new(),
        outcome => reconcile(&screen.items, &outcome.into_products()),
    }
}
