//! Catalog screen handlers.

use chrono::{Local, Utc};
use shopfront_core::{CartItem, ProductId};
use tracing::instrument;

use crate::cart::KeyValueStore;
use crate::error::add_breadcrumb;
use crate::screens::{CatalogAction, CatalogState, DetailView};
use crate::state::AppState;

/// Mount the catalog screen: fetch the product list once.
#[instrument(skip(state))]
pub async fn mount<S: KeyValueStore>(state: &AppState<S>) -> CatalogState {
    let outcome = state.catalog().fetch_all().await;
    CatalogState::mount().update(CatalogAction::Fetched(outcome))
}

/// Detail overlay for the product currently open on `screen`.
#[must_use]
pub fn detail<S: KeyValueStore>(state: &AppState<S>, screen: &CatalogState) -> Option<DetailView> {
    screen.overlay_product().map(|product| {
        DetailView::new(
            product,
            Local::now().date_naive(),
            state.config().delivery_days,
        )
    })
}

/// Snapshot a listed product into the cart.
///
/// Unknown ids leave the screen unchanged. Storage failures are logged and
/// shown as a notice.
#[instrument(skip(state, screen))]
pub async fn add_to_cart<S: KeyValueStore>(
    state: &AppState<S>,
    screen: CatalogState,
    id: ProductId,
) -> CatalogState {
    let Some(product) = screen.product(id) else {
        tracing::warn!(product_id = %id, "Add to cart for unlisted product");
        return screen;
    };

    let item = CartItem::from_product(product, Utc::now());
    let product_id = id.to_string();
    add_breadcrumb("cart", "Add to cart", Some(&[("product_id", product_id.as_str())]));

    match state.cart().add_item(item).await {
        Ok(outcome) => screen.update(CatalogAction::AddedToCart { id, outcome }),
        Err(e) => {
            tracing::error!(product_id = %id, error = %e, "Failed to add item to cart");
            screen.update(CatalogAction::AddFailed { id })
        }
    }
}
