//! Cart commands: `cart`, `remove`, `drift`, `checkout`.

use std::fmt::Write as _;

use shopfront_core::ProductId;
use shopfront_storefront::cart::{DriftKind, ItemDrift};
use shopfront_storefront::filters::UNAVAILABLE_PRICE;
use shopfront_storefront::handlers;
use shopfront_storefront::screens::CartState;
use shopfront_storefront::state::AppState;

/// Print the cart with its total.
#[allow(clippy::print_stdout)]
pub async fn list(state: &AppState) {
    let screen = handlers::cart::mount(state).await;
    println!("{}", render_cart(&screen));
}

/// Remove a product and print the updated cart.
#[allow(clippy::print_stdout)]
pub async fn remove(state: &AppState, id: ProductId) {
    let screen = handlers::cart::mount(state).await;
    let screen = handlers::cart::remove(state, screen, id).await;
    println!("{}", render_cart(&screen));
}

/// Print cart items whose catalog listing changed.
#[allow(clippy::print_stdout)]
pub async fn drift(state: &AppState) {
    let screen = handlers::cart::mount(state).await;
    let drift = handlers::cart::price_drift(state, &screen).await;
    println!("{}", render_drift(&drift));
}

/// Print the checkout notice.
#[allow(clippy::print_stdout)]
pub async fn checkout(state: &AppState) {
    let screen = handlers::cart::checkout(handlers::cart::mount(state).await);
    if let Some(notice) = &screen.notice {
        println!("{}", notice.message());
    }
}

fn render_cart(screen: &CartState) -> String {
    let mut out = String::new();
    if let Some(notice) = &screen.notice {
        let _ = writeln!(out, "{}", notice.message());
    }

    if screen.items.is_empty() {
        let _ = write!(out, "Your cart is empty.");
        return out;
    }

    for line in screen.lines() {
        let _ = writeln!(
            out,
            "[{}] {}  {} x {} = {}",
            line.id, line.title, line.quantity, line.price, line.line_total
        );
        let _ = writeln!(out, "    {}", line.description);
    }
    let _ = write!(
        out,
        "Total ({} items): {}",
        screen.item_count(),
        screen.total_display()
    );
    out
}

fn render_drift(drift: &[ItemDrift]) -> String {
    if drift.is_empty() {
        return "Cart prices match the catalog.".to_string();
    }

    let shown = |price: Option<shopfront_core::Price>| {
        price.map_or_else(|| UNAVAILABLE_PRICE.to_string(), |p| p.display())
    };

    drift
        .iter()
        .map(|item| match &item.kind {
            DriftKind::PriceChanged { was, now } => format!(
                "[{}] {}: {} -> {}",
                item.id,
                item.title,
                shown(*was),
                shown(*now)
            ),
            DriftKind::Unlisted => format!("[{}] {}: no longer listed", item.id, item.title),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
