//! Catalog commands: `browse`, `show`, `add`.

use std::fmt::Write as _;

use shopfront_core::ProductId;
use shopfront_storefront::error::AppError;
use shopfront_storefront::handlers;
use shopfront_storefront::screens::{CatalogAction, CatalogState, CatalogStatus, DetailView};
use shopfront_storefront::state::AppState;

/// Print the catalog grid.
#[allow(clippy::print_stdout)]
pub async fn browse(state: &AppState) {
    let screen = handlers::catalog::mount(state).await;
    println!("{}", render_catalog(&screen));
}

/// Print the detail overlay for one product.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product is not in the catalog.
#[allow(clippy::print_stdout)]
pub async fn show(state: &AppState, id: ProductId) -> Result<(), AppError> {
    let screen = handlers::catalog::mount(state).await;
    if let Some(message) = status_message(&screen.status) {
        println!("{message}");
        return Ok(());
    }

    let screen = screen.update(CatalogAction::Open(id));
    let view = handlers::catalog::detail(state, &screen)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    println!("{}", render_detail(&view));
    Ok(())
}

/// Add a listed product to the cart and print the notice.
///
/// # Errors
///
/// Returns `AppError::NotFound` if the product is not in the catalog.
#[allow(clippy::print_stdout)]
pub async fn add(state: &AppState, id: ProductId) -> Result<(), AppError> {
    let screen = handlers::catalog::mount(state).await;
    if let Some(message) = status_message(&screen.status) {
        println!("{message}");
        return Ok(());
    }
    if screen.product(id).is_none() {
        return Err(AppError::NotFound(format!("product {id}")));
    }

    let screen = handlers::catalog::add_to_cart(state, screen, id).await;
    if let Some(notice) = &screen.notice {
        println!("{}", notice.message());
    }
    Ok(())
}

/// Message shown instead of the grid when there is nothing to list.
fn status_message(status: &CatalogStatus) -> Option<String> {
    match status {
        CatalogStatus::Loading => Some("Loading...".to_string()),
        CatalogStatus::Loaded => None,
        CatalogStatus::Empty => Some("No products available.".to_string()),
        CatalogStatus::Failed(reason) => Some(format!("Catalog unavailable: {reason}")),
    }
}

fn render_catalog(screen: &CatalogState) -> String {
    if let Some(message) = status_message(&screen.status) {
        return message;
    }

    let mut out = String::new();
    for card in screen.cards() {
        let _ = writeln!(out, "[{}] {}  {}", card.id, card.title, card.price);
        let _ = writeln!(out, "    {}", card.description);
    }
    out.trim_end().to_string()
}

fn render_detail(view: &DetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "{}  |  {}", view.price, view.category);
    if let Some(rating) = &view.rating {
        let _ = writeln!(out, "Rating: {rating}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", view.description);
    let _ = writeln!(out);
    for fact in view.care_facts {
        let _ = writeln!(out, "  * {fact}");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", view.shipping_title);
    let _ = write!(out, "Estimated delivery: {}", view.estimated_delivery);
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use shopfront_core::{PriceField, Product};
    use shopfront_storefront::catalog::CatalogOutcome;

    use super::*;

    fn product(id: i64, title: &str, price: PriceField) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            description: "A sturdy everyday backpack".to_string(),
            price,
            image: String::new(),
            category: "bags".to_string(),
            rating: None,
        }
    }

    #[test]
    fn test_render_catalog_lists_cards() {
        let screen = CatalogState::mount().update(CatalogAction::Fetched(CatalogOutcome::Loaded(
            vec![
                product(1, "Backpack", PriceField::from(rust_decimal::Decimal::new(10995, 2))),
                product(2, "Mystery", PriceField::from_json(serde_json::json!("call us"))),
            ],
        )));

        let out = render_catalog(&screen);
        assert!(out.contains("[1] Backpack  $109.95"));
        assert!(out.contains("[2] Mystery  N/A"));
    }

    #[test]
    fn test_render_catalog_failure() {
        let screen = CatalogState::mount().update(CatalogAction::Fetched(CatalogOutcome::Failed(
            "connection refused".to_string(),
        )));
        assert_eq!(render_catalog(&screen), "Catalog unavailable: connection refused");
    }

    #[test]
    fn test_render_catalog_empty() {
        let screen = CatalogState::mount().update(CatalogAction::Fetched(CatalogOutcome::Empty));
        assert_eq!(render_catalog(&screen), "No products available.");
    }

    #[test]
    fn test_render_detail() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let view = DetailView::new(
            &product(1, "Backpack", PriceField::from(rust_decimal::Decimal::new(10995, 2))),
            today,
            5,
        );

        let out = render_detail(&view);
        assert!(out.starts_with("Backpack\n$109.95  |  bags"));
        assert!(out.ends_with("Estimated delivery: Friday, October 23"));
    }
}
