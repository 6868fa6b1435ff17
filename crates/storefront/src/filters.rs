//! Display helpers shared by the screen views.

use chrono::{Days, NaiveDate};
use shopfront_core::PriceField;

/// Placeholder shown for a price that is not a number.
pub const UNAVAILABLE_PRICE: &str = "N/A";

/// Cut `text` to at most `max_chars` characters, appending `...` when cut.
#[must_use]
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", text.get(..byte_index).unwrap_or(text)),
        None => text.to_string(),
    }
}

/// Format a price field as "$19.99", or [`UNAVAILABLE_PRICE`] if it isn't numeric.
#[must_use]
pub fn format_price(price: &PriceField) -> String {
    price
        .price()
        .map_or_else(|| UNAVAILABLE_PRICE.to_string(), |p| p.display())
}

/// Human-readable delivery estimate `days` after `from` (e.g., "Monday, October 23").
#[must_use]
pub fn estimated_delivery(from: NaiveDate, days: u32) -> String {
    from.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(from)
        .format("%A, %B %-d")
        .to_string()
}
