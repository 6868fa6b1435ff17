//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive as bare JSON numbers. [`Price`] holds a parsed amount
//! with its currency; [`PriceField`] is the raw field as it appears on a
//! product or stored cart item, which may not be numeric at all.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A price in the default currency.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// Zero in the default currency.
    #[must_use]
    pub const fn zero() -> Self {
        Self::usd(Decimal::ZERO)
    }

    /// This price multiplied by a line quantity, or `None` if the product
    /// does not fit in a `Decimal`.
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// Format for display with two decimals (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Saturates at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.amount.saturating_add(rhs.amount), self.currency_code)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

/// The `price` field of a product or cart item as it was received.
///
/// Anything other than a JSON number is kept verbatim as [`PriceField::Malformed`]
/// so that a stored item survives a round trip unchanged and contributes
/// nothing to totals.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceField {
    /// A numeric price.
    Valid(Price),
    /// A non-numeric value (string, null, object, ...).
    Malformed(serde_json::Value),
}

impl PriceField {
    /// The parsed price, if the field was numeric.
    #[must_use]
    pub const fn price(&self) -> Option<Price> {
        match self {
            Self::Valid(price) => Some(*price),
            Self::Malformed(_) => None,
        }
    }

    /// Classify a raw JSON value.
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Self {
        match &value {
            serde_json::Value::Number(n) => {
                decimal_from_number(n).map_or(Self::Malformed(value), |d| Self::Valid(Price::usd(d)))
            }
            _ => Self::Malformed(value),
        }
    }
}

impl Default for PriceField {
    fn default() -> Self {
        Self::Malformed(serde_json::Value::Null)
    }
}

impl From<Decimal> for PriceField {
    fn from(amount: Decimal) -> Self {
        Self::Valid(Price::usd(amount))
    }
}

impl Serialize for PriceField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Valid(price) => rust_decimal::serde::float::serialize(&price.amount, serializer),
            Self::Malformed(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PriceField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from_json)
    }
}

fn decimal_from_number(n: &serde_json::Number) -> Option<Decimal> {
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_price_display() {
        assert_eq!(Price::usd(dec!(19.9)).display(), "$19.90");
        assert_eq!(Price::new(dec!(5), CurrencyCode::EUR).to_string(), "€5.00");
    }

    #[test]
    fn test_price_times_and_sum() {
        let total: Price = [
            Price::usd(dec!(1.25)).checked_times(2).unwrap(),
            Price::usd(dec!(0.5)),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.amount, dec!(3.0));
    }

    #[test]
    fn test_price_times_overflow_is_none() {
        let huge = Price::usd(Decimal::from_scientific("1e20").unwrap());
        assert!(huge.checked_times(u32::MAX).is_none());
        assert!(huge.checked_times(3).is_some());
    }

    #[test]
    fn test_price_sum_saturates() {
        let big = Price::usd(Decimal::from_scientific("5e28").unwrap());
        let total: Price = [big, big].into_iter().sum();
        assert_eq!(total.amount, Decimal::MAX);
        assert!(total.display().starts_with("$79228162514264337593543950335"));
    }

    #[test]
    fn test_price_field_numeric() {
        let field: PriceField = serde_json::from_str("9.99").unwrap();
        assert_eq!(field.price().unwrap().amount, dec!(9.99));
    }

    #[test]
    fn test_price_field_numeric_string_is_malformed() {
        let field: PriceField = serde_json::from_str("\"9.99\"").unwrap();
        assert_eq!(field, PriceField::Malformed(serde_json::json!("9.99")));
        assert!(field.price().is_none());
    }

    #[test]
    fn test_price_field_keeps_malformed_value() {
        let field = PriceField::from_json(serde_json::json!({"amount": 3}));
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json, serde_json::json!({"amount": 3}));
    }

    #[test]
    fn test_price_field_serializes_as_number() {
        let field = PriceField::from(dec!(109.95));
        assert_eq!(serde_json::to_string(&field).unwrap(), "109.95");
    }

    #[test]
    fn test_price_field_scientific_notation() {
        let field: PriceField = serde_json::from_str("1e2").unwrap();
        assert_eq!(field.price().unwrap().amount, dec!(100));
    }
}
