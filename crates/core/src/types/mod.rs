//! Core types for Shopfront.
//!
//! This module provides type-safe wrappers for catalog and cart concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{AddOutcome, Cart, CartItem};
pub use id::*;
pub use price::{CurrencyCode, Price, PriceField};
pub use product::{Product, Rating};
