//! Shopfront Storefront library.
//!
//! Catalog client, persisted cart, and screen state for the Shopfront
//! browsing app. Front ends drive it through [`handlers`], which perform the
//! I/O and return plain [`screens`] state to render.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filters;
pub mod handlers;
pub mod screens;
pub mod state;
