//! CLI command implementations.
//!
//! Each command mounts the screen it needs through the storefront handlers,
//! applies the user's action, and prints the resulting view. Rendering is kept
//! in plain `render_*` functions returning `String` so it can be tested
//! without a terminal.

pub mod cart;
pub mod catalog;
