//! Screen lifecycle glue.
//!
//! Handlers perform the catalog and cart I/O for a screen and fold the results
//! into its state. They never return errors: failures are logged here and
//! turned into the screen's degraded state (empty list, failure notice).

pub mod cart;
pub mod catalog;
