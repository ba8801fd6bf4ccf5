//! Offerbook
//!
//! Offerbook models time-bounded promotional offers for a product catalog and calculates the
//! discount an offer yields for a quantity of items at a given unit price.
//!
//! The crate is pure: it performs no I/O. Persistence and transport live in the
//! `offerbook-app` and `offerbook-json` crates.

pub mod discounts;
pub mod offers;
pub mod prelude;
