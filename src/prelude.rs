//! Offerbook prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    discounts::{Discount, InapplicableReason, calculate_discount},
    offers::{
        DEFAULT_PRIORITY, Offer, OfferType,
        ordering::{Ranked, by_precedence, sort_by_precedence},
        patch::OfferPatch,
        rules::OfferRules,
        scope::OfferScope,
        validation::{OfferValidationError, validate},
    },
};
