//! Offers
//!
//! An offer is a promotional rule with a validity window, an applicability scope and a
//! priority used to rank offers that apply at the same time.

use std::fmt;

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    discounts::{Discount, calculate_discount},
    offers::{rules::OfferRules, scope::OfferScope},
};

pub mod ordering;
pub mod patch;
pub mod rules;
pub mod scope;
pub mod validation;

/// Priority given to offers created without one. Lower than any explicit priority above zero.
pub const DEFAULT_PRIORITY: u32 = 0;

/// The discount strategy an offer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfferType {
    /// Buy some, get some free.
    BuyXGetY,

    /// Fixed price for a minimum quantity.
    BundleDiscount,

    /// Percentage off the line total.
    PercentageOff,

    /// Fixed amount off the line total.
    FixedAmountOff,
}

impl OfferType {
    /// Return the stable string form used in storage and over the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BuyXGetY => "buy_x_get_y",
            Self::BundleDiscount => "bundle_discount",
            Self::PercentageOff => "percentage_off",
            Self::FixedAmountOff => "fixed_amount_off",
        }
    }
}

impl fmt::Display for OfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The writable state of an offer.
///
/// Identity and timestamps are assigned by storage and live on the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    /// Display name.
    pub name: String,

    /// Free text description.
    pub description: Option<String>,

    /// Discount parameters.
    pub rules: OfferRules,

    /// Catalog applicability.
    pub scope: OfferScope,

    /// First instant the offer is valid (inclusive).
    pub starts_at: Timestamp,

    /// Last instant the offer is valid (inclusive).
    pub ends_at: Timestamp,

    /// Administrative toggle, independent of the validity window.
    pub is_active: bool,

    /// Rank among simultaneously valid offers; higher wins.
    pub priority: u32,
}

impl Offer {
    /// Return the offer type implied by the rules.
    #[must_use]
    pub const fn offer_type(&self) -> OfferType {
        self.rules.offer_type()
    }

    /// Return whether `at` falls inside the validity window.
    #[must_use]
    pub fn is_within_window(&self, at: Timestamp) -> bool {
        self.starts_at <= at && at <= self.ends_at
    }

    /// Return whether the offer is enabled and inside its validity window at `at`.
    #[must_use]
    pub fn is_live_at(&self, at: Timestamp) -> bool {
        self.is_active && self.is_within_window(at)
    }

    /// Return whether the offer is live at `at` and its scope admits `product`.
    #[must_use]
    pub fn applies_to_product_at(&self, product: Uuid, at: Timestamp) -> bool {
        self.is_live_at(at) && self.scope.includes_product(product)
    }

    /// Calculate the discount this offer yields for a line.
    #[must_use]
    pub fn discount(&self, quantity: u32, unit_price: u64) -> Discount {
        calculate_discount(&self.rules, quantity, unit_price)
    }
}
