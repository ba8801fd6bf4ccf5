//! Offer Rules
//!
//! Each offer type carries only the parameters its discount formula reads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::offers::OfferType;

/// Discount parameters for an offer, keyed by offer type.
///
/// Monetary amounts are in minor units (pence/cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OfferRules {
    /// Buy `buy_quantity` items and receive `get_quantity` more for free, repeated per full set.
    BuyXGetY {
        /// Paid items per set.
        buy_quantity: u32,

        /// Free items per set.
        get_quantity: u32,
    },

    /// Sell `min_quantity` or more items for a fixed bundle price.
    BundleDiscount {
        /// Price charged for the whole line once the bundle applies.
        bundle_price: u64,

        /// Minimum line quantity for the bundle to apply.
        min_quantity: u32,
    },

    /// Take a percentage off the line total.
    PercentageOff {
        /// Percentage in the range `0..=100`.
        discount_percentage: Decimal,

        /// Optional minimum line quantity.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_quantity: Option<u32>,
    },

    /// Take a fixed amount off the line total, capped at the line total.
    FixedAmountOff {
        /// Amount to take off.
        discount_amount: u64,

        /// Optional minimum line quantity.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_quantity: Option<u32>,
    },
}

impl OfferRules {
    /// Return the offer type these rules belong to.
    #[must_use]
    pub const fn offer_type(&self) -> OfferType {
        match self {
            Self::BuyXGetY { .. } => OfferType::BuyXGetY,
            Self::BundleDiscount { .. } => OfferType::BundleDiscount,
            Self::PercentageOff { .. } => OfferType::PercentageOff,
            Self::FixedAmountOff { .. } => OfferType::FixedAmountOff,
        }
    }

    /// Return the minimum line quantity, if the rules define one.
    #[must_use]
    pub const fn min_quantity(&self) -> Option<u32> {
        match self {
            Self::BuyXGetY { .. } => None,
            Self::BundleDiscount { min_quantity, .. } => Some(*min_quantity),
            Self::PercentageOff { min_quantity, .. } | Self::FixedAmountOff { min_quantity, .. } => {
                *min_quantity
            }
        }
    }
}
