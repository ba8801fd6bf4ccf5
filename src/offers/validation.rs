//! Offer Validation
//!
//! Structural and temporal invariants checked before an offer is written. Runs on the full
//! offer, so partial updates are validated after merging.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::offers::{Offer, rules::OfferRules};

/// Reasons an offer cannot be stored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OfferValidationError {
    /// The validity window ends at or before it starts.
    #[error("offer must end after it starts")]
    InvalidTimeWindow,

    /// The name is empty or whitespace.
    #[error("offer name must not be empty")]
    EmptyName,

    /// A rule parameter is outside its allowed range.
    #[error("invalid offer rules: {0}")]
    InvalidRules(&'static str),
}

/// Validate an offer.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn validate(offer: &Offer) -> Result<(), OfferValidationError> {
    if offer.ends_at <= offer.starts_at {
        return Err(OfferValidationError::InvalidTimeWindow);
    }

    if offer.name.trim().is_empty() {
        return Err(OfferValidationError::EmptyName);
    }

    validate_rules(&offer.rules)
}

fn validate_rules(rules: &OfferRules) -> Result<(), OfferValidationError> {
    match rules {
        OfferRules::BuyXGetY { buy_quantity, .. } if *buy_quantity == 0 => Err(
            OfferValidationError::InvalidRules("buy_quantity must be at least 1"),
        ),
        OfferRules::PercentageOff {
            discount_percentage,
            ..
        } if *discount_percentage < Decimal::ZERO
            || *discount_percentage > Decimal::ONE_HUNDRED =>
        {
            Err(OfferValidationError::InvalidRules(
                "discount_percentage must be between 0 and 100",
            ))
        }
        _ if rules.min_quantity() == Some(0) => Err(OfferValidationError::InvalidRules(
            "min_quantity must be at least 1",
        )),
        _ => Ok(()),
    }
}
