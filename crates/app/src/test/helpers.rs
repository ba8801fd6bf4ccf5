//! Test Helpers

use jiff::{SignedDuration, Timestamp};
use offerbook::offers::{rules::OfferRules, scope::OfferScope};
use rust_decimal::Decimal;

use crate::domain::offers::{
    InMemoryOffersService, RepositoryOffersService, data::NewOffer,
    repositories::InMemoryOffersRepository,
};

pub(crate) fn in_memory_offers() -> InMemoryOffersService {
    RepositoryOffersService::new(InMemoryOffersRepository::new())
}

/// A week-long 10% off offer with creation defaults left unset.
pub(crate) fn new_offer(name: &str, starts_at: Timestamp) -> NewOffer {
    NewOffer {
        name: name.to_string(),
        description: None,
        rules: OfferRules::PercentageOff {
            discount_percentage: Decimal::TEN,
            min_quantity: None,
        },
        scope: OfferScope::default(),
        starts_at,
        ends_at: starts_at + SignedDuration::from_hours(24 * 7),
        is_active: None,
        priority: None,
    }
}
