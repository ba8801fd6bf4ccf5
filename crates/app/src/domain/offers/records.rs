//! Offer Records

use jiff::Timestamp;
use offerbook::offers::{Offer, ordering::Ranked};
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// Offer UUID
pub type OfferUuid = TypedUuid<OfferRecord>;

/// Offer Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferRecord {
    pub uuid: OfferUuid,
    pub offer: Offer,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Ranked for OfferRecord {
    fn priority(&self) -> u32 {
        self.offer.priority
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn tie_breaker(&self) -> Uuid {
        self.uuid.into_uuid()
    }
}
