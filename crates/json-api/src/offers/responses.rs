//! Offer Responses

use jiff::Timestamp;
use offerbook::discounts::{Discount, InapplicableReason};
use offerbook_app::domain::offers::{
    data::{DeletedOffer, OfferDiscount, OffersPage},
    records::OfferRecord,
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::offers::requests::OfferRulesPayload;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferResponse {
    /// The unique identifier of the offer
    pub uuid: Uuid,

    pub name: String,

    pub description: Option<String>,

    /// One of `buy_x_get_y`, `bundle_discount`, `percentage_off`, `fixed_amount_off`
    pub offer_type: String,

    pub rules: OfferRulesPayload,

    pub product_uuids: Vec<Uuid>,

    pub category_uuids: Vec<Uuid>,

    pub subcategory_uuids: Vec<Uuid>,

    pub gender_uuids: Vec<Uuid>,

    /// Start of the validity window (inclusive)
    pub starts_at: String,

    /// End of the validity window (inclusive)
    pub ends_at: String,

    pub is_active: bool,

    pub priority: u32,

    /// The date and time the offer was created
    pub created_at: String,

    /// The date and time the offer was last updated
    pub updated_at: String,
}

impl From<OfferRecord> for OfferResponse {
    fn from(record: OfferRecord) -> Self {
        let OfferRecord {
            uuid,
            offer,
            created_at,
            updated_at,
        } = record;

        OfferResponse {
            uuid: uuid.into_uuid(),
            offer_type: offer.offer_type().to_string(),
            name: offer.name,
            description: offer.description,
            rules: offer.rules.into(),
            product_uuids: offer.scope.product_uuids,
            category_uuids: offer.scope.category_uuids,
            subcategory_uuids: offer.scope.subcategory_uuids,
            gender_uuids: offer.scope.gender_uuids,
            starts_at: offer.starts_at.to_string(),
            ends_at: offer.ends_at.to_string(),
            is_active: offer.is_active,
            priority: offer.priority,
            created_at: created_at.to_string(),
            updated_at: updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OffersResponse {
    /// Offers in precedence order
    pub offers: Vec<OfferResponse>,
}

impl From<Vec<OfferRecord>> for OffersResponse {
    fn from(records: Vec<OfferRecord>) -> Self {
        OffersResponse {
            offers: records.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OffersPageResponse {
    /// Offers on this page, in precedence order
    pub offers: Vec<OfferResponse>,

    /// Offers matching the filter across all pages
    pub total: u64,

    pub page: u32,

    pub limit: u32,

    /// `ceil(total / limit)`; zero when nothing matches
    pub total_pages: u64,
}

impl From<OffersPage> for OffersPageResponse {
    fn from(page: OffersPage) -> Self {
        OffersPageResponse {
            offers: page.offers.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferDeletedResponse {
    pub uuid: Uuid,
    pub name: String,
    pub message: String,
}

impl From<DeletedOffer> for OfferDeletedResponse {
    fn from(deleted: DeletedOffer) -> Self {
        OfferDeletedResponse {
            uuid: deleted.uuid.into_uuid(),
            message: format!("Offer \"{}\" deleted", deleted.name),
            name: deleted.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DiscountResponse {
    pub offer_uuid: Uuid,

    pub offer_type: String,

    /// Whether the offer is enabled and inside its window at `evaluated_at`
    pub live: bool,

    /// Whether the rules produced a discount for the line
    pub applicable: bool,

    /// Discount in minor units; zero when not applicable
    pub amount: u64,

    /// Why the rules did not apply: `zero_quantity`, `below_minimum_quantity` or `empty_set`
    pub reason: Option<String>,

    /// Minimum quantity the offer requires, when that is the reason
    pub required_quantity: Option<u32>,

    pub evaluated_at: String,
}

impl DiscountResponse {
    pub(crate) fn new(evaluation: OfferDiscount, at: Timestamp) -> Self {
        let (reason, required_quantity) = match evaluation.discount {
            Discount::Applied { .. } => (None, None),
            Discount::Inapplicable { reason } => match reason {
                InapplicableReason::ZeroQuantity => (Some("zero_quantity"), None),
                InapplicableReason::BelowMinimumQuantity { required } => {
                    (Some("below_minimum_quantity"), Some(required))
                }
                InapplicableReason::EmptySet => (Some("empty_set"), None),
            },
        };

        DiscountResponse {
            offer_uuid: evaluation.offer.uuid.into_uuid(),
            offer_type: evaluation.offer.offer.offer_type().to_string(),
            live: evaluation.live,
            applicable: evaluation.discount.is_applicable(),
            amount: evaluation.discount.amount(),
            reason: reason.map(ToString::to_string),
            required_quantity,
            evaluated_at: at.to_string(),
        }
    }
}
