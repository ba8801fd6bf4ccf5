//! Offer Requests

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use offerbook::offers::{patch::OfferPatch, rules::OfferRules, scope::OfferScope};
use offerbook_app::domain::offers::data::NewOffer;

/// Discount parameters, tagged by offer type. Money is in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum OfferRulesPayload {
    BuyXGetY {
        buy_quantity: u32,
        get_quantity: u32,
    },
    BundleDiscount {
        bundle_price: u64,
        min_quantity: u32,
    },
    PercentageOff {
        /// Decimal string in `0..=100`, e.g. `"12.5"`
        #[salvo(schema(value_type = String))]
        discount_percentage: Decimal,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_quantity: Option<u32>,
    },
    FixedAmountOff {
        discount_amount: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_quantity: Option<u32>,
    },
}

impl From<OfferRulesPayload> for OfferRules {
    fn from(payload: OfferRulesPayload) -> Self {
        match payload {
            OfferRulesPayload::BuyXGetY {
                buy_quantity,
                get_quantity,
            } => OfferRules::BuyXGetY {
                buy_quantity,
                get_quantity,
            },
            OfferRulesPayload::BundleDiscount {
                bundle_price,
                min_quantity,
            } => OfferRules::BundleDiscount {
                bundle_price,
                min_quantity,
            },
            OfferRulesPayload::PercentageOff {
                discount_percentage,
                min_quantity,
            } => OfferRules::PercentageOff {
                discount_percentage,
                min_quantity,
            },
            OfferRulesPayload::FixedAmountOff {
                discount_amount,
                min_quantity,
            } => OfferRules::FixedAmountOff {
                discount_amount,
                min_quantity,
            },
        }
    }
}

impl From<OfferRules> for OfferRulesPayload {
    fn from(rules: OfferRules) -> Self {
        match rules {
            OfferRules::BuyXGetY {
                buy_quantity,
                get_quantity,
            } => Self::BuyXGetY {
                buy_quantity,
                get_quantity,
            },
            OfferRules::BundleDiscount {
                bundle_price,
                min_quantity,
            } => Self::BundleDiscount {
                bundle_price,
                min_quantity,
            },
            OfferRules::PercentageOff {
                discount_percentage,
                min_quantity,
            } => Self::PercentageOff {
                discount_percentage,
                min_quantity,
            },
            OfferRules::FixedAmountOff {
                discount_amount,
                min_quantity,
            } => Self::FixedAmountOff {
                discount_amount,
                min_quantity,
            },
        }
    }
}

/// Create Offer Request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOfferRequest {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub rules: OfferRulesPayload,

    #[serde(default)]
    pub product_uuids: Vec<Uuid>,

    #[serde(default)]
    pub category_uuids: Vec<Uuid>,

    #[serde(default)]
    pub subcategory_uuids: Vec<Uuid>,

    #[serde(default)]
    pub gender_uuids: Vec<Uuid>,

    /// RFC 3339 timestamp, inclusive
    #[salvo(schema(value_type = String))]
    pub starts_at: Timestamp,

    /// RFC 3339 timestamp, inclusive; must be after `starts_at`
    #[salvo(schema(value_type = String))]
    pub ends_at: Timestamp,

    /// Defaults to `true`
    #[serde(default)]
    pub is_active: Option<bool>,

    /// Defaults to `0`; higher wins
    #[serde(default)]
    pub priority: Option<u32>,
}

impl From<CreateOfferRequest> for NewOffer {
    fn from(request: CreateOfferRequest) -> Self {
        NewOffer {
            name: request.name,
            description: request.description,
            rules: request.rules.into(),
            scope: OfferScope {
                product_uuids: request.product_uuids,
                category_uuids: request.category_uuids,
                subcategory_uuids: request.subcategory_uuids,
                gender_uuids: request.gender_uuids,
            },
            starts_at: request.starts_at,
            ends_at: request.ends_at,
            is_active: request.is_active,
            priority: request.priority,
        }
    }
}

/// Update Offer Request
///
/// Omitted fields are left unchanged. `description: null` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOfferRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[salvo(schema(value_type = Option<String>))]
    pub description: Option<Option<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<OfferRulesPayload>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_uuids: Option<Vec<Uuid>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_uuids: Option<Vec<Uuid>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_uuids: Option<Vec<Uuid>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender_uuids: Option<Vec<Uuid>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[salvo(schema(value_type = Option<String>))]
    pub starts_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[salvo(schema(value_type = Option<String>))]
    pub ends_at: Option<Timestamp>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

/// A field that is present maps to `Some`, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateOfferRequest> for OfferPatch {
    fn from(request: UpdateOfferRequest) -> Self {
        OfferPatch {
            name: request.name,
            description: request.description,
            rules: request.rules.map(Into::into),
            product_uuids: request.product_uuids,
            category_uuids: request.category_uuids,
            subcategory_uuids: request.subcategory_uuids,
            gender_uuids: request.gender_uuids,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
            is_active: request.is_active,
            priority: request.priority,
        }
    }
}
