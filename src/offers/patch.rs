//! Offer Patch
//!
//! Partial updates are merged into a copy of the stored offer. The merged value is what gets
//! validated and saved.

use jiff::Timestamp;
use uuid::Uuid;

use crate::offers::{Offer, rules::OfferRules};

/// Fields to change on an existing offer. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferPatch {
    /// New display name.
    pub name: Option<String>,

    /// New description; `Some(None)` clears it.
    pub description: Option<Option<String>>,

    /// Replacement rules. Rules are replaced as a whole, never merged field by field.
    pub rules: Option<OfferRules>,

    /// Replacement product scope.
    pub product_uuids: Option<Vec<Uuid>>,

    /// Replacement category scope.
    pub category_uuids: Option<Vec<Uuid>>,

    /// Replacement subcategory scope.
    pub subcategory_uuids: Option<Vec<Uuid>>,

    /// Replacement gender scope.
    pub gender_uuids: Option<Vec<Uuid>>,

    /// New window start.
    pub starts_at: Option<Timestamp>,

    /// New window end.
    pub ends_at: Option<Timestamp>,

    /// New administrative toggle.
    pub is_active: Option<bool>,

    /// New priority.
    pub priority: Option<u32>,
}

impl OfferPatch {
    /// Return whether applying the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the patch over `offer`, returning the result.
    #[must_use]
    pub fn apply(self, offer: Offer) -> Offer {
        let Offer {
            name,
            description,
            rules,
            mut scope,
            starts_at,
            ends_at,
            is_active,
            priority,
        } = offer;

        if let Some(products) = self.product_uuids {
            scope.product_uuids = products;
        }

        if let Some(categories) = self.category_uuids {
            scope.category_uuids = categories;
        }

        if let Some(subcategories) = self.subcategory_uuids {
            scope.subcategory_uuids = subcategories;
        }

        if let Some(genders) = self.gender_uuids {
            scope.gender_uuids = genders;
        }

        Offer {
            name: self.name.unwrap_or(name),
            description: self.description.unwrap_or(description),
            rules: self.rules.unwrap_or(rules),
            scope,
            starts_at: self.starts_at.unwrap_or(starts_at),
            ends_at: self.ends_at.unwrap_or(ends_at),
            is_active: self.is_active.unwrap_or(is_active),
            priority: self.priority.unwrap_or(priority),
        }
    }
}
