//! Offer Scope

use uuid::Uuid;

/// Catalog dimensions an offer is restricted to.
///
/// An empty list leaves that dimension unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferScope {
    /// Products the offer applies to.
    pub product_uuids: Vec<Uuid>,

    /// Categories the offer applies to.
    pub category_uuids: Vec<Uuid>,

    /// Subcategories the offer applies to.
    pub subcategory_uuids: Vec<Uuid>,

    /// Gender segments the offer applies to.
    pub gender_uuids: Vec<Uuid>,
}

impl OfferScope {
    /// Return whether the product dimension admits `product`.
    #[must_use]
    pub fn includes_product(&self, product: Uuid) -> bool {
        self.product_uuids.is_empty() || self.product_uuids.contains(&product)
    }
}
