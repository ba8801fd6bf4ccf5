//! Offers Data

use jiff::{RoundMode, Timestamp, TimestampRound, Unit};
use offerbook::{
    discounts::Discount,
    offers::{DEFAULT_PRIORITY, Offer, rules::OfferRules, scope::OfferScope},
};
use uuid::Uuid;

use crate::domain::offers::records::{OfferRecord, OfferUuid};

/// Page size used when a listing does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// New Offer Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOffer {
    pub name: String,
    pub description: Option<String>,
    pub rules: OfferRules,
    pub scope: OfferScope,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,

    /// Defaults to enabled.
    pub is_active: Option<bool>,

    /// Defaults to [`DEFAULT_PRIORITY`].
    pub priority: Option<u32>,
}

impl NewOffer {
    /// Apply creation defaults.
    #[must_use]
    pub fn into_offer(self) -> Offer {
        Offer {
            name: self.name,
            description: self.description,
            rules: self.rules,
            scope: self.scope,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            is_active: self.is_active.unwrap_or(true),
            priority: self.priority.unwrap_or(DEFAULT_PRIORITY),
        }
    }
}

/// Truncate an offer's window to the microsecond precision `timestamptz` keeps.
///
/// Applied before validation so the stored window is the validated one.
#[must_use]
pub fn with_storage_precision(mut offer: Offer) -> Offer {
    offer.starts_at = truncate_to_micros(offer.starts_at);
    offer.ends_at = truncate_to_micros(offer.ends_at);

    offer
}

fn truncate_to_micros(timestamp: Timestamp) -> Timestamp {
    let options = TimestampRound::new()
        .smallest(Unit::Microsecond)
        .mode(RoundMode::Trunc);

    timestamp.round(options).unwrap_or(timestamp)
}

/// Paginated listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffersQuery {
    /// One-based page number.
    pub page: u32,

    /// Page size, at least 1.
    pub limit: u32,

    /// Only offers with this administrative state; `None` lists both.
    pub is_active: Option<bool>,
}

impl Default for OffersQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            is_active: None,
        }
    }
}

impl OffersQuery {
    /// Return whether page and limit are in range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.page >= 1 && self.limit >= 1
    }

    /// Row window selected by this page.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        PageWindow {
            offset: u64::from(self.page.saturating_sub(1)) * u64::from(self.limit),
            limit: u64::from(self.limit),
        }
    }

    /// Storage filter selected by this query.
    #[must_use]
    pub fn filter(&self) -> OfferFilter {
        OfferFilter {
            is_active: self.is_active,
            ..OfferFilter::default()
        }
    }
}

/// Rows to skip and take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

/// Storage-side offer filter. Unset fields do not restrict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OfferFilter {
    /// Administrative state.
    pub is_active: Option<bool>,

    /// Only offers live at this instant.
    pub live_at: Option<Timestamp>,

    /// Only offers whose product scope admits this product.
    pub product: Option<Uuid>,
}

impl OfferFilter {
    /// Offers live at `at`.
    #[must_use]
    pub fn live_at(at: Timestamp) -> Self {
        Self {
            live_at: Some(at),
            ..Self::default()
        }
    }

    /// Offers live at `at` that apply to `product`.
    #[must_use]
    pub fn for_product(product: Uuid, at: Timestamp) -> Self {
        Self {
            live_at: Some(at),
            product: Some(product),
            ..Self::default()
        }
    }

    /// Return whether `offer` passes the filter.
    #[must_use]
    pub fn matches(&self, offer: &Offer) -> bool {
        self.is_active.is_none_or(|is_active| offer.is_active == is_active)
            && self.live_at.is_none_or(|at| offer.is_live_at(at))
            && self
                .product
                .is_none_or(|product| offer.scope.includes_product(product))
    }
}

/// One page of offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffersPage {
    pub offers: Vec<OfferRecord>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

/// Summary of a deleted offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedOffer {
    pub uuid: OfferUuid,
    pub name: String,
}

/// A discount evaluated against a stored offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferDiscount {
    pub offer: OfferRecord,
    pub discount: Discount,

    /// Whether the offer was live at the evaluation instant.
    pub live: bool,
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use super::*;

    fn new_offer(starts_at: Timestamp) -> NewOffer {
        NewOffer {
            name: "Weekend Deal".to_string(),
            description: None,
            rules: OfferRules::FixedAmountOff {
                discount_amount: 100,
                min_quantity: None,
            },
            scope: OfferScope::default(),
            starts_at,
            ends_at: starts_at + SignedDuration::from_hours(48),
            is_active: None,
            priority: None,
        }
    }

    #[test]
    fn creation_defaults_are_applied() -> TestResult {
        let offer = new_offer("2026-03-07T00:00:00Z".parse()?).into_offer();

        assert!(offer.is_active);
        assert_eq!(offer.priority, DEFAULT_PRIORITY);

        Ok(())
    }

    #[test]
    fn explicit_values_override_defaults() -> TestResult {
        let offer = NewOffer {
            is_active: Some(false),
            priority: Some(4),
            ..new_offer("2026-03-07T00:00:00Z".parse()?)
        }
        .into_offer();

        assert!(!offer.is_active);
        assert_eq!(offer.priority, 4);

        Ok(())
    }

    #[test]
    fn storage_precision_drops_sub_microsecond_digits() -> TestResult {
        let offer = with_storage_precision(NewOffer {
            ends_at: "2026-03-08T00:00:00.123456789Z".parse()?,
            ..new_offer("2026-03-07T00:00:00.0000009Z".parse()?)
        }
        .into_offer());

        assert_eq!(offer.starts_at, "2026-03-07T00:00:00Z".parse::<Timestamp>()?);
        assert_eq!(
            offer.ends_at,
            "2026-03-08T00:00:00.123456Z".parse::<Timestamp>()?
        );

        Ok(())
    }

    #[test]
    fn pagination_bounds() {
        assert!(OffersQuery::default().is_valid());

        for (page, limit, valid) in [
            (0, 10, false),
            (1, 0, false),
            (1, 1, true),
            (1, 100, true),
            (1, 500, true),
            (1, u32::MAX, true),
            (7, 25, true),
        ] {
            let query = OffersQuery {
                page,
                limit,
                is_active: None,
            };

            assert_eq!(query.is_valid(), valid, "page {page}, limit {limit}");
        }
    }

    #[test]
    fn second_page_skips_first() {
        let query = OffersQuery {
            page: 2,
            limit: 10,
            is_active: None,
        };

        assert_eq!(
            query.window(),
            PageWindow {
                offset: 10,
                limit: 10
            }
        );
    }

    #[test]
    fn product_filter_admits_unscoped_offers() -> TestResult {
        let at: Timestamp = "2026-03-07T12:00:00Z".parse()?;
        let product = Uuid::now_v7();
        let mut offer = new_offer("2026-03-07T00:00:00Z".parse()?).into_offer();

        assert!(OfferFilter::for_product(product, at).matches(&offer));

        offer.scope.product_uuids = vec![Uuid::now_v7()];

        assert!(!OfferFilter::for_product(product, at).matches(&offer));

        Ok(())
    }

    #[test]
    fn live_filter_excludes_disabled_offers() -> TestResult {
        let at: Timestamp = "2026-03-07T12:00:00Z".parse()?;
        let mut offer = new_offer("2026-03-07T00:00:00Z".parse()?).into_offer();

        assert!(OfferFilter::live_at(at).matches(&offer));

        offer.is_active = false;

        assert!(!OfferFilter::live_at(at).matches(&offer));
        assert!(
            OfferFilter {
                is_active: Some(false),
                ..OfferFilter::default()
            }
            .matches(&offer)
        );

        Ok(())
    }
}
