//! In-memory offers storage.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use offerbook::offers::{Offer, ordering::sort_by_precedence};
use tokio::sync::RwLock;

use crate::domain::offers::{
    data::{OfferFilter, PageWindow},
    records::{OfferRecord, OfferUuid},
    repositories::OffersRepository,
};

/// Process-local offers storage, lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryOffersRepository {
    offers: RwLock<HashMap<OfferUuid, OfferRecord>>,
}

impl InMemoryOffersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OffersRepository for InMemoryOffersRepository {
    async fn find_offers(
        &self,
        filter: OfferFilter,
        window: Option<PageWindow>,
    ) -> Result<Vec<OfferRecord>, sqlx::Error> {
        let mut offers: Vec<OfferRecord> = self
            .offers
            .read()
            .await
            .values()
            .filter(|record| filter.matches(&record.offer))
            .cloned()
            .collect();

        sort_by_precedence(&mut offers);

        let Some(window) = window else {
            return Ok(offers);
        };

        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);

        Ok(offers.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_offers(&self, filter: OfferFilter) -> Result<u64, sqlx::Error> {
        let count = self
            .offers
            .read()
            .await
            .values()
            .filter(|record| filter.matches(&record.offer))
            .count();

        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn find_offer(&self, offer: OfferUuid) -> Result<OfferRecord, sqlx::Error> {
        self.offers
            .read()
            .await
            .get(&offer)
            .cloned()
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn insert_offer(&self, offer: Offer) -> Result<OfferRecord, sqlx::Error> {
        let now = Timestamp::now();

        let record = OfferRecord {
            uuid: OfferUuid::new(),
            offer,
            created_at: now,
            updated_at: now,
        };

        self.offers.write().await.insert(record.uuid, record.clone());

        Ok(record)
    }

    async fn save_offer(&self, uuid: OfferUuid, offer: Offer) -> Result<OfferRecord, sqlx::Error> {
        let mut offers = self.offers.write().await;

        let record = offers.get_mut(&uuid).ok_or(sqlx::Error::RowNotFound)?;

        record.offer = offer;
        record.updated_at = Timestamp::now().max(record.created_at);

        Ok(record.clone())
    }

    async fn delete_offer(&self, offer: OfferUuid) -> Result<u64, sqlx::Error> {
        Ok(u64::from(self.offers.write().await.remove(&offer).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use offerbook::offers::{rules::OfferRules, scope::OfferScope};
    use testresult::TestResult;

    use super::*;

    fn offer(name: &str, priority: u32, starts_at: Timestamp) -> Offer {
        Offer {
            name: name.to_string(),
            description: None,
            rules: OfferRules::BuyXGetY {
                buy_quantity: 2,
                get_quantity: 1,
            },
            scope: OfferScope::default(),
            starts_at,
            ends_at: starts_at + SignedDuration::from_hours(24),
            is_active: true,
            priority,
        }
    }

    #[tokio::test]
    async fn inserted_offer_can_be_found() -> TestResult {
        let repository = InMemoryOffersRepository::new();
        let at: Timestamp = "2026-04-01T00:00:00Z".parse()?;

        let record = repository.insert_offer(offer("Promo", 0, at)).await?;
        let found = repository.find_offer(record.uuid).await?;

        assert_eq!(found, record);
        assert_eq!(found.created_at, found.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn missing_offer_is_row_not_found() {
        let repository = InMemoryOffersRepository::new();

        let result = repository.find_offer(OfferUuid::new()).await;

        assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
    }

    #[tokio::test]
    async fn saving_missing_offer_is_row_not_found() -> TestResult {
        let repository = InMemoryOffersRepository::new();
        let at: Timestamp = "2026-04-01T00:00:00Z".parse()?;

        let result = repository
            .save_offer(OfferUuid::new(), offer("Ghost", 0, at))
            .await;

        assert!(matches!(result, Err(sqlx::Error::RowNotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn windowed_results_follow_precedence() -> TestResult {
        let repository = InMemoryOffersRepository::new();
        let at: Timestamp = "2026-04-01T00:00:00Z".parse()?;

        repository.insert_offer(offer("Low", 1, at)).await?;
        repository.insert_offer(offer("High", 9, at)).await?;
        repository.insert_offer(offer("Middle", 5, at)).await?;

        let first = repository
            .find_offers(
                OfferFilter::default(),
                Some(PageWindow {
                    offset: 0,
                    limit: 2,
                }),
            )
            .await?;

        let rest = repository
            .find_offers(
                OfferFilter::default(),
                Some(PageWindow {
                    offset: 2,
                    limit: 2,
                }),
            )
            .await?;

        let names: Vec<&str> = first
            .iter()
            .chain(&rest)
            .map(|record| record.offer.name.as_str())
            .collect();

        assert_eq!(names, vec!["High", "Middle", "Low"]);
        assert_eq!(repository.count_offers(OfferFilter::default()).await?, 3);

        Ok(())
    }

    #[tokio::test]
    async fn delete_reports_rows_removed() -> TestResult {
        let repository = InMemoryOffersRepository::new();
        let at: Timestamp = "2026-04-01T00:00:00Z".parse()?;

        let record = repository.insert_offer(offer("Gone", 0, at)).await?;

        assert_eq!(repository.delete_offer(record.uuid).await?, 1);
        assert_eq!(repository.delete_offer(record.uuid).await?, 0);

        Ok(())
    }
}
