//! Postgres offers storage.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use offerbook::offers::{Offer, rules::OfferRules, scope::OfferScope};
use sqlx::{
    FromRow, PgPool, Postgres, Row,
    postgres::{PgArguments, PgRow},
    query, query_as, query_scalar,
    query::QueryAs,
    types::Json,
};

use crate::domain::offers::{
    data::{OfferFilter, PageWindow},
    records::{OfferRecord, OfferUuid},
    repositories::OffersRepository,
};

const FIND_OFFERS_SQL: &str = include_str!("sql/find_offers.sql");
const COUNT_OFFERS_SQL: &str = include_str!("sql/count_offers.sql");
const FIND_OFFER_SQL: &str = include_str!("sql/find_offer.sql");
const INSERT_OFFER_SQL: &str = include_str!("sql/insert_offer.sql");
const SAVE_OFFER_SQL: &str = include_str!("sql/save_offer.sql");
const DELETE_OFFER_SQL: &str = include_str!("sql/delete_offer.sql");

#[derive(Debug, Clone)]
pub struct PgOffersRepository {
    pool: PgPool,
}

impl PgOffersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OffersRepository for PgOffersRepository {
    async fn find_offers(
        &self,
        filter: OfferFilter,
        window: Option<PageWindow>,
    ) -> Result<Vec<OfferRecord>, sqlx::Error> {
        let (limit, offset) = match window {
            Some(window) => (
                Some(to_i64("limit", window.limit)?),
                to_i64("offset", window.offset)?,
            ),
            None => (None, 0),
        };

        query_as::<Postgres, OfferRecord>(FIND_OFFERS_SQL)
            .bind(filter.is_active)
            .bind(filter.live_at.map(SqlxTimestamp::from))
            .bind(filter.product)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    async fn count_offers(&self, filter: OfferFilter) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_OFFERS_SQL)
            .bind(filter.is_active)
            .bind(filter.live_at.map(SqlxTimestamp::from))
            .bind(filter.product)
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    async fn find_offer(&self, offer: OfferUuid) -> Result<OfferRecord, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(FIND_OFFER_SQL)
            .bind(offer.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    async fn insert_offer(&self, offer: Offer) -> Result<OfferRecord, sqlx::Error> {
        bind_offer(
            query_as::<Postgres, OfferRecord>(INSERT_OFFER_SQL).bind(OfferUuid::new().into_uuid()),
            &offer,
        )
        .fetch_one(&self.pool)
        .await
    }

    async fn save_offer(&self, uuid: OfferUuid, offer: Offer) -> Result<OfferRecord, sqlx::Error> {
        bind_offer(
            query_as::<Postgres, OfferRecord>(SAVE_OFFER_SQL).bind(uuid.into_uuid()),
            &offer,
        )
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_offer(&self, offer: OfferUuid) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_OFFER_SQL)
            .bind(offer.into_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

/// Bind parameters `$2..=$13`, shared by insert and save.
fn bind_offer<'q>(
    query: QueryAs<'q, Postgres, OfferRecord, PgArguments>,
    offer: &Offer,
) -> QueryAs<'q, Postgres, OfferRecord, PgArguments> {
    query
        .bind(offer.name.clone())
        .bind(offer.description.clone())
        .bind(offer.offer_type().as_str())
        .bind(Json(offer.rules.clone()))
        .bind(offer.scope.product_uuids.clone())
        .bind(offer.scope.category_uuids.clone())
        .bind(offer.scope.subcategory_uuids.clone())
        .bind(offer.scope.gender_uuids.clone())
        .bind(SqlxTimestamp::from(offer.starts_at))
        .bind(SqlxTimestamp::from(offer.ends_at))
        .bind(offer.is_active)
        .bind(i64::from(offer.priority))
}

fn to_i64(index: &str, value: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::Encode(format!("{index}: {e}").into()))
}

impl<'r> FromRow<'r, PgRow> for OfferRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let priority_i64: i64 = row.try_get("priority")?;

        let priority = u32::try_from(priority_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "priority".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: OfferUuid::from_uuid(row.try_get("uuid")?),
            offer: Offer {
                name: row.try_get("name")?,
                description: row.try_get("description")?,
                rules: row.try_get::<Json<OfferRules>, _>("rules")?.0,
                scope: OfferScope {
                    product_uuids: row.try_get("product_uuids")?,
                    category_uuids: row.try_get("category_uuids")?,
                    subcategory_uuids: row.try_get("subcategory_uuids")?,
                    gender_uuids: row.try_get("gender_uuids")?,
                },
                starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
                ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
                is_active: row.try_get("is_active")?,
                priority,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::test::TestDb;

    use super::*;

    fn offer(name: &str, priority: u32, starts_at: Timestamp) -> Offer {
        Offer {
            name: name.to_string(),
            description: Some("Stored in Postgres".to_string()),
            rules: OfferRules::PercentageOff {
                discount_percentage: Decimal::new(125, 1),
                min_quantity: Some(2),
            },
            scope: OfferScope::default(),
            starts_at,
            ends_at: starts_at + SignedDuration::from_hours(24),
            is_active: true,
            priority,
        }
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn insert_round_trips_offer_state() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgOffersRepository::new(db.pool().clone());
        let at: Timestamp = "2026-04-01T00:00:00Z".parse()?;

        let mut stored = offer("Stored", 3, at);
        stored.scope.product_uuids = vec![Uuid::now_v7(), Uuid::now_v7()];

        let record = repository.insert_offer(stored.clone()).await?;
        let found = repository.find_offer(record.uuid).await?;

        assert_eq!(found.offer, stored);
        assert_eq!(found.uuid, record.uuid);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn window_check_constraint_rejects_inverted_offer() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgOffersRepository::new(db.pool().clone());
        let at: Timestamp = "2026-04-01T00:00:00Z".parse()?;

        let mut inverted = offer("Inverted", 0, at);
        inverted.ends_at = at;

        let result = repository.insert_offer(inverted).await;

        assert!(
            matches!(
                result.as_ref().map_err(|error| error.as_database_error().map(|e| e.kind())),
                Err(Some(sqlx::error::ErrorKind::CheckViolation))
            ),
            "expected check violation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn live_product_filter_and_precedence() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgOffersRepository::new(db.pool().clone());
        let at: Timestamp = "2026-04-01T00:00:00Z".parse()?;
        let product = Uuid::now_v7();

        let mut scoped = offer("Scoped", 1, at);
        scoped.scope.product_uuids = vec![product];

        let mut elsewhere = offer("Elsewhere", 9, at);
        elsewhere.scope.product_uuids = vec![Uuid::now_v7()];

        let mut disabled = offer("Disabled", 9, at);
        disabled.is_active = false;

        repository.insert_offer(scoped).await?;
        repository.insert_offer(elsewhere).await?;
        repository.insert_offer(disabled).await?;
        repository.insert_offer(offer("Everywhere", 5, at)).await?;

        let found = repository
            .find_offers(
                OfferFilter::for_product(product, at + SignedDuration::from_hours(1)),
                None,
            )
            .await?;

        let names: Vec<&str> = found.iter().map(|r| r.offer.name.as_str()).collect();

        assert_eq!(names, vec!["Everywhere", "Scoped"]);
        assert_eq!(repository.count_offers(OfferFilter::default()).await?, 4);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn save_and_delete_missing_offer() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgOffersRepository::new(db.pool().clone());
        let at: Timestamp = "2026-04-01T00:00:00Z".parse()?;

        let result = repository
            .save_offer(OfferUuid::new(), offer("Ghost", 0, at))
            .await;

        assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
        assert_eq!(repository.delete_offer(OfferUuid::new()).await?, 0);

        Ok(())
    }
}
