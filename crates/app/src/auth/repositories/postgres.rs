//! Postgres API token storage.

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::auth::{
    ActiveApiToken, ApiTokenMetadata, ApiTokenUuid, ApiTokenVersion, NewApiToken,
    repositories::ApiTokensRepository,
};

const CREATE_API_TOKEN_SQL: &str = include_str!("sql/create_api_token.sql");
const FIND_ACTIVE_API_TOKEN_SQL: &str = include_str!("sql/find_active_api_token.sql");
const LIST_API_TOKENS_SQL: &str = include_str!("sql/list_api_tokens.sql");
const REVOKE_API_TOKEN_SQL: &str = include_str!("sql/revoke_api_token.sql");
const TOUCH_API_TOKEN_LAST_USED_SQL: &str = include_str!("sql/touch_api_token_last_used.sql");

#[derive(Debug, Clone)]
pub struct PgApiTokensRepository {
    pool: PgPool,
}

impl PgApiTokensRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiTokensRepository for PgApiTokensRepository {
    async fn create_api_token(&self, token: NewApiToken) -> Result<ApiTokenMetadata, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(CREATE_API_TOKEN_SQL)
            .bind(token.uuid.into_uuid())
            .bind(token.label)
            .bind(token.version.as_i16())
            .bind(token.token_hash)
            .bind(token.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&self.pool)
            .await
    }

    async fn find_active_api_token(
        &self,
        token: ApiTokenUuid,
        at: Timestamp,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error> {
        query_as::<Postgres, ActiveApiToken>(FIND_ACTIVE_API_TOKEN_SQL)
            .bind(token.into_uuid())
            .bind(SqlxTimestamp::from(at))
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_api_tokens(&self) -> Result<Vec<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(LIST_API_TOKENS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    async fn revoke_api_token(
        &self,
        token: ApiTokenUuid,
    ) -> Result<Option<ApiTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, ApiTokenMetadata>(REVOKE_API_TOKEN_SQL)
            .bind(token.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    async fn touch_api_token_last_used(&self, token: ApiTokenUuid) -> Result<(), sqlx::Error> {
        query(TOUCH_API_TOKEN_LAST_USED_SQL)
            .bind(token.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn decode_version(row: &PgRow) -> sqlx::Result<ApiTokenVersion> {
    ApiTokenVersion::try_from(row.try_get::<i16, _>("version")?).map_err(|e| {
        sqlx::Error::ColumnDecode {
            index: "version".to_string(),
            source: Box::new(e),
        }
    })
}

impl<'r> FromRow<'r, PgRow> for ActiveApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ApiTokenUuid::from_uuid(row.try_get("uuid")?),
            version: decode_version(row)?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ApiTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ApiTokenUuid::from_uuid(row.try_get("uuid")?),
            label: row.try_get("label")?,
            version: decode_version(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::test::TestDb;

    use super::*;

    fn new_token(expires_at: Option<Timestamp>) -> NewApiToken {
        NewApiToken {
            uuid: ApiTokenUuid::new(),
            label: "ci".to_string(),
            version: ApiTokenVersion::V1,
            token_hash: "0".repeat(64),
            expires_at,
        }
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn revoked_token_is_no_longer_active() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgApiTokensRepository::new(db.pool().clone());

        let created = repository.create_api_token(new_token(None)).await?;

        assert!(
            repository
                .find_active_api_token(created.uuid, Timestamp::now())
                .await?
                .is_some()
        );

        let revoked = repository.revoke_api_token(created.uuid).await?;

        assert!(revoked.is_some_and(|token| token.revoked_at.is_some()));
        assert!(repository.revoke_api_token(created.uuid).await?.is_none());
        assert!(
            repository
                .find_active_api_token(created.uuid, Timestamp::now())
                .await?
                .is_none()
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn expired_token_is_not_active() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgApiTokensRepository::new(db.pool().clone());
        let now = Timestamp::now();

        let created = repository
            .create_api_token(new_token(Some(now + SignedDuration::from_hours(1))))
            .await?;

        assert!(repository.find_active_api_token(created.uuid, now).await?.is_some());
        assert!(
            repository
                .find_active_api_token(created.uuid, now + SignedDuration::from_hours(2))
                .await?
                .is_none()
        );

        Ok(())
    }
}
