//! API token storage.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::auth::{ActiveApiToken, ApiTokenMetadata, ApiTokenUuid, NewApiToken};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryApiTokensRepository;
pub use postgres::PgApiTokensRepository;

#[automock]
#[async_trait]
pub trait ApiTokensRepository: Send + Sync {
    async fn create_api_token(&self, token: NewApiToken) -> Result<ApiTokenMetadata, sqlx::Error>;

    /// The token, if it exists and is neither revoked nor expired at `at`.
    async fn find_active_api_token(
        &self,
        token: ApiTokenUuid,
        at: Timestamp,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error>;

    /// All tokens, newest first.
    async fn list_api_tokens(&self) -> Result<Vec<ApiTokenMetadata>, sqlx::Error>;

    /// Revoke a token. Returns `None` when it was missing or already revoked.
    async fn revoke_api_token(
        &self,
        token: ApiTokenUuid,
    ) -> Result<Option<ApiTokenMetadata>, sqlx::Error>;

    async fn touch_api_token_last_used(&self, token: ApiTokenUuid) -> Result<(), sqlx::Error>;
}
