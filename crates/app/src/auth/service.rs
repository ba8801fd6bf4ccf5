//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::auth::{
    ApiTokenMetadata, ApiTokenUuid, ApiTokenVersion, AuthServiceError, IssuedApiToken,
    NewApiToken, format_api_token, generate_api_token_secret, hash_api_token, parse_api_token,
    repositories::{ApiTokensRepository, InMemoryApiTokensRepository, PgApiTokensRepository},
};

/// Token authentication backed by Postgres.
pub type PgAuthService = TokenAuthService<PgApiTokensRepository>;

/// Token authentication backed by process memory.
pub type InMemoryAuthService = TokenAuthService<InMemoryApiTokensRepository>;

#[derive(Debug, Clone)]
pub struct TokenAuthService<R> {
    repository: R,
}

impl<R: ApiTokensRepository> TokenAuthService<R> {
    #[must_use]
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Issue a new API token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be stored.
    pub async fn issue_api_token(
        &self,
        label: String,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = ApiTokenUuid::new();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid.into_uuid(), version, &secret);

        let metadata = self
            .repository
            .create_api_token(NewApiToken {
                uuid: token_uuid,
                label,
                version,
                token_hash: hash_api_token(&token_uuid.into_uuid(), version, &secret),
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    pub async fn list_api_tokens(&self) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_api_tokens().await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage query fails.
    pub async fn revoke_api_token(&self, token: ApiTokenUuid) -> Result<bool, AuthServiceError> {
        Ok(self.repository.revoke_api_token(token).await?.is_some())
    }
}

#[async_trait]
impl<R: ApiTokensRepository> AuthService for TokenAuthService<R> {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<ApiTokenUuid, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token_uuid = ApiTokenUuid::from_uuid(parsed_token.token_uuid);

        let token = self
            .repository
            .find_active_api_token(token_uuid, Timestamp::now())
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let expected = hash_api_token(
            &parsed_token.token_uuid,
            parsed_token.version,
            &parsed_token.secret,
        );

        if expected != token.token_hash {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success should not depend on this write.
        let _touch_result = self.repository.touch_api_token_last_used(token.uuid).await;

        Ok(token.uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the API token it identifies.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<ApiTokenUuid, AuthServiceError>;
}
