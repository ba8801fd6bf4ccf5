//! In-memory API token storage.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::auth::{
    ActiveApiToken, ApiTokenMetadata, ApiTokenUuid, NewApiToken, repositories::ApiTokensRepository,
};

#[derive(Debug, Clone)]
struct StoredApiToken {
    metadata: ApiTokenMetadata,
    token_hash: String,
}

/// Process-local token storage, lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryApiTokensRepository {
    tokens: RwLock<HashMap<ApiTokenUuid, StoredApiToken>>,
}

impl InMemoryApiTokensRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApiTokensRepository for InMemoryApiTokensRepository {
    async fn create_api_token(&self, token: NewApiToken) -> Result<ApiTokenMetadata, sqlx::Error> {
        let metadata = ApiTokenMetadata {
            uuid: token.uuid,
            label: token.label,
            version: token.version,
            created_at: Timestamp::now(),
            last_used_at: None,
            expires_at: token.expires_at,
            revoked_at: None,
        };

        self.tokens.write().await.insert(
            token.uuid,
            StoredApiToken {
                metadata: metadata.clone(),
                token_hash: token.token_hash,
            },
        );

        Ok(metadata)
    }

    async fn find_active_api_token(
        &self,
        token: ApiTokenUuid,
        at: Timestamp,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error> {
        Ok(self
            .tokens
            .read()
            .await
            .get(&token)
            .filter(|stored| stored.metadata.is_usable_at(at))
            .map(|stored| ActiveApiToken {
                uuid: stored.metadata.uuid,
                version: stored.metadata.version,
                token_hash: stored.token_hash.clone(),
            }))
    }

    async fn list_api_tokens(&self) -> Result<Vec<ApiTokenMetadata>, sqlx::Error> {
        let mut tokens: Vec<ApiTokenMetadata> = self
            .tokens
            .read()
            .await
            .values()
            .map(|stored| stored.metadata.clone())
            .collect();

        tokens.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.uuid.cmp(&a.uuid)));

        Ok(tokens)
    }

    async fn revoke_api_token(
        &self,
        token: ApiTokenUuid,
    ) -> Result<Option<ApiTokenMetadata>, sqlx::Error> {
        let mut tokens = self.tokens.write().await;

        let Some(stored) = tokens
            .get_mut(&token)
            .filter(|stored| stored.metadata.revoked_at.is_none())
        else {
            return Ok(None);
        };

        stored.metadata.revoked_at = Some(Timestamp::now());

        Ok(Some(stored.metadata.clone()))
    }

    async fn touch_api_token_last_used(&self, token: ApiTokenUuid) -> Result<(), sqlx::Error> {
        if let Some(stored) = self.tokens.write().await.get_mut(&token) {
            stored.metadata.last_used_at = Some(Timestamp::now());
        }

        Ok(())
    }
}
