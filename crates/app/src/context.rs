//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{
        AuthService, AuthServiceError, InMemoryApiTokensRepository, IssuedApiToken,
        PgApiTokensRepository, TokenAuthService,
    },
    database,
    domain::offers::{
        OffersService, RepositoryOffersService,
        repositories::{InMemoryOffersRepository, PgOffersRepository},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to issue bootstrap token")]
    Auth(#[source] AuthServiceError),
}

#[derive(Clone)]
pub struct AppContext {
    pub offers: Arc<dyn OffersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self {
            offers: Arc::new(RepositoryOffersService::new(PgOffersRepository::new(
                pool.clone(),
            ))),
            auth: Arc::new(TokenAuthService::new(PgApiTokensRepository::new(pool))),
        })
    }

    /// Build a process-local application context.
    ///
    /// Nothing persists across restarts, so a token is issued up front; it is the only
    /// credential that can write.
    ///
    /// # Errors
    ///
    /// Returns an error when the bootstrap token cannot be issued.
    pub async fn in_memory() -> Result<(Self, IssuedApiToken), AppInitError> {
        let auth = TokenAuthService::new(InMemoryApiTokensRepository::new());

        let issued = auth
            .issue_api_token("bootstrap".to_string(), None)
            .await
            .map_err(AppInitError::Auth)?;

        let context = Self {
            offers: Arc::new(RepositoryOffersService::new(InMemoryOffersRepository::new())),
            auth: Arc::new(auth),
        };

        Ok((context, issued))
    }
}
