//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use offerbook_app::auth::ApiTokenUuid;

const API_TOKEN_DEPOT_KEY: &str = "api_token_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the API token the request authenticated with.
    fn insert_api_token(&mut self, token: ApiTokenUuid);

    /// The authenticated API token, or `401` when the request is anonymous.
    fn api_token_or_401(&self) -> Result<ApiTokenUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_api_token(&mut self, token: ApiTokenUuid) {
        self.insert(API_TOKEN_DEPOT_KEY, token);
    }

    fn api_token_or_401(&self) -> Result<ApiTokenUuid, StatusError> {
        self.get::<ApiTokenUuid>(API_TOKEN_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
