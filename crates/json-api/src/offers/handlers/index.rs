//! Offer Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use offerbook_app::domain::offers::data::OffersQuery;

use crate::{
    extensions::*,
    offers::{errors::into_status_error, responses::OffersPageResponse},
    state::State,
};

/// Offer Index Handler
///
/// Returns one page of offers, highest priority first. `is_active` (or `isActive`) filters by
/// the administrative toggle only; omit it to list both.
#[endpoint(
    tags("offers"),
    summary = "List Offers",
    responses(
        (status_code = StatusCode::OK, description = "Page of offers"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid pagination"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    is_active: QueryParam<bool, false>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<OffersPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let defaults = OffersQuery::default();

    let is_active = match is_active.into_inner() {
        Some(is_active) => Some(is_active),
        None => req
            .queries()
            .get("isActive")
            .map(|value| value.parse::<bool>())
            .transpose()
            .or_400("isActive must be true or false")?,
    };

    let query = OffersQuery {
        page: page.into_inner().unwrap_or(defaults.page),
        limit: limit.into_inner().unwrap_or(defaults.limit),
        is_active,
    };

    let page = state
        .app
        .offers
        .list_offers(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
