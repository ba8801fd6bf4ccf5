//! Active Offers Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    offers::{errors::into_status_error, responses::OffersResponse},
    state::State,
};

/// Active Offers Handler
///
/// Returns offers that are enabled and inside their validity window at `at` (RFC 3339,
/// defaults to now), highest priority first.
#[endpoint(
    tags("offers"),
    summary = "List Active Offers",
    responses(
        (status_code = StatusCode::OK, description = "Active offers"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid point in time"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OffersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let offers = state
        .app
        .offers
        .active_offers(point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(offers.into()))
}
