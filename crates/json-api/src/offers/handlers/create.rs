//! Create Offer Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    offers::{
        errors::into_status_error, requests::CreateOfferRequest, responses::OfferResponse,
    },
    state::State,
};

/// Create Offer Handler
///
/// `is_active` defaults to `true` and `priority` to `0`. The validity window must end after
/// it starts.
#[endpoint(
    tags("offers"),
    summary = "Create Offer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Offer created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid window, rules or payload"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid API token"),
        (status_code = StatusCode::CONFLICT, description = "Offer already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "offers.create",
    skip(json, depot, res),
    fields(
        api_token = tracing::field::Empty,
        offer_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOfferRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let api_token = depot.api_token_or_401()?;

    let span = tracing::Span::current();

    span.record("api_token", tracing::field::display(api_token));

    let offer = state
        .app
        .offers
        .create_offer(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    span.record("offer_uuid", tracing::field::display(offer.uuid));

    res.add_header(LOCATION, format!("/offers/{}", offer.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(offer.into()))
}
