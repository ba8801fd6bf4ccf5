//! Update Offer Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use offerbook_app::domain::offers::records::OfferUuid;

use crate::{
    extensions::*,
    offers::{
        errors::into_status_error, requests::UpdateOfferRequest, responses::OfferResponse,
    },
    state::State,
};

/// Update Offer Handler
///
/// Supplied fields are merged over the stored offer and the result is validated as a whole,
/// so changing only `priority` still fails if the stored window is invalid.
#[endpoint(
    tags("offers"),
    summary = "Update Offer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offer updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid API token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "offers.update",
    skip(offer, json, depot),
    fields(
        api_token = tracing::field::Empty,
        offer_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    json: JsonBody<UpdateOfferRequest>,
    depot: &mut Depot,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let api_token = depot.api_token_or_401()?;
    let offer = OfferUuid::from_uuid(offer.into_inner());

    let span = tracing::Span::current();

    span.record("api_token", tracing::field::display(api_token));
    span.record("offer_uuid", tracing::field::display(offer));

    let updated = state
        .app
        .offers
        .update_offer(offer, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
