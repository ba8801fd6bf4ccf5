//! Get Offer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use offerbook_app::domain::offers::records::OfferUuid;

use crate::{
    extensions::*,
    offers::{errors::into_status_error, responses::OfferResponse},
    state::State,
};

/// Get Offer Handler
#[endpoint(
    tags("offers"),
    summary = "Get Offer",
    responses(
        (status_code = StatusCode::OK, description = "Offer"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let offer = state
        .app
        .offers
        .get_offer(OfferUuid::from_uuid(offer.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(offer.into()))
}
