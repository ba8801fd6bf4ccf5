//! Offer Discount Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use offerbook_app::domain::offers::records::OfferUuid;

use crate::{
    extensions::*,
    offers::{errors::into_status_error, responses::DiscountResponse},
    state::State,
};

/// Offer Discount Handler
///
/// Calculates the discount an offer yields for `quantity` units at `unit_price` minor
/// units each. The rules are applied whether or not the offer is live at `at`; `live`
/// in the response reports that separately.
#[endpoint(
    tags("offers"),
    summary = "Evaluate Offer Discount",
    responses(
        (status_code = StatusCode::OK, description = "Discount evaluation"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    quantity: QueryParam<u32, true>,
    unit_price: QueryParam<u64, true>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<DiscountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let evaluation = state
        .app
        .offers
        .evaluate_discount(
            OfferUuid::from_uuid(offer.into_inner()),
            quantity.into_inner(),
            unit_price.into_inner(),
            point_in_time,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(DiscountResponse::new(evaluation, point_in_time)))
}
