//! Product Offers Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    extensions::*,
    offers::{errors::into_status_error, responses::OffersResponse},
    state::State,
};

/// Product Offers Handler
///
/// Returns the offers active at `at` whose product scope is empty or lists the product.
#[endpoint(
    tags("offers"),
    summary = "List Offers For Product",
    responses(
        (status_code = StatusCode::OK, description = "Offers applicable to the product"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OffersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let offers = state
        .app
        .offers
        .offers_for_product(product.into_inner(), point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(offers.into()))
}
