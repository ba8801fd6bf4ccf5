//! Delete Offer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use offerbook_app::domain::offers::records::OfferUuid;

use crate::{
    extensions::*,
    offers::{errors::into_status_error, responses::OfferDeletedResponse},
    state::State,
};

/// Delete Offer Handler
#[endpoint(
    tags("offers"),
    summary = "Delete Offer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Offer deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Offer not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid API token"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    offer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OfferDeletedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let api_token = depot.api_token_or_401()?;

    let deleted = state
        .app
        .offers
        .delete_offer(OfferUuid::from_uuid(offer.into_inner()))
        .await
        .map_err(into_status_error)?;

    tracing::info!(offer_uuid = %deleted.uuid, api_token = %api_token, "offer deleted over http");

    Ok(Json(deleted.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use offerbook_app::domain::offers::{
        MockOffersService, OffersServiceError, data::DeletedOffer,
    };

    use crate::test_helpers::offers_service;

    use super::*;

    fn make_service(offers: MockOffersService) -> Service {
        offers_service(offers, Router::with_path("offers/{offer}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_offer_success() -> TestResult {
        let uuid = OfferUuid::new();

        let mut offers = MockOffersService::new();

        offers
            .expect_delete_offer()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| {
                Ok(DeletedOffer {
                    uuid,
                    name: "Spring".to_string(),
                })
            });

        let mut res = TestClient::delete(format!("http://example.com/offers/{uuid}"))
            .send(&make_service(offers))
            .await;

        let body: OfferDeletedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.name, "Spring");
        assert!(body.message.contains("Spring"), "message should name the offer");

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_offer_not_found_returns_404() -> TestResult {
        let mut offers = MockOffersService::new();

        offers
            .expect_delete_offer()
            .once()
            .return_once(|_| Err(OffersServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/offers/{}", Uuid::now_v7()))
            .send(&make_service(offers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
