//! Offer Errors

use salvo::http::StatusError;
use tracing::error;

use offerbook_app::domain::offers::OffersServiceError;

pub(crate) fn into_status_error(error: OffersServiceError) -> StatusError {
    match error {
        OffersServiceError::NotFound => StatusError::not_found().brief("Offer not found"),
        OffersServiceError::AlreadyExists => StatusError::conflict().brief("Offer already exists"),
        OffersServiceError::Invalid(source) => StatusError::bad_request().brief(source.to_string()),
        OffersServiceError::InvalidPagination => StatusError::bad_request()
            .brief("page and limit must both be at least 1"),
        OffersServiceError::InvalidReference
        | OffersServiceError::MissingRequiredData
        | OffersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid offer payload")
        }
        OffersServiceError::Sql(source) => {
            error!("offer storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use offerbook::offers::validation::OfferValidationError;
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn invalid_window_is_a_client_error() {
        let error = into_status_error(OffersServiceError::Invalid(
            OfferValidationError::InvalidTimeWindow,
        ));

        assert_eq!(error.code, StatusCode::BAD_REQUEST);
        assert_eq!(error.brief, OfferValidationError::InvalidTimeWindow.to_string());
    }

    #[test]
    fn missing_offer_is_not_found() {
        assert_eq!(
            into_status_error(OffersServiceError::NotFound).code,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn conflict_maps_to_409() {
        assert_eq!(
            into_status_error(OffersServiceError::AlreadyExists).code,
            StatusCode::CONFLICT
        );
    }
}
