//! Test helpers.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use offerbook::offers::{Offer, rules::OfferRules, scope::OfferScope};
use offerbook_app::{
    auth::{ApiTokenUuid, MockAuthService},
    context::AppContext,
    domain::offers::{
        MockOffersService,
        records::{OfferRecord, OfferUuid},
    },
};
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_API_TOKEN: ApiTokenUuid = ApiTokenUuid::from_uuid(Uuid::nil());

/// Stand-in for the auth middleware: every request is authenticated as [`TEST_API_TOKEN`].
#[salvo::handler]
pub(crate) async fn inject_api_token(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_api_token(TEST_API_TOKEN);
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

fn strict_offers_mock() -> MockOffersService {
    let mut offers = MockOffersService::new();

    offers.expect_create_offer().never();
    offers.expect_list_offers().never();
    offers.expect_get_offer().never();
    offers.expect_update_offer().never();
    offers.expect_delete_offer().never();
    offers.expect_active_offers().never();
    offers.expect_offers_for_product().never();
    offers.expect_evaluate_discount().never();

    offers
}

pub(crate) fn state_with_offers(offers: MockOffersService) -> Arc<State> {
    State::from_app_context(AppContext {
        offers: Arc::new(offers),
        auth: Arc::new(strict_auth_mock()),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    State::from_app_context(AppContext {
        offers: Arc::new(strict_offers_mock()),
        auth: Arc::new(auth),
    })
}

pub(crate) fn offers_service(offers: MockOffersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_offers(offers)))
            .hoop(inject_api_token)
            .push(route),
    )
}

pub(crate) fn window_start() -> Timestamp {
    Timestamp::from_second(1_775_001_600).unwrap_or(Timestamp::UNIX_EPOCH)
}

/// A week-long 20% offer stored at [`window_start`].
pub(crate) fn make_offer_record(uuid: OfferUuid, name: &str) -> OfferRecord {
    let starts_at = window_start();

    OfferRecord {
        uuid,
        offer: Offer {
            name: name.to_string(),
            description: None,
            rules: OfferRules::PercentageOff {
                discount_percentage: Decimal::from(20),
                min_quantity: None,
            },
            scope: OfferScope::default(),
            starts_at,
            ends_at: starts_at + SignedDuration::from_hours(24 * 7),
            is_active: true,
            priority: 0,
        },
        created_at: starts_at,
        updated_at: starts_at,
    }
}
