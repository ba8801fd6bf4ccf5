//! App Router

use salvo::{
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
};

use crate::{auth, healthcheck, offers};

/// Offer routes. Reads are public; writes go through the bearer token middleware.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::with_path("offers")
                .get(offers::index::handler)
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .post(offers::create::handler),
                )
                .push(Router::with_path("active").get(offers::active::handler))
                .push(Router::with_path("product/{product}").get(offers::product::handler))
                .push(
                    Router::with_path("{offer}")
                        .get(offers::get::handler)
                        .push(Router::with_path("discount").get(offers::discount::handler))
                        .push(
                            Router::new()
                                .hoop(auth::middleware::handler)
                                .patch(offers::update::handler)
                                .delete(offers::delete::handler),
                        ),
                ),
        )
}

/// Add the OpenAPI document and Swagger UI for every route in `router`.
pub(crate) fn with_docs(router: Router) -> Router {
    let doc = OpenApi::new("Offerbook API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"))
}
