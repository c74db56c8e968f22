//! App Router

use std::sync::Arc;

use salvo::{
    Router,
    affix_state::inject,
    catch_panic::CatchPanic,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    trailing_slash::remove_slash,
};

use crate::{
    auth, carts, healthcheck, observability, orders, products, reviews, state::State,
};

const OPENAPI_PATH: &str = "/api-doc/openapi.json";

/// Everything the server serves: middleware, storefront routes, the
/// OpenAPI document and Swagger UI under `/docs`.
pub(crate) fn service_router(state: Arc<State>) -> Router {
    let router = Router::new()
        .hoop(observability::request_logging)
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(state))
        .push(app_router());

    let doc = OpenApi::new("ShopEase API", env!("CARGO_PKG_VERSION"))
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    router
        .push(doc.into_router(OPENAPI_PATH))
        .push(SwaggerUi::new(OPENAPI_PATH).into_router("docs"))
}

/// Storefront routes. Authentication is resolved per request; each handler
/// decides whether a signed-in user or an admin is required.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(
                    Router::with_path("products")
                        .get(products::index::handler)
                        .push(
                            Router::with_path("{product}")
                                .get(products::get::handler)
                                .push(
                                    Router::with_path("reviews")
                                        .get(reviews::index::handler)
                                        .post(reviews::create::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .delete(carts::delete::handler)
                        .push(
                            Router::with_path("items")
                                .post(carts::items::create::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .put(carts::items::update::handler)
                                        .delete(carts::items::delete::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("orders")
                        .get(orders::index::handler)
                        .post(orders::create::handler)
                        .push(Router::with_path("{order}").get(orders::get::handler)),
                )
                .push(
                    Router::with_path("admin")
                        .push(
                            Router::with_path("orders")
                                .get(orders::admin_index::handler)
                                .push(
                                    Router::with_path("{order}/status")
                                        .put(orders::update_status::handler),
                                ),
                        )
                        .push(
                            Router::with_path("reviews/{review}")
                                .put(reviews::moderate::handler),
                        ),
                ),
        )
}
