//! Checkout Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::info;

use shopease_app::domain::orders::CustomerDetails;

use crate::{
    extensions::*,
    observability,
    orders::{OrderResponse, errors::checkout_status_error},
    state::State,
};

/// Checkout Request
///
/// Contact and shipping details for a cash-on-delivery order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

impl From<CheckoutRequest> for CustomerDetails {
    fn from(request: CheckoutRequest) -> Self {
        CustomerDetails {
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            city: request.city,
        }
    }
}

/// Checkout Handler
///
/// Places an order for the current cart and empties the cart.
#[endpoint(
    tags("orders"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Empty cart or incomplete details"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Cart unavailable"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(user_uuid = tracing::field::Empty, order_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shopper = depot.identity_or_401()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(shopper.user_id));

    let order = state
        .app
        .carts
        .checkout(shopper, json.into_inner().into())
        .await
        .map_err(checkout_status_error)?;

    span.record("order_uuid", tracing::field::display(order.uuid));

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    observability::record_order_placed();

    info!(total = %order.totals.total, "order placed");

    Ok(Json(order.into()))
}
