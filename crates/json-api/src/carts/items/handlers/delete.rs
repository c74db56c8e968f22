//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    carts::{errors::into_status_error, items::CartUpdatedResponse},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Removing a product that is not in the cart is not an error.
#[endpoint(
    tags("cart"),
    summary = "Remove Item from Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Line removed, or not in cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Cart could not be saved"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.delete",
    skip(product, depot),
    fields(user_uuid = tracing::field::Empty, product_id = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CartUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shopper = depot.identity_or_401()?;
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(shopper.user_id));
    span.record("product_id", tracing::field::display(&product));

    let update = state
        .app
        .carts
        .remove_item(shopper.user_id, &product)
        .await
        .map_err(into_status_error)?;

    Ok(Json(update.into()))
}
