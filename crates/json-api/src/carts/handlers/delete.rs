//! Clear Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Cart cleared"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Cart could not be saved"),
    ),
)]
#[tracing::instrument(
    name = "cart.clear",
    skip(depot),
    fields(user_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shopper = depot.identity_or_401()?;

    tracing::Span::current().record("user_uuid", tracing::field::display(shopper.user_id));

    state
        .app
        .carts
        .clear_cart(shopper.user_id)
        .await
        .map_err(into_status_error)?;

    tracing::info!("cleared cart");

    Ok(StatusCode::NO_CONTENT)
}
