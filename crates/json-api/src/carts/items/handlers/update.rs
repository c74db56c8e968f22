//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{errors::into_status_error, items::CartUpdatedResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity, at least one. Use DELETE to remove a line.
    pub quantity: i64,
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Set Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity set, or line not in cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Cart could not be saved"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.update",
    skip(product, json, depot),
    fields(
        user_uuid = tracing::field::Empty,
        product_id = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    product: PathParam<String>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shopper = depot.identity_or_401()?;
    let product = product.into_inner();
    let quantity = json.into_inner().quantity;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(shopper.user_id));
    span.record("product_id", tracing::field::display(&product));
    span.record("quantity", quantity);

    let update = state
        .app
        .carts
        .update_quantity(shopper.user_id, &product, quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(update.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use shopease::cart::{CartError, Outcome};
    use shopease_app::domain::carts::{CartUpdate, CartsServiceError, MockCartsService};

    use crate::test_helpers::{TEST_USER_UUID, TestState, customer_service, make_summary};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        customer_service(
            TestState::new().carts(carts),
            Router::with_path("cart/items/{product}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_quantity_returns_cart() -> TestResult {
        let summary = make_summary("lawn-suit", 5).await;

        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .withf(|user, product, quantity| {
                *user == TEST_USER_UUID && product == "lawn-suit" && *quantity == 5
            })
            .return_once(move |_, _, _| {
                Ok(CartUpdate {
                    outcome: Outcome::Applied,
                    summary,
                })
            });

        let mut res = TestClient::put("http://example.com/cart/items/lawn-suit")
            .json(&json!({ "quantity": 5 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartUpdatedResponse = res.take_json().await?;

        assert_eq!(body.outcome, "applied");
        assert_eq!(body.cart.item_count, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_line_reports_not_found_outcome() -> TestResult {
        let summary = make_summary("lawn-suit", 0).await;

        let mut carts = MockCartsService::new();

        carts.expect_update_quantity().once().return_once(move |_, _, _| {
            Ok(CartUpdate {
                outcome: Outcome::NotFound,
                summary,
            })
        });

        let mut res = TestClient::put("http://example.com/cart/items/shawl")
            .json(&json!({ "quantity": 2 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartUpdatedResponse = res.take_json().await?;

        assert_eq!(body.outcome, "not_found");
        assert!(body.cart.lines.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_update_to_zero_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::Cart(CartError::InvalidQuantity(0))));

        let res = TestClient::put("http://example.com/cart/items/lawn-suit")
            .json(&json!({ "quantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
