//! List My Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// List My Orders Handler
///
/// Returns the signed-in shopper's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders of the signed-in shopper"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shopper = depot.identity_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders_for_user(shopper.user_id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopease_app::domain::orders::{MockOrdersService, OrderUuid};

    use crate::{
        orders::tests::make_order,
        test_helpers::{TEST_USER_UUID, TestState, anonymous_service, customer_service},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("orders").get(handler)
    }

    #[tokio::test]
    async fn test_index_lists_only_own_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders_for_user()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|user| Ok(vec![make_order(OrderUuid::new(), user)]));
        orders.expect_list_orders().never();

        let mut res = TestClient::get("http://example.com/orders")
            .send(&customer_service(TestState::new().orders(orders), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<OrderResponse> = res.take_json().await?;

        assert_eq!(body.len(), 1);
        assert_eq!(
            body.first().map(|order| order.user_uuid),
            Some(TEST_USER_UUID.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_requires_sign_in() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders_for_user().never();

        let res = TestClient::get("http://example.com/orders")
            .send(&anonymous_service(TestState::new().orders(orders), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
