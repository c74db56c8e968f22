//! List All Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// List All Orders Handler
#[endpoint(
    tags("admin"),
    summary = "List All Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Every order, newest first"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
        (status_code = StatusCode::FORBIDDEN, description = "Admins only"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.admin_or_403()?;

    let orders = state
        .app
        .orders
        .list_orders()
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use shopease_app::{
        auth::UserUuid,
        documents::DocumentStoreError,
        domain::orders::{MockOrdersService, OrderUuid, OrdersServiceError},
    };

    use crate::{
        orders::tests::make_order,
        test_helpers::{TestState, admin_service, anonymous_service, customer_service},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/orders").get(handler)
    }

    #[tokio::test]
    async fn test_admin_lists_every_order() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().once().return_once(|| {
            Ok(vec![
                make_order(OrderUuid::new(), UserUuid::new()),
                make_order(OrderUuid::new(), UserUuid::new()),
            ])
        });

        let mut res = TestClient::get("http://example.com/admin/orders")
            .send(&admin_service(TestState::new().orders(orders), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: Vec<OrderResponse> = res.take_json().await?;

        assert_eq!(body.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_is_forbidden() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/admin/orders")
            .send(&customer_service(TestState::new().orders(orders), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_anonymous_is_unauthorized() -> TestResult {
        let res = TestClient::get("http://example.com/admin/orders")
            .send(&anonymous_service(TestState::new(), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_store_failure_returns_500() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_orders()
            .once()
            .return_once(|| Err(OrdersServiceError::Store(DocumentStoreError::InvalidData)));

        let res = TestClient::get("http://example.com/admin/orders")
            .send(&admin_service(TestState::new().orders(orders), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
