//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopease::orders::OrderStatus;
use shopease_app::domain::orders::{NotificationOutcome, StatusUpdate};

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    /// pending, processing, shipped, delivered or cancelled
    pub status: String,

    /// Message for the customer and the order timeline
    #[serde(default)]
    pub note: Option<String>,
}

/// Notification Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationResponse {
    /// Whether the customer was notified
    pub sent: bool,

    /// Why the notification failed
    pub message: Option<String>,
}

impl From<NotificationOutcome> for NotificationResponse {
    fn from(outcome: NotificationOutcome) -> Self {
        match outcome {
            NotificationOutcome::Sent => Self {
                sent: true,
                message: None,
            },
            NotificationOutcome::Failed { message } => Self {
                sent: false,
                message: Some(message),
            },
        }
    }
}

/// Order Status Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderStatusUpdatedResponse {
    /// The order after the change
    pub order: OrderResponse,

    /// Customer notification result; a failure does not undo the change
    pub notification: NotificationResponse,
}

impl From<StatusUpdate> for OrderStatusUpdatedResponse {
    fn from(update: StatusUpdate) -> Self {
        Self {
            order: update.order.into(),
            notification: update.notification.into(),
        }
    }
}

/// Update Order Status Handler
///
/// Delivered orders are also marked paid.
#[endpoint(
    tags("admin"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
        (status_code = StatusCode::FORBIDDEN, description = "Admins only"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(order_uuid = tracing::field::Empty, status = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderStatusUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.admin_or_403()?;

    let order = order.into_inner();
    let request = json.into_inner();

    let status = request
        .status
        .parse::<OrderStatus>()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", status.as_str());

    let note = request
        .note
        .map(|note| note.trim().to_owned())
        .filter(|note| !note.is_empty());

    let update = state
        .app
        .orders
        .update_status(order.into(), status, note)
        .await
        .map_err(into_status_error)?;

    tracing::info!(
        payment_status = update.order.payment_status.as_str(),
        notified = matches!(update.notification, NotificationOutcome::Sent),
        "updated order status"
    );

    Ok(Json(update.into()))
}
