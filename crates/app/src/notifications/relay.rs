//! HTTP notification relay client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::notifications::{
    NotificationError, NotificationReceipt, Notifier, OrderStatusNotification,
};

const ORDER_STATUS_TEMPLATE: &str = "order-status-update";

/// Configuration for the notification relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Endpoint that accepts notification requests.
    pub url: String,

    /// Optional bearer token sent with every request.
    pub token: Option<String>,
}

/// Hands notifications to an HTTP relay that owns email delivery.
#[derive(Debug, Clone)]
pub struct RelayNotifier {
    config: RelayConfig,
    http: Client,
}

impl RelayNotifier {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: RelayConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    template: &'static str,
    to: &'a str,
    data: &'a OrderStatusNotification,
}

#[async_trait]
impl Notifier for RelayNotifier {
    async fn send_order_status_update(
        &self,
        notification: &OrderStatusNotification,
    ) -> Result<NotificationReceipt, NotificationError> {
        let body = RelayRequest {
            template: ORDER_STATUS_TEMPLATE,
            to: &notification.email,
            data: notification,
        };

        let mut request = self.http.post(&self.config.url).json(&body);

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(NotificationError::UnexpectedResponse(format!(
                "relay request failed with status {status}: {text}"
            )));
        }

        debug!(order = %notification.order_id, "order status update relayed");

        Ok(NotificationReceipt::sent(format!(
            "order status update sent to {}",
            notification.email
        )))
    }
}

#[cfg(test)]
mod tests {
    use shopease::orders::{OrderStatus, PaymentStatus};

    use crate::domain::orders::OrderUuid;

    use super::*;

    #[tokio::test]
    async fn unreachable_relay_is_an_http_error() {
        let notifier = RelayNotifier::new(RelayConfig {
            url: "http://127.0.0.1:9/notify".to_string(),
            token: Some("secret".to_string()),
        });

        let result = notifier
            .send_order_status_update(&OrderStatusNotification {
                order_id: OrderUuid::new(),
                email: "sana@example.pk".to_string(),
                customer_name: "Sana".to_string(),
                status: OrderStatus::Shipped,
                payment_status: PaymentStatus::Pending,
                note: None,
            })
            .await;

        assert!(
            matches!(result, Err(NotificationError::Http(_))),
            "expected Http, got {result:?}"
        );
    }
}
