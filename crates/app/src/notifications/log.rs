//! Logging notifier.

use async_trait::async_trait;
use tracing::info;

use crate::notifications::{
    NotificationError, NotificationReceipt, Notifier, OrderStatusNotification,
};

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_order_status_update(
        &self,
        notification: &OrderStatusNotification,
    ) -> Result<NotificationReceipt, NotificationError> {
        info!(
            order = %notification.order_id,
            email = %notification.email,
            status = %notification.status,
            payment_status = %notification.payment_status,
            "order status update (no relay configured)"
        );

        Ok(NotificationReceipt::sent("order status update logged"))
    }
}
