//! Notifications

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

mod errors;
mod log;
mod models;
mod relay;

pub use errors::NotificationError;
pub use log::LogNotifier;
pub use models::{NotificationReceipt, OrderStatusNotification};
pub use relay::{RelayConfig, RelayNotifier};

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell a customer their order changed status.
    async fn send_order_status_update(
        &self,
        notification: &OrderStatusNotification,
    ) -> Result<NotificationReceipt, NotificationError>;
}

/// Relay when configured, otherwise log.
#[must_use]
pub fn notifier(relay: Option<RelayConfig>) -> Arc<dyn Notifier> {
    match relay {
        Some(config) => Arc::new(RelayNotifier::new(config)),
        None => Arc::new(LogNotifier),
    }
}
