//! Notification models.

use serde::Serialize;
use shopease::orders::{OrderStatus, PaymentStatus};

use crate::domain::orders::OrderUuid;

/// An order status change to tell the customer about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusNotification {
    pub order_id: OrderUuid,
    pub email: String,
    pub customer_name: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// What a notifier reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationReceipt {
    pub success: bool,
    pub message: String,
}

impl NotificationReceipt {
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
