//! Orders

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, not yet picked up by the shop.
    #[default]
    Pending,

    /// Being packed.
    Processing,

    /// Handed to the courier.
    Shipped,

    /// Received by the customer.
    Delivered,

    /// Will not be fulfilled.
    Cancelled,
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Awaiting payment.
    #[default]
    Pending,

    /// Payment received.
    Paid,

    /// Payment attempt failed.
    Failed,

    /// Payment returned to the customer.
    Refunded,
}

/// Error parsing a status name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} status: {value}")]
pub struct ParseStatusError {
    kind: &'static str,
    value: String,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl PaymentStatus {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseStatusError {
                kind: "order",
                value: value.to_owned(),
            })
    }
}

impl FromStr for PaymentStatus {
    type Err = ParseStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(ParseStatusError {
                kind: "payment",
                value: other.to_owned(),
            }),
        }
    }
}

/// Fields written together when an order's status changes.
///
/// Delivery implies payment: moving to [`OrderStatus::Delivered`] also marks
/// the order [`PaymentStatus::Paid`] in the same write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPatch {
    /// New fulfilment status.
    pub status: OrderStatus,

    /// New payment status, if it changes too.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl StatusPatch {
    /// Build the patch for moving an order to `status`.
    pub fn for_status(status: OrderStatus) -> Self {
        let payment_status = (status == OrderStatus::Delivered).then_some(PaymentStatus::Paid);

        Self {
            status,
            payment_status,
        }
    }
}
