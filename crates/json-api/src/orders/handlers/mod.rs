//! Order Handlers

pub(crate) mod admin_index;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update_status;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopease_app::domain::orders::{CustomerDetails, OrderItem, OrderRecord, TimelineEvent};

use crate::money::{self, TotalsResponse};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// The customer who placed the order
    pub user_uuid: Uuid,

    /// Fulfilment status
    pub status: String,

    /// Payment status
    pub payment_status: String,

    /// Payment method
    pub payment_method: String,

    /// Contact and shipping details
    pub customer: CustomerResponse,

    /// Purchased lines, priced at checkout
    pub items: Vec<OrderItemResponse>,

    /// Totals copied from the cart
    pub totals: TotalsResponse,

    /// Status history, oldest first
    pub timeline: Vec<TimelineEventResponse>,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time the order last changed
    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            user_uuid: order.user_id.into_uuid(),
            status: order.status.as_str().to_string(),
            payment_status: order.payment_status.as_str().to_string(),
            payment_method: order.payment_method.as_str().to_string(),
            customer: order.customer.into(),
            items: order.items.into_iter().map(OrderItemResponse::from).collect(),
            totals: order.totals.into(),
            timeline: order
                .timeline
                .into_iter()
                .map(TimelineEventResponse::from)
                .collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Customer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
}

impl From<CustomerDetails> for CustomerResponse {
    fn from(customer: CustomerDetails) -> Self {
        Self {
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            address: customer.address,
            city: customer.city,
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_id: String,
    pub name: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
    pub image: Option<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name,
            unit_price: money::amount(item.unit_price),
            quantity: item.quantity,
            line_total: money::amount(item.line_total),
            image: item.image,
        }
    }
}

/// Timeline Event Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TimelineEventResponse {
    pub status: String,
    pub note: Option<String>,
    pub at: String,
}

impl From<TimelineEvent> for TimelineEventResponse {
    fn from(event: TimelineEvent) -> Self {
        Self {
            status: event.status.as_str().to_string(),
            note: event.note,
            at: event.at.to_string(),
        }
    }
}
