//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shopease::{
    cart::LineItem,
    orders::{OrderStatus, PaymentStatus},
    pricing::{TotalsAmounts, round_money},
};

use crate::{
    auth::UserUuid,
    documents::Document,
    domain::orders::{data::CustomerDetails, errors::OrdersServiceError},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// A purchased line, priced at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<&LineItem> for OrderItem {
    fn from(line: &LineItem) -> Self {
        Self {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            unit_price: round_money(line.unit_price()),
            quantity: line.quantity,
            line_total: round_money(line.line_total()),
            image: line.product.images.first().cloned(),
        }
    }
}

/// Totals copied from the cart at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub currency: String,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl From<&TotalsAmounts> for OrderTotals {
    fn from(totals: &TotalsAmounts) -> Self {
        Self {
            currency: totals.currency.to_owned(),
            subtotal: totals.subtotal,
            tax: totals.tax,
            shipping: totals.shipping,
            discount: totals.discount,
            total: totals.total,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cash_on_delivery",
        }
    }
}

/// One entry in an order's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub at: Timestamp,
}

/// Body of an `order` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderBody {
    pub user_id: UserUuid,
    pub customer: CustomerDetails,
    pub items: Vec<OrderItem>,
    pub totals: OrderTotals,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub user_id: UserUuid,
    pub customer: CustomerDetails,
    pub items: Vec<OrderItem>,
    pub totals: OrderTotals,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub timeline: Vec<TimelineEvent>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<&Document> for OrderRecord {
    type Error = OrdersServiceError;

    fn try_from(document: &Document) -> Result<Self, Self::Error> {
        let body: OrderBody = document.decode()?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(document.id),
            user_id: body.user_id,
            customer: body.customer,
            items: body.items,
            totals: body.totals,
            status: body.status,
            payment_status: body.payment_status,
            payment_method: body.payment_method,
            timeline: body.timeline,
            created_at: document.created_at,
            updated_at: document.updated_at,
        })
    }
}
