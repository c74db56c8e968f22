//! Orders service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use serde_json::Map;
use shopease::{
    cart::CartSummary,
    orders::{OrderStatus, PaymentStatus, StatusPatch},
};
use tracing::{info, warn};

use crate::{
    auth::{Identity, UserUuid},
    documents::{Document, DocumentStore, Filter, Mutation, NewDocument, kinds},
    domain::orders::{
        data::CustomerDetails,
        errors::OrdersServiceError,
        records::{
            OrderBody, OrderItem, OrderRecord, OrderTotals, OrderUuid, PaymentMethod, TimelineEvent,
        },
    },
    notifications::{Notifier, OrderStatusNotification},
};

const ORDER_PLACED_NOTE: &str = "Order placed";
const TIMELINE_FIELD: &str = "timeline";

/// What happened to the customer notification after a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent,
    Failed { message: String },
}

/// A committed status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub order: OrderRecord,
    pub notification: NotificationOutcome,
}

#[derive(Clone)]
pub struct DocumentOrdersService {
    documents: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for DocumentOrdersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentOrdersService").finish_non_exhaustive()
    }
}

impl DocumentOrdersService {
    #[must_use]
    pub fn new(documents: Arc<dyn DocumentStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            documents,
            notifier,
        }
    }

    async fn fetch_orders(&self, filter: Filter) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let documents = self.documents.fetch(filter).await?;

        let orders = documents
            .iter()
            .filter_map(|document| match OrderRecord::try_from(document) {
                Ok(order) => Some(order),
                Err(error) => {
                    warn!(order = %document.id, "skipping invalid order: {error}");
                    None
                }
            })
            .collect();

        Ok(orders)
    }

    async fn notify(&self, order: &OrderRecord, note: Option<String>) -> NotificationOutcome {
        let notification = OrderStatusNotification {
            order_id: order.uuid,
            email: order.customer.email.clone(),
            customer_name: order.customer.name.clone(),
            status: order.status,
            payment_status: order.payment_status,
            note,
        };

        match self.notifier.send_order_status_update(&notification).await {
            Ok(receipt) if receipt.success => NotificationOutcome::Sent,
            Ok(receipt) => {
                warn!(order = %order.uuid, "status notification rejected: {}", receipt.message);

                NotificationOutcome::Failed {
                    message: receipt.message,
                }
            }
            Err(error) => {
                warn!(order = %order.uuid, "status notification failed: {error}");

                NotificationOutcome::Failed {
                    message: error.to_string(),
                }
            }
        }
    }
}

fn order_from_document(document: &Document) -> Result<OrderRecord, OrdersServiceError> {
    if !document.is_kind(kinds::ORDER) {
        return Err(OrdersServiceError::NotFound);
    }

    OrderRecord::try_from(document)
}

#[async_trait]
impl OrdersService for DocumentOrdersService {
    #[tracing::instrument(
        name = "orders.place",
        skip(self, customer, cart),
        fields(user = %user.user_id),
        err
    )]
    async fn place_order(
        &self,
        user: &Identity,
        customer: CustomerDetails,
        cart: &CartSummary,
    ) -> Result<OrderRecord, OrdersServiceError> {
        if cart.lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let customer = customer.normalized()?;

        let body = OrderBody {
            user_id: user.user_id,
            customer,
            items: cart.lines.iter().map(OrderItem::from).collect(),
            totals: OrderTotals::from(&cart.totals),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: PaymentMethod::default(),
            timeline: vec![TimelineEvent {
                status: OrderStatus::Pending,
                note: Some(ORDER_PLACED_NOTE.to_owned()),
                at: Timestamp::now(),
            }],
        };

        let created = self
            .documents
            .create(NewDocument::new(kinds::ORDER, &body)?)
            .await?;

        let order = OrderRecord::try_from(&created)?;

        info!(order = %order.uuid, total = %order.totals.total, "order placed");

        Ok(order)
    }

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError> {
        let document = self.documents.get(order.into_uuid()).await?;

        order_from_document(&document)
    }

    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        self.fetch_orders(Filter::of_kind(kinds::ORDER).eq("userId", user.to_string()))
            .await
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        self.fetch_orders(Filter::of_kind(kinds::ORDER)).await
    }

    #[tracing::instrument(name = "orders.update_status", skip(self, note), fields(%order, %status), err)]
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
        note: Option<String>,
    ) -> Result<StatusUpdate, OrdersServiceError> {
        self.get_order(order).await?;

        let patch = StatusPatch::for_status(status);

        let mut fields = Map::new();
        fields.insert("status".to_owned(), serde_json::to_value(patch.status)?);
        if let Some(payment_status) = patch.payment_status {
            fields.insert(
                "paymentStatus".to_owned(),
                serde_json::to_value(payment_status)?,
            );
        }

        let event = serde_json::to_value(TimelineEvent {
            status,
            note: note.clone(),
            at: Timestamp::now(),
        })?;

        let appended = self
            .documents
            .append(order.into_uuid(), fields, TIMELINE_FIELD, event)
            .await?;
        let updated = OrderRecord::try_from(&appended)?;

        info!(
            payment_status = %updated.payment_status,
            "order status updated"
        );

        let notification = self.notify(&updated, note).await;

        Ok(StatusUpdate {
            order: updated,
            notification,
        })
    }

    async fn count_orders(&self) -> Result<u64, OrdersServiceError> {
        let documents = self.documents.fetch(Filter::of_kind(kinds::ORDER)).await?;

        Ok(documents.len() as u64)
    }

    #[tracing::instrument(name = "orders.purge", skip(self), err)]
    async fn purge_orders(&self) -> Result<u64, OrdersServiceError> {
        let documents = self.documents.fetch(Filter::of_kind(kinds::ORDER)).await?;

        if documents.is_empty() {
            return Ok(0);
        }

        let mutations = documents
            .into_iter()
            .map(|document| Mutation::Delete(document.id))
            .collect();

        let removed = self.documents.commit(mutations).await?;

        info!(removed, "orders purged");

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn a non-empty cart into a pending cash-on-delivery order.
    async fn place_order(
        &self,
        user: &Identity,
        customer: CustomerDetails,
        cart: &CartSummary,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn get_order(&self, order: OrderUuid) -> Result<OrderRecord, OrdersServiceError>;

    /// Orders placed by `user`, newest first.
    async fn list_orders_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Every order, newest first.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// Move an order to `status` in one write, then notify the customer.
    ///
    /// A failed notification does not fail the update.
    async fn update_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
        note: Option<String>,
    ) -> Result<StatusUpdate, OrdersServiceError>;

    async fn count_orders(&self) -> Result<u64, OrdersServiceError>;

    /// Delete every order in one transaction. Returns how many were removed.
    async fn purge_orders(&self) -> Result<u64, OrdersServiceError>;
}
