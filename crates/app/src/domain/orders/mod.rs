//! Orders

pub mod data;
pub mod errors;
pub mod records;
mod service;

pub use data::CustomerDetails;
pub use errors::OrdersServiceError;
pub use records::{
    OrderItem, OrderRecord, OrderTotals, OrderUuid, PaymentMethod, TimelineEvent,
};
pub use service::*;
