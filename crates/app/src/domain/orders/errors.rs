//! Orders service errors.

use thiserror::Error;

use crate::documents::DocumentStoreError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("cannot place an order for an empty cart")]
    EmptyCart,

    #[error("customer {0} is missing or invalid")]
    IncompleteCustomer(&'static str),

    #[error("invalid order data")]
    InvalidData(#[from] serde_json::Error),

    #[error("storage error")]
    Store(#[source] DocumentStoreError),
}

impl OrdersServiceError {
    /// Whether the caller supplied bad input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptyCart | Self::IncompleteCustomer(_))
    }
}

impl From<DocumentStoreError> for OrdersServiceError {
    fn from(error: DocumentStoreError) -> Self {
        match error {
            DocumentStoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}
