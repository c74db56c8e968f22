//! Carts service errors.

use shopease::cart::CartError;
use thiserror::Error;

use crate::domain::{catalog::CatalogServiceError, orders::OrdersServiceError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("product not found")]
    ProductNotFound,

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("catalog error")]
    Catalog(#[source] CatalogServiceError),

    #[error("cart lock is unavailable")]
    LockPoisoned,
}

impl From<CatalogServiceError> for CartsServiceError {
    fn from(error: CatalogServiceError) -> Self {
        match error {
            CatalogServiceError::NotFound => Self::ProductNotFound,
            other => Self::Catalog(other),
        }
    }
}

/// Checkout failed before an order was placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Cart(#[from] CartsServiceError),

    #[error(transparent)]
    Order(#[from] OrdersServiceError),
}
