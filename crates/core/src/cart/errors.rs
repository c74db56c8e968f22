//! Cart Errors

use thiserror::Error;

use crate::{cart::CartStoreError, pricing::PricingError, products::InvalidProduct};

/// Errors returned by cart mutations.
///
/// `InvalidProduct`, `InvalidQuantity` and `MissingProductId` leave the cart
/// untouched. `Persistence` is returned after the in-memory cart has already
/// changed; the next restore may not see that change.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product snapshot failed validation.
    #[error(transparent)]
    InvalidProduct(#[from] InvalidProduct),

    /// Quantities must be whole numbers of at least one.
    #[error("quantity must be a positive whole number, got {0}")]
    InvalidQuantity(i64),

    /// A product id is required to address a line.
    #[error("product id must not be empty")]
    MissingProductId,

    /// The snapshot could not be written to the store.
    #[error("cart changes could not be saved")]
    Persistence(#[source] CartStoreError),

    /// The resulting cart could not be priced.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl CartError {
    /// Whether the caller supplied bad input, as opposed to a storage or
    /// arithmetic failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidProduct(_) | Self::InvalidQuantity(_) | Self::MissingProductId
        )
    }
}
