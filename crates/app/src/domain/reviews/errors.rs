//! Reviews service errors.

use thiserror::Error;

use crate::{documents::DocumentStoreError, domain::catalog::CatalogServiceError};

#[derive(Debug, Error)]
pub enum ReviewsServiceError {
    #[error("review not found")]
    NotFound,

    #[error("product not found")]
    ProductNotFound,

    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),

    #[error("comment must be between 1 and 1000 characters")]
    InvalidComment,

    #[error("catalog error")]
    Catalog(#[source] CatalogServiceError),

    #[error("invalid review data")]
    InvalidData(#[from] serde_json::Error),

    #[error("storage error")]
    Store(#[source] DocumentStoreError),
}

impl ReviewsServiceError {
    /// Whether the caller supplied bad input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidRating(_) | Self::InvalidComment)
    }
}

impl From<DocumentStoreError> for ReviewsServiceError {
    fn from(error: DocumentStoreError) -> Self {
        match error {
            DocumentStoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}

impl From<CatalogServiceError> for ReviewsServiceError {
    fn from(error: CatalogServiceError) -> Self {
        match error {
            CatalogServiceError::NotFound => Self::ProductNotFound,
            other => Self::Catalog(other),
        }
    }
}
