//! Catalog service errors.

use thiserror::Error;

use crate::documents::DocumentStoreError;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("product not found")]
    NotFound,

    #[error("product {0} has invalid data")]
    InvalidData(String),

    #[error("storage error")]
    Store(#[source] DocumentStoreError),
}

impl From<DocumentStoreError> for CatalogServiceError {
    fn from(error: DocumentStoreError) -> Self {
        match error {
            DocumentStoreError::NotFound => Self::NotFound,
            other => Self::Store(other),
        }
    }
}
