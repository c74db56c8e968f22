//! Auth service errors.

use thiserror::Error;

use crate::documents::DocumentStoreError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("user not found")]
    UnknownUser,

    #[error("session lifetime is out of range")]
    InvalidLifetime(#[source] jiff::Error),

    #[error("invalid session data")]
    InvalidData(#[from] serde_json::Error),

    #[error("storage error")]
    Store(#[source] DocumentStoreError),
}

impl From<DocumentStoreError> for AuthServiceError {
    fn from(error: DocumentStoreError) -> Self {
        match error {
            DocumentStoreError::NotFound => Self::UnknownUser,
            other => Self::Store(other),
        }
    }
}

/// Why a request may not proceed.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("sign in required")]
    NotSignedIn,

    #[error("insufficient permissions")]
    Forbidden,
}
