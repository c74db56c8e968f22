//! Notification errors.

use thiserror::Error;

/// Errors that can occur when handing a notification to the relay.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay returned a non-2xx response.
    #[error("unexpected response from notification relay: {0}")]
    UnexpectedResponse(String),
}
