//! Cart persistence surface.

use std::{error::Error as StdError, sync::Arc, sync::Mutex};

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Errors raised by a [`CartStore`].
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The backing storage failed.
    #[error("cart store backend failed: {0}")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),

    /// The snapshot could not be encoded.
    #[error("cart snapshot could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),

    /// The store is not usable any more.
    #[error("cart store is unavailable")]
    Unavailable,
}

impl CartStoreError {
    /// Wrap any backend error.
    pub fn backend(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(source))
    }
}

/// Key/value storage for serialized cart snapshots.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Read the snapshot stored under `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<String>, CartStoreError>;

    /// Replace the snapshot stored under `key`.
    async fn save(&self, key: &str, snapshot: &str) -> Result<(), CartStoreError>;

    /// Remove the snapshot stored under `key`. Removing a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), CartStoreError>;
}

#[async_trait]
impl<T: CartStore + ?Sized> CartStore for Arc<T> {
    async fn load(&self, key: &str) -> Result<Option<String>, CartStoreError> {
        (**self).load(key).await
    }

    async fn save(&self, key: &str, snapshot: &str) -> Result<(), CartStoreError> {
        (**self).save(key, snapshot).await
    }

    async fn delete(&self, key: &str) -> Result<(), CartStoreError> {
        (**self).delete(key).await
    }
}

/// Process-local [`CartStore`].
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    slots: Mutex<FxHashMap<String, String>>,
}

impl MemoryCartStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with one pre-existing snapshot.
    pub fn with_snapshot(key: impl Into<String>, snapshot: impl Into<String>) -> Self {
        let mut slots = FxHashMap::default();
        slots.insert(key.into(), snapshot.into());

        Self {
            slots: Mutex::new(slots),
        }
    }

    /// Current raw snapshot for `key`.
    pub fn snapshot(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .ok()
            .and_then(|slots| slots.get(key).cloned())
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn load(&self, key: &str) -> Result<Option<String>, CartStoreError> {
        let slots = self
            .slots
            .lock()
            .map_err(|_poisoned| CartStoreError::Unavailable)?;

        Ok(slots.get(key).cloned())
    }

    async fn save(&self, key: &str, snapshot: &str) -> Result<(), CartStoreError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_poisoned| CartStoreError::Unavailable)?;

        slots.insert(key.to_owned(), snapshot.to_owned());

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CartStoreError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_poisoned| CartStoreError::Unavailable)?;

        slots.remove(key);

        Ok(())
    }
}
