//! Storage capability for persisting selection state.
//!
//! The plan wizard keeps its in-progress selection in whatever key-value
//! store the host provides (browser local storage behind an API, a session
//! cache, a database row). Implement [`SelectionStore`] to plug yours in;
//! an in-memory implementation backs tests and session-only deployments.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{BillingError, Result};

/// Trait for the key-value store that holds persisted selection state.
///
/// Values are opaque strings; the session layer handles encoding. `get` for
/// a key that was never set returns `Ok(None)`.
#[async_trait]
pub trait SelectionStore: Send + Sync {
    /// Read the value stored under a key.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value under a key, replacing any existing value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under a key (missing keys are fine).
    async fn remove(&self, key: &str) -> Result<()>;
}

#[async_trait]
impl<T: SelectionStore + ?Sized> SelectionStore for std::sync::Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key).await
    }
}

/// In-memory selection store.
///
/// Backs tests and deployments where selections only need to live as long
/// as the process.
#[derive(Debug, Default)]
pub struct InMemorySelectionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySelectionStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SelectionStore for InMemorySelectionStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| BillingError::storage("selection store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| BillingError::storage("selection store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| BillingError::storage("selection store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}
