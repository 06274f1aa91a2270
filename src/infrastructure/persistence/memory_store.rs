//! In-memory storage for tests and store-less deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

use crate::domain::repositories::UrlStore;
use crate::error::StoreError;

/// A [`UrlStore`] that keeps records in a process-local map.
///
/// Nothing survives a restart. Used when no store file is configured and as
/// a lightweight stand-in in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using MemoryStore (records are not persisted)");
        Self::default()
    }

    /// Creates a store pre-populated with `records`.
    pub fn with_records<K, V>(records: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            records: RwLock::new(
                records
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl UrlStore for MemoryStore {
    async fn insert(&self, path: &str, url: &str) -> Result<(), StoreError> {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), url.to_string());
        Ok(())
    }

    async fn lookup(&self, path: &str) -> Result<String, StoreError> {
        Ok(self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
            .unwrap_or_default())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
