//! [`UrlStore`] implementation over the redb-backed [`KvStore`].

use async_trait::async_trait;
use tracing::warn;

use super::kv_store::KvStore;
use crate::domain::repositories::UrlStore;
use crate::error::StoreError;

/// Exposes a [`KvStore`] through the async storage capability.
///
/// Store calls block on file I/O, so each one runs on the tokio blocking
/// pool and request workers never stall the reactor.
#[derive(Debug, Clone)]
pub struct StoreAdapter {
    store: KvStore,
}

impl StoreAdapter {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    /// Returns the wrapped store, e.g. to close it at shutdown.
    pub fn store(&self) -> &KvStore {
        &self.store
    }

    async fn run_blocking<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&KvStore) -> Result<T, StoreError> + Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

#[async_trait]
impl UrlStore for StoreAdapter {
    async fn insert(&self, path: &str, url: &str) -> Result<(), StoreError> {
        let (path, url) = (path.to_owned(), url.to_owned());
        self.run_blocking(move |store| store.insert(&path, &url))
            .await
    }

    async fn lookup(&self, path: &str) -> Result<String, StoreError> {
        let path = path.to_owned();
        self.run_blocking(move |store| store.lookup(&path)).await
    }

    async fn health_check(&self) -> bool {
        match self.run_blocking(|store| store.lookup("")).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Store health check failed");
                false
            }
        }
    }
}
