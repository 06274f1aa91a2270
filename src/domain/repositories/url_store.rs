//! Storage capability consumed by the resolution chain.

use crate::error::StoreError;
use async_trait::async_trait;

/// Minimal persistence contract a backend must satisfy to take part in
/// redirect resolution.
///
/// # Contract
///
/// - Looking up an absent path returns `Ok(String::new())`, never an error
/// - Inserting an existing path replaces its URL
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::StoreAdapter`] - redb-backed file store
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-memory store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Stores `url` under `path`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write transaction fails or the store is closed.
    async fn insert(&self, path: &str, url: &str) -> Result<(), StoreError>;

    /// Returns the URL stored under `path`, or an empty string when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the read transaction fails or the store is closed.
    async fn lookup(&self, path: &str) -> Result<String, StoreError>;

    /// Checks whether the backend can currently serve reads.
    async fn health_check(&self) -> bool;
}
