//! Storage implementations.
//!
//! - [`KvStore`] - Durable bucket-scoped key-value store (redb)
//! - [`StoreAdapter`] - Async [`crate::domain::repositories::UrlStore`] over a [`KvStore`]
//! - [`MemoryStore`] - Non-persistent in-memory store

pub mod kv_store;
pub mod memory_store;
pub mod store_adapter;

pub use kv_store::KvStore;
pub use memory_store::MemoryStore;
pub use store_adapter::StoreAdapter;
