//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access so that resolution logic never depends
//! on a concrete storage engine. Implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated
//! via `mockall` for testing.

pub mod url_store;

pub use url_store::UrlStore;

#[cfg(test)]
pub use url_store::MockUrlStore;
