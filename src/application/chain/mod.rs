//! Redirect resolution chain.
//!
//! - [`MappingResolver`] - Lookup in an immutable in-memory mapping
//! - [`StoreResolver`] - Lookup in a persistent [`crate::domain::repositories::UrlStore`]
//! - [`FallbackChain`] - Ordered composition, first redirect wins
//! - [`ChainBuilder`] - Standard static → YAML → store assembly

pub mod builder;
pub mod fallback_chain;
pub mod mapping_resolver;
pub mod store_resolver;

pub use builder::ChainBuilder;
pub use fallback_chain::FallbackChain;
pub use mapping_resolver::MappingResolver;
pub use store_resolver::{StoreErrorPolicy, StoreResolver};
