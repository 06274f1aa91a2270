//! # urlshort
//!
//! A short-path redirector that resolves request paths through a layered
//! fallback chain, built with Axum and an embedded redb store.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Redirect entities, storage capability and resolver contract
//! - **Application Layer** ([`application`]) - Resolvers and the fallback chain
//! - **Infrastructure Layer** ([`infrastructure`]) - redb key-value store, YAML declarations
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs and middleware
//!
//! ## Resolution Order
//!
//! 1. Compiled-in static routes
//! 2. Routes declared in a YAML file
//! 3. Routes persisted in the key-value store
//! 4. Fallback router (a plain greeting by default)
//!
//! The first layer holding a non-empty URL for the path answers with
//! `301 Moved Permanently`. A path mapped to an empty URL falls through.
//!
//! ## Quick Start
//!
//! ```bash
//! # Seed the store with sample records
//! cargo run --bin admin -- seed
//!
//! # Start the service
//! cargo run
//! curl -i http://localhost:8080/google
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::{AppError, DecodeError, ResolveError, StoreError};
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::chain::{
        ChainBuilder, FallbackChain, MappingResolver, StoreErrorPolicy, StoreResolver,
    };
    pub use crate::domain::entities::{RedirectEntry, RedirectMapping, build_mapping};
    pub use crate::domain::repositories::UrlStore;
    pub use crate::domain::resolver::{Outcome, Resolver};
    pub use crate::error::{AppError, DecodeError, ResolveError, StoreError};
    pub use crate::infrastructure::persistence::{KvStore, MemoryStore, StoreAdapter};
    pub use crate::state::AppState;
}
