//! Domain layer containing redirect entities and the contracts the
//! resolution chain is built on.
//!
//! - [`entities`] - Redirect entries and mappings
//! - [`repositories`] - Storage capability traits
//! - [`resolver`] - Resolver trait and lookup outcome
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Concrete resolvers live in [`crate::application::chain`].

pub mod entities;
pub mod repositories;
pub mod resolver;
