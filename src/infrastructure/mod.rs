//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - redb key-value store and in-memory storage
//! - [`redirects`] - YAML redirect declarations

pub mod persistence;
pub mod redirects;
