//! HTTP layer translating requests into redirect resolution.
//!
//! # Modules
//!
//! - [`dto`] - Response serialization types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware

pub mod dto;
pub mod handlers;
pub mod middleware;
