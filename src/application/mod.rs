//! Application layer orchestrating redirect resolution.
//!
//! Resolvers consume the domain traits and give HTTP handlers a single
//! entry point, [`chain::FallbackChain`], that walks every configured
//! redirect source in priority order.

pub mod chain;
