//! Loaders for declarative redirect sources.

pub mod yaml;

pub use yaml::{decode, decode_file};
