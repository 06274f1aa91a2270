//! YAML redirect declarations.
//!
//! The expected document is a sequence of records with two required string
//! fields:
//!
//! ```yaml
//! - path: /urlshort
//!   url: https://github.com/gophercises/urlshort
//! - path: /urlshort-final
//!   url: https://github.com/gophercises/urlshort/tree/solution
//! ```

use std::path::Path;
use tracing::debug;

use crate::domain::entities::RedirectEntry;
use crate::error::DecodeError;

/// Decodes YAML bytes into entries, preserving document order.
///
/// A single malformed record fails the whole document.
pub fn decode(bytes: &[u8]) -> Result<Vec<RedirectEntry>, DecodeError> {
    let entries: Vec<RedirectEntry> = serde_yaml::from_slice(bytes)?;
    debug!(count = entries.len(), "Decoded redirect declarations");
    Ok(entries)
}

/// Reads and decodes a YAML redirect file.
pub fn decode_file(path: impl AsRef<Path>) -> Result<Vec<RedirectEntry>, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes)
}
