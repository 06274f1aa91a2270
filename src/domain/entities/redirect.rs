//! Redirect entries and the lookup mapping built from them.

use serde::Deserialize;
use std::collections::HashMap;

/// A single declared redirect.
///
/// `url` may be empty, which marks the path as known but without a
/// destination. Resolvers must fall through on such entries instead of
/// redirecting to an empty location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RedirectEntry {
    pub path: String,
    pub url: String,
}

impl RedirectEntry {
    /// Creates a new entry.
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}

/// Immutable path → URL lookup table.
///
/// Built by folding an ordered sequence of [`RedirectEntry`]; when a path
/// appears more than once the later entry wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectMapping {
    routes: HashMap<String, String>,
}

impl RedirectMapping {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the URL mapped to `path`, including empty URLs.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.routes.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl FromIterator<RedirectEntry> for RedirectMapping {
    fn from_iter<I: IntoIterator<Item = RedirectEntry>>(iter: I) -> Self {
        let mut routes = HashMap::new();
        for entry in iter {
            routes.insert(entry.path, entry.url);
        }
        Self { routes }
    }
}

impl<K, V> FromIterator<(K, V)> for RedirectMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(path, url)| RedirectEntry::new(path, url))
            .collect()
    }
}

/// Folds ordered entries into a mapping with last-writer-wins semantics.
///
/// Duplicate paths are not an error: the entry appearing later in `entries`
/// replaces any earlier one.
pub fn build_mapping(entries: impl IntoIterator<Item = RedirectEntry>) -> RedirectMapping {
    entries.into_iter().collect()
}
