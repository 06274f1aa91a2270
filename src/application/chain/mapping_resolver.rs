//! Resolver over an immutable in-memory mapping.

use async_trait::async_trait;
use tracing::trace;

use crate::domain::entities::{RedirectEntry, RedirectMapping, build_mapping};
use crate::domain::resolver::{Outcome, Resolver};
use crate::error::ResolveError;

/// Answers from a [`RedirectMapping`] held for the resolver's lifetime.
///
/// Used both for compiled-in routes and for routes decoded from a YAML
/// declaration; `name` tells the two apart in logs. A path mapped to an
/// empty URL continues to the next layer.
#[derive(Debug, Clone)]
pub struct MappingResolver {
    name: String,
    mapping: RedirectMapping,
}

impl MappingResolver {
    pub fn new(name: impl Into<String>, mapping: RedirectMapping) -> Self {
        Self {
            name: name.into(),
            mapping,
        }
    }

    /// Builds the resolver from ordered entries (last writer wins).
    pub fn from_entries(
        name: impl Into<String>,
        entries: impl IntoIterator<Item = RedirectEntry>,
    ) -> Self {
        Self::new(name, build_mapping(entries))
    }

}

#[async_trait]
impl Resolver for MappingResolver {
    async fn resolve(&self, path: &str) -> Result<Outcome, ResolveError> {
        let outcome = match self.mapping.get(path) {
            Some(url) => Outcome::from_url(url),
            None => Outcome::Continue,
        };
        trace!(layer = %self.name, path, redirect = outcome.is_redirect(), "Mapping lookup");
        Ok(outcome)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
