//! Builder for the standard static → table → store chain.

use std::sync::Arc;
use tracing::info;

use super::{FallbackChain, MappingResolver, StoreErrorPolicy, StoreResolver};
use crate::domain::entities::{RedirectEntry, RedirectMapping};
use crate::domain::repositories::UrlStore;
use crate::error::DecodeError;
use crate::infrastructure::redirects::yaml;

/// Assembles the redirect layers in fixed precedence.
///
/// Compiled-in routes beat declared routes, which beat stored routes,
/// whatever order the builder methods are called in. Layers that were
/// never configured are left out.
#[derive(Default)]
pub struct ChainBuilder {
    static_routes: Option<RedirectMapping>,
    table_routes: Option<RedirectMapping>,
    store: Option<(Arc<dyn UrlStore>, StoreErrorPolicy)>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compiled-in routes.
    pub fn with_static(mut self, mapping: RedirectMapping) -> Self {
        self.static_routes = Some(mapping);
        self
    }

    /// Sets the declared routes from already decoded entries.
    pub fn with_table(mut self, entries: impl IntoIterator<Item = RedirectEntry>) -> Self {
        self.table_routes = Some(entries.into_iter().collect());
        self
    }

    /// Decodes a YAML declaration and sets it as the declared routes.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the declaration is malformed; no layer is
    /// added in that case.
    pub fn with_table_yaml(self, bytes: &[u8]) -> Result<Self, DecodeError> {
        let entries = yaml::decode(bytes)?;
        Ok(self.with_table(entries))
    }

    /// Sets the persistent store layer.
    pub fn with_store(mut self, store: Arc<dyn UrlStore>, policy: StoreErrorPolicy) -> Self {
        self.store = Some((store, policy));
        self
    }

    pub fn build(self) -> FallbackChain {
        let mut chain = FallbackChain::new();

        if let Some(mapping) = self.static_routes {
            chain = chain.then(MappingResolver::new("static", mapping));
        }
        if let Some(mapping) = self.table_routes {
            chain = chain.then(MappingResolver::new("yaml", mapping));
        }
        if let Some((store, policy)) = self.store {
            chain = chain.then(StoreResolver::new(store, policy));
        }

        info!(layers = ?chain.layer_names(), "Redirect chain built");
        chain
    }
}
