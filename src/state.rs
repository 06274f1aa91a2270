//! Shared application state injected into HTTP handlers.

use axum::Router;
use std::sync::Arc;

use crate::application::chain::FallbackChain;
use crate::domain::repositories::UrlStore;

/// State shared by every request worker.
///
/// The store handle is shared, not copied: all workers go through the same
/// transactional store, which serializes writers on its own.
#[derive(Clone)]
pub struct AppState {
    pub chain: Arc<FallbackChain>,
    pub store: Arc<dyn UrlStore>,
    /// Terminal handler for paths no layer redirects.
    pub fallback: Router,
}

impl AppState {
    pub fn new(chain: FallbackChain, store: Arc<dyn UrlStore>, fallback: Router) -> Self {
        Self {
            chain: Arc::new(chain),
            store,
            fallback,
        }
    }
}
