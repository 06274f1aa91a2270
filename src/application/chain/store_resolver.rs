//! Resolver backed by a persistent [`UrlStore`].

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{trace, warn};

use super::fallback_chain::is_valid_location;
use crate::domain::repositories::UrlStore;
use crate::domain::resolver::{Outcome, Resolver};
use crate::error::ResolveError;

/// What the store layer does when a lookup fails or returns a URL that
/// cannot be sent as a redirect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreErrorPolicy {
    /// Log the failure and continue as if the path were absent.
    #[default]
    Fallback,
    /// Return the failure so the caller can answer with an error.
    Surface,
}

impl FromStr for StoreErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fallback" => Ok(Self::Fallback),
            "surface" => Ok(Self::Surface),
            other => Err(format!(
                "unknown store error policy '{other}', expected 'fallback' or 'surface'"
            )),
        }
    }
}

impl fmt::Display for StoreErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fallback => f.write_str("fallback"),
            Self::Surface => f.write_str("surface"),
        }
    }
}

/// Queries a [`UrlStore`] for each path, one transaction per request.
pub struct StoreResolver {
    store: Arc<dyn UrlStore>,
    policy: StoreErrorPolicy,
}

impl StoreResolver {
    pub fn new(store: Arc<dyn UrlStore>, policy: StoreErrorPolicy) -> Self {
        Self { store, policy }
    }
}

#[async_trait]
impl Resolver for StoreResolver {
    async fn resolve(&self, path: &str) -> Result<Outcome, ResolveError> {
        match self.store.lookup(path).await {
            Ok(url) if !url.is_empty() && !is_valid_location(&url) => match self.policy {
                StoreErrorPolicy::Fallback => {
                    warn!(path, url = ?url, "Stored URL is not a valid location, falling through");
                    Ok(Outcome::Continue)
                }
                StoreErrorPolicy::Surface => Err(ResolveError::InvalidLocation {
                    path: path.to_string(),
                    url,
                }),
            },
            Ok(url) => {
                let outcome = Outcome::from_url(url);
                trace!(path, redirect = outcome.is_redirect(), "Store lookup");
                Ok(outcome)
            }
            Err(e) => match self.policy {
                StoreErrorPolicy::Fallback => {
                    warn!(path, error = %e, "Store lookup failed, falling through");
                    Ok(Outcome::Continue)
                }
                StoreErrorPolicy::Surface => Err(ResolveError::Store {
                    path: path.to_string(),
                    source: e,
                }),
            },
        }
    }

    fn name(&self) -> &str {
        "store"
    }
}
