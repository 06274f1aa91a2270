//! Resolver contract for the redirect fallback chain.

use crate::error::ResolveError;
use async_trait::async_trait;

/// Result of asking one resolver about a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Redirect permanently to the contained URL.
    Redirect(String),
    /// No destination here; try the next source.
    Continue,
}

impl Outcome {
    /// Turns a looked-up URL into an outcome. Empty URLs continue.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        if url.is_empty() {
            Outcome::Continue
        } else {
            Outcome::Redirect(url)
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Outcome::Redirect(_))
    }
}

/// One link in the fallback chain.
///
/// Implementations answer [`Outcome::Continue`] for paths they do not know
/// and only return an error when they are configured to surface failures
/// instead of falling through.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, path: &str) -> Result<Outcome, ResolveError>;

    /// Short label used in logs.
    fn name(&self) -> &str;
}
