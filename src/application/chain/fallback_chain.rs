//! Ordered composition of resolvers.

use async_trait::async_trait;
use axum::http::HeaderValue;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::resolver::{Outcome, Resolver};
use crate::error::ResolveError;

/// Returns whether `url` can be sent as a `Location` header value.
pub(crate) fn is_valid_location(url: &str) -> bool {
    HeaderValue::from_str(url).is_ok()
}

/// Tries each layer in order and stops at the first redirect.
///
/// A chain is itself a [`Resolver`], so chains nest. When every layer
/// continues, the chain continues and the caller hands the request to its
/// terminal handler. A redirect whose URL cannot be sent as a `Location`
/// header is skipped like an empty one.
#[derive(Clone, Default)]
pub struct FallbackChain {
    layers: Vec<Arc<dyn Resolver>>,
}

impl FallbackChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer with lower precedence than every existing one.
    pub fn then(mut self, layer: impl Resolver + 'static) -> Self {
        self.layers.push(Arc::new(layer));
        self
    }

    /// Layer names in precedence order.
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[async_trait]
impl Resolver for FallbackChain {
    async fn resolve(&self, path: &str) -> Result<Outcome, ResolveError> {
        for layer in &self.layers {
            if let Outcome::Redirect(url) = layer.resolve(path).await? {
                if !is_valid_location(&url) {
                    warn!(layer = layer.name(), path, url = ?url, "Unusable redirect URL, skipping layer");
                    continue;
                }
                debug!(layer = layer.name(), path, url = %url, "Redirect resolved");
                return Ok(Outcome::Redirect(url));
            }
        }
        debug!(path, "No layer matched, falling back");
        Ok(Outcome::Continue)
    }

    fn name(&self) -> &str {
        "chain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chain::MappingResolver;
    use crate::error::StoreError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and answers with a fixed outcome.
    struct Counting {
        outcome: Outcome,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Resolver for Counting {
        async fn resolve(&self, _path: &str) -> Result<Outcome, ResolveError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.outcome.clone())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct Broken;

    #[async_trait]
    impl Resolver for Broken {
        async fn resolve(&self, path: &str) -> Result<Outcome, ResolveError> {
            Err(ResolveError::Store {
                path: path.to_string(),
                source: StoreError::Closed,
            })
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn mapping(name: &str, pairs: &[(&str, &str)]) -> MappingResolver {
        MappingResolver::new(name, pairs.iter().copied().collect())
    }

    #[tokio::test]
    async fn test_first_layer_wins() {
        let chain = FallbackChain::new()
            .then(mapping("static", &[("/a", "https://static.example.com")]))
            .then(mapping("yaml", &[("/a", "https://yaml.example.com")]));

        assert_eq!(
            chain.resolve("/a").await.unwrap(),
            Outcome::Redirect("https://static.example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_url_falls_to_next_layer() {
        let chain = FallbackChain::new()
            .then(mapping("static", &[("/a", "")]))
            .then(mapping("yaml", &[("/a", "https://yaml.example.com")]));

        assert_eq!(
            chain.resolve("/a").await.unwrap(),
            Outcome::Redirect("https://yaml.example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_later_layers_skipped_after_redirect() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = FallbackChain::new()
            .then(mapping("static", &[("/a", "https://static.example.com")]))
            .then(Counting {
                outcome: Outcome::Continue,
                calls: calls.clone(),
            });

        chain.resolve("/a").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        chain.resolve("/b").await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unusable_url_falls_to_next_layer() {
        let chain = FallbackChain::new()
            .then(mapping("static", &[("/a", "https://static.example.com/a\nb")]))
            .then(mapping("yaml", &[("/a", "https://yaml.example.com")]));

        assert_eq!(
            chain.resolve("/a").await.unwrap(),
            Outcome::Redirect("https://yaml.example.com".to_string())
        );
        assert_eq!(
            FallbackChain::new()
                .then(mapping("static", &[("/a", "bad\r\nurl")]))
                .resolve("/a")
                .await
                .unwrap(),
            Outcome::Continue
        );
    }

    #[test]
    fn test_is_valid_location() {
        assert!(is_valid_location("https://www.google.com"));
        assert!(!is_valid_location("https://example.com/a\nb"));
    }

    #[tokio::test]
    async fn test_unmatched_path_continues() {
        let chain = FallbackChain::new().then(mapping("static", &[("/a", "https://a.example.com")]));

        assert_eq!(chain.resolve("/zzz").await.unwrap(), Outcome::Continue);
        assert_eq!(FallbackChain::new().resolve("/zzz").await.unwrap(), Outcome::Continue);
    }

    #[tokio::test]
    async fn test_chains_nest() {
        let inner = FallbackChain::new().then(mapping("inner", &[("/deep", "https://deep.example.com")]));
        let outer = FallbackChain::new()
            .then(mapping("outer", &[("/top", "https://top.example.com")]))
            .then(inner);

        assert_eq!(outer.len(), 2);
        assert_eq!(outer.layer_names(), vec!["outer", "chain"]);
        assert_eq!(
            outer.resolve("/deep").await.unwrap(),
            Outcome::Redirect("https://deep.example.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_layer_error_propagates() {
        let calls = Arc::new(AtomicUsize::new(0));
        let chain = FallbackChain::new().then(Broken).then(Counting {
            outcome: Outcome::Redirect("https://never.example.com".to_string()),
            calls: calls.clone(),
        });

        assert!(chain.resolve("/a").await.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
