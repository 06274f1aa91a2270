//! HTTP server initialization and runtime setup.
//!
//! Opens the store, assembles the redirect chain, serves until a shutdown
//! signal arrives, then closes the store.

use crate::api::handlers::default_fallback;
use crate::application::chain::{ChainBuilder, FallbackChain};
use crate::config::Config;
use crate::domain::entities::RedirectMapping;
use crate::domain::repositories::UrlStore;
use crate::infrastructure::persistence::{KvStore, StoreAdapter};
use crate::infrastructure::redirects::yaml;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// YAML declarations used when `REDIRECTS_FILE` is not configured.
pub const SAMPLE_REDIRECTS: &str = "
- path: /urlshort
  url: https://github.com/gophercises/urlshort
- path: /urlshort-final
  url: https://github.com/gophercises/urlshort/tree/solution
";

/// Compiled-in routes, the highest-priority layer.
pub fn static_routes() -> RedirectMapping {
    [
        (
            "/urlshort-godoc",
            "https://godoc.org/github.com/gophercises/urlshort",
        ),
        ("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
    ]
    .into_iter()
    .collect()
}

/// Assembles static → YAML → store layers from the configuration.
///
/// # Errors
///
/// Returns an error if the redirects file cannot be read or decoded.
pub fn build_chain(config: &Config, store: Arc<dyn UrlStore>) -> Result<FallbackChain> {
    let builder = ChainBuilder::new().with_static(static_routes());

    let builder = match &config.redirects_file {
        Some(file) => {
            let entries = yaml::decode_file(file)
                .with_context(|| format!("Failed to load redirects from {}", file.display()))?;
            builder.with_table(entries)
        }
        None => builder
            .with_table_yaml(SAMPLE_REDIRECTS.as_bytes())
            .context("Failed to decode built-in redirects")?,
    };

    Ok(builder
        .with_store(store, config.store_error_policy)
        .build())
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - redb key-value store (created if missing)
/// - Redirect chain (static, YAML, store)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be opened
/// - The redirects file is malformed
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = KvStore::open(&config.store_path, config.store_mode, &config.store_bucket)
        .context("Failed to open redirect store")?;

    let adapter: Arc<dyn UrlStore> = Arc::new(StoreAdapter::new(store.clone()));
    let chain = build_chain(&config, adapter.clone())?;

    let state = AppState::new(chain, adapter, default_fallback());
    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    let served = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().context("Failed to close redirect store")?;
    served?;

    Ok(())
}

/// Completes on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resolver::{Outcome, Resolver};
    use crate::infrastructure::persistence::MemoryStore;

    #[tokio::test]
    async fn test_build_chain_with_sample_redirects() {
        let config = Config::default();
        let store: Arc<dyn UrlStore> =
            Arc::new(MemoryStore::with_records([("/google", "https://www.google.es")]));

        let chain = build_chain(&config, store).unwrap();

        assert_eq!(chain.layer_names(), vec!["static", "yaml", "store"]);
        assert_eq!(
            chain.resolve("/yaml-godoc").await.unwrap(),
            Outcome::Redirect("https://godoc.org/gopkg.in/yaml.v2".to_string())
        );
        assert_eq!(
            chain.resolve("/urlshort-final").await.unwrap(),
            Outcome::Redirect("https://github.com/gophercises/urlshort/tree/solution".to_string())
        );
        assert_eq!(
            chain.resolve("/google").await.unwrap(),
            Outcome::Redirect("https://www.google.es".to_string())
        );
    }

    #[test]
    fn test_build_chain_fails_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            redirects_file: Some(dir.path().join("absent.yaml")),
            ..Config::default()
        };

        let result = build_chain(&config, Arc::new(MemoryStore::new()));

        assert!(result.is_err());
    }
}
