#![allow(dead_code)]

use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;
use tempfile::TempDir;
use urlshort::api::handlers::default_fallback;
use urlshort::application::chain::{ChainBuilder, StoreErrorPolicy};
use urlshort::domain::entities::RedirectMapping;
use urlshort::domain::repositories::UrlStore;
use urlshort::infrastructure::persistence::{KvStore, StoreAdapter};
use urlshort::routes::router;
use urlshort::state::AppState;

pub const TEST_BUCKET: &str = "test";

/// Opens a fresh store inside a temporary directory.
///
/// Keep the returned [`TempDir`] alive for as long as the store is used.
pub fn open_test_store() -> (TempDir, KvStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = KvStore::open(dir.path().join("test.db"), 0o600, TEST_BUCKET).unwrap();
    (dir, store)
}

pub fn test_static_routes() -> RedirectMapping {
    [
        (
            "/urlshort-godoc",
            "https://godoc.org/github.com/gophercises/urlshort",
        ),
        ("/yaml-godoc", "https://godoc.org/gopkg.in/yaml.v2"),
        ("/test", ""),
    ]
    .into_iter()
    .collect()
}

pub const TEST_YAML: &str = "
- path: /urlshort
  url: https://github.com/gophercises/urlshort
- path: /urlshort-final
  url: https://github.com/gophercises/urlshort/tree/solution
";

/// Fallback that answers every request with `200 Hello world!`.
pub fn sample_fallback() -> Router {
    Router::new().fallback(|| async { "Hello world!" })
}

/// Builds a server with static, YAML and store layers over `store`.
pub fn create_test_server(store: Arc<dyn UrlStore>, policy: StoreErrorPolicy) -> TestServer {
    let chain = ChainBuilder::new()
        .with_static(test_static_routes())
        .with_table_yaml(TEST_YAML.as_bytes())
        .unwrap()
        .with_store(store.clone(), policy)
        .build();

    let state = AppState::new(chain, store, sample_fallback());
    TestServer::new(router(state)).unwrap()
}

/// Builds a server over a redb-backed store using the default fallback.
pub fn create_store_server(store: &KvStore) -> TestServer {
    let adapter: Arc<dyn UrlStore> = Arc::new(StoreAdapter::new(store.clone()));
    let chain = ChainBuilder::new()
        .with_store(adapter.clone(), StoreErrorPolicy::Fallback)
        .build();

    let state = AppState::new(chain, adapter, default_fallback());
    TestServer::new(router(state)).unwrap()
}
