mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use std::sync::Arc;
use urlshort::application::chain::StoreErrorPolicy;
use urlshort::domain::repositories::UrlStore;
use urlshort::error::StoreError;
use urlshort::infrastructure::persistence::{MemoryStore, StoreAdapter};

/// Store whose every call fails.
struct FailingStore;

#[async_trait]
impl UrlStore for FailingStore {
    async fn insert(&self, _path: &str, _url: &str) -> Result<(), StoreError> {
        Err(StoreError::Task("write refused".to_string()))
    }

    async fn lookup(&self, _path: &str) -> Result<String, StoreError> {
        Err(StoreError::Task("read refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

fn memory_store() -> Arc<dyn UrlStore> {
    Arc::new(MemoryStore::with_records([
        ("/google", "https://www.google.com"),
        ("/amazon", "https://www.amazon.com"),
        ("/urlshort-godoc", "https://store.example.com/shadowed"),
        ("/blank", ""),
        ("/bad", "https://example.com/a\nb"),
        ("/hello world", "https://hello.example.com"),
    ]))
}

#[tokio::test]
async fn test_static_route_redirects() {
    let server = common::create_test_server(memory_store(), StoreErrorPolicy::Fallback);

    let response = server.get("/urlshort-godoc").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(
        response.header("location"),
        "https://godoc.org/github.com/gophercises/urlshort"
    );
}

#[tokio::test]
async fn test_unknown_path_reaches_fallback() {
    let server = common::create_test_server(memory_store(), StoreErrorPolicy::Fallback);

    let response = server.get("/yipikaiyei").await;

    response.assert_status_ok();
    response.assert_text("Hello world!");
    assert!(response.maybe_header("location").is_none());
}

#[tokio::test]
async fn test_empty_static_url_reaches_fallback() {
    let server = common::create_test_server(memory_store(), StoreErrorPolicy::Fallback);

    let response = server.get("/test").await;

    response.assert_status_ok();
    assert!(response.maybe_header("location").is_none());
}

#[tokio::test]
async fn test_yaml_route_redirects() {
    let server = common::create_test_server(memory_store(), StoreErrorPolicy::Fallback);

    let response = server.get("/urlshort-final").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(
        response.header("location"),
        "https://github.com/gophercises/urlshort/tree/solution"
    );
}

#[tokio::test]
async fn test_store_route_redirects() {
    let server = common::create_test_server(memory_store(), StoreErrorPolicy::Fallback);

    let google = server.get("/google").await;
    assert_eq!(google.status_code(), 301);
    assert_eq!(google.header("location"), "https://www.google.com");

    let amazon = server.get("/amazon").await;
    assert_eq!(amazon.status_code(), 301);
    assert_eq!(amazon.header("location"), "https://www.amazon.com");
}

#[tokio::test]
async fn test_empty_store_url_reaches_fallback() {
    let server = common::create_test_server(memory_store(), StoreErrorPolicy::Fallback);

    let response = server.get("/blank").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_static_route_shadows_store() {
    let server = common::create_test_server(memory_store(), StoreErrorPolicy::Fallback);

    let response = server.get("/urlshort-godoc").await;

    assert_eq!(
        response.header("location"),
        "https://godoc.org/github.com/gophercises/urlshort"
    );
}

#[tokio::test]
async fn test_store_failure_falls_back_by_default() {
    let server = common::create_test_server(Arc::new(FailingStore), StoreErrorPolicy::Fallback);

    let response = server.get("/google").await;

    response.assert_status_ok();
    response.assert_text("Hello world!");
}

#[tokio::test]
async fn test_store_failure_does_not_affect_earlier_layers() {
    let server = common::create_test_server(Arc::new(FailingStore), StoreErrorPolicy::Surface);

    let response = server.get("/urlshort").await;

    assert_eq!(response.status_code(), 301);
}

#[tokio::test]
async fn test_store_failure_surfaces_when_configured() {
    let server = common::create_test_server(Arc::new(FailingStore), StoreErrorPolicy::Surface);

    let response = server.get("/google").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert_eq!(json["error"]["details"]["path"], "/google");
}

#[tokio::test]
async fn test_closed_store_surfaces_unavailable() {
    let (_dir, store) = common::open_test_store();
    let adapter: Arc<dyn UrlStore> = Arc::new(StoreAdapter::new(store.clone()));
    let server = common::create_test_server(adapter, StoreErrorPolicy::Surface);

    store.close().unwrap();
    let response = server.get("/google").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_redb_store_end_to_end() {
    let (_dir, store) = common::open_test_store();
    store.insert("/google", "https://www.google.com").unwrap();
    let server = common::create_store_server(&store);

    let response = server.get("/google").await;
    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://www.google.com");

    let response = server.get("/unknown").await;
    response.assert_status_ok();
    response.assert_text("Hello, world!\n");

    store.close().unwrap();
}

#[tokio::test]
async fn test_store_changes_visible_without_restart() {
    let (_dir, store) = common::open_test_store();
    let server = common::create_store_server(&store);

    server.get("/late").await.assert_status_ok();

    store.insert("/late", "https://late.example.com").unwrap();
    let response = server.get("/late").await;
    assert_eq!(response.status_code(), 301);

    store.delete("/late").unwrap();
    server.get("/late").await.assert_status_ok();
}

#[tokio::test]
async fn test_unusable_store_url_falls_back_by_default() {
    let server = common::create_test_server(memory_store(), StoreErrorPolicy::Fallback);

    let response = server.get("/bad").await;

    response.assert_status_ok();
    response.assert_text("Hello world!");
}

#[tokio::test]
async fn test_unusable_store_url_surfaces_when_configured() {
    let server = common::create_test_server(memory_store(), StoreErrorPolicy::Surface);

    let response = server.get("/bad").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "internal_error");
    assert_eq!(json["error"]["details"]["path"], "/bad");
}

#[tokio::test]
async fn test_percent_encoded_path_matches_decoded_key() {
    let server = common::create_test_server(memory_store(), StoreErrorPolicy::Fallback);

    let response = server.get("/hello%20world").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://hello.example.com");
}
