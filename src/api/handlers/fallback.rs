//! Default terminal handler for unresolved paths.

use axum::Router;

/// Greets requests that no redirect layer claimed.
pub async fn hello_handler() -> &'static str {
    "Hello, world!\n"
}

/// Router used as the end of the chain when the caller supplies none.
pub fn default_fallback() -> Router {
    Router::new().fallback(hello_handler)
}
