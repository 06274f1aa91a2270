//! Handler resolving request paths through the redirect chain.

use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use tower::ServiceExt;
use tracing::{debug, error, warn};

use crate::domain::resolver::{Outcome, Resolver};
use crate::error::AppError;
use crate::state::AppState;

/// Resolves the request path and redirects, or hands the request on.
///
/// # Endpoint
///
/// Any path not matched by another route.
///
/// # Request Flow
///
/// 1. Percent-decode the request path (`/hello%20world` → `/hello world`)
/// 2. Walk the chain layers in priority order with the decoded path
/// 3. First usable URL → `301 Moved Permanently` with `Location`
/// 4. No match → forward the untouched request to the fallback router
///
/// # Errors
///
/// Only when the store layer is configured to surface failures:
/// returns 500 (or 503 for a closed store) with a JSON error body.
pub async fn redirect_handler(State(state): State<AppState>, request: Request) -> Response {
    let path = decoded_path(request.uri().path()).into_owned();

    match state.chain.resolve(&path).await {
        Ok(Outcome::Redirect(url)) => match HeaderValue::from_str(&url) {
            Ok(location) => permanent_redirect(location),
            Err(_) => {
                warn!(path = %path, url = ?url, "Resolved URL is not a valid location");
                delegate(state.fallback, request).await
            }
        },
        Ok(Outcome::Continue) => {
            debug!(path = %path, "Delegating to fallback handler");
            delegate(state.fallback, request).await
        }
        Err(e) => {
            error!(path = %path, error = %e, "Redirect resolution failed");
            AppError::from(e).into_response()
        }
    }
}

/// Decodes `%XX` escapes in a request path.
///
/// Paths that do not decode to UTF-8 are used as received.
fn decoded_path(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw)
        .decode_utf8()
        .unwrap_or(Cow::Borrowed(raw))
}

async fn delegate(fallback: Router, request: Request) -> Response {
    match fallback.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

/// Builds a `301` response pointing at `location`.
fn permanent_redirect(location: HeaderValue) -> Response {
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
}
