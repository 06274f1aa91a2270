//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Store readable
/// - **503 Service Unavailable**: Store closed or failing
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "layers": ["static", "yaml", "store"],
///   "checks": {
///     "store": { "status": "ok", "message": "Store readable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;
    let healthy = store_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        layers: layer_names(&state),
        checks: HealthChecks { store: store_check },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn layer_names(state: &AppState) -> Vec<String> {
    state
        .chain
        .layer_names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Checks that the store still answers reads.
async fn check_store(state: &AppState) -> CheckStatus {
    if state.store.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Store readable".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Store unavailable".to_string()),
        }
    }
}
