//! Service endpoints mounted next to the model routes: liveness, readiness and build info.

use crate::response::FAILURE_THRESHOLD;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct Status {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
    /// Response codes at or above this ordinal are failures.
    failure_threshold: u8,
}

async fn health() -> Json<Status> {
    Json(Status {
        status: "ok",
        store: None,
    })
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Status>) {
    match state.probe.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Status {
                status: "ok",
                store: Some("ok"),
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "store not ready");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Status {
                    status: "degraded",
                    store: Some("unavailable"),
                }),
            )
        }
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        failure_threshold: FAILURE_THRESHOLD,
    })
}

/// GET /health, GET /version and GET /info. Stateless.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(build_info))
        .route("/info", get(build_info))
}

/// [`common_routes`] plus GET /ready, which answers 503 while the store probe fails.
pub fn common_routes_with_ready(state: AppState) -> Router {
    common_routes().merge(Router::new().route("/ready", get(ready)).with_state(state))
}
