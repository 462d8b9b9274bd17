//! Liveness, store readiness and build identity for the roster server.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

/// `database` is only reported by `/ready`.
#[derive(Serialize)]
struct Status {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct Build {
    name: &'static str,
    version: &'static str,
}

async fn alive() -> Json<Status> {
    Json(Status { status: "ok", database: None })
}

async fn store_ready(State(state): State<AppState>) -> (StatusCode, Json<Status>) {
    match state.store.ping().await {
        Ok(()) => (StatusCode::OK, Json(Status { status: "ok", database: Some("ok") })),
        Err(e) => {
            tracing::warn!(error = %e, "student store unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Status { status: "degraded", database: Some("unavailable") }),
            )
        }
    }
}

async fn build() -> Json<Build> {
    Json(Build {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Unprefixed routes for load balancers and deploy checks. `/ready` is 503 while the store is down.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(alive))
        .route("/ready", get(store_ready))
        .route("/version", get(build))
        .with_state(state)
}
