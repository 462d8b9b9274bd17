//! Wires route binders under their prefixes and runs the listener.

use crate::config::ServerConfig;
use crate::migration::migrate_up;
use crate::routes::{auth_routes, common_routes, student_routes};
use crate::state::AppState;
use crate::store::{ensure_database_exists, PgStore};
use axum::Router;
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Full HTTP surface: `/api/auth`, `/api/students`, `/uploads`, plus health probes.
pub fn build_app(state: AppState, uploads_dir: &Path) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api/auth", auth_routes(state.clone()))
        .nest("/api/students", student_routes(state))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve `app` on `listener` until the process is stopped.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    tracing::info!("Server is running on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}

/// Create the database if needed, run the up migration, bind `0.0.0.0:PORT` and serve.
pub async fn run(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    ensure_database_exists(&config.database_url).await?;
    let store = PgStore::connect(&config.database_url, config.max_connections).await?;
    migrate_up(store.pool()).await?;

    let app = build_app(AppState::new(store), &config.uploads_dir);
    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    serve(listener, app).await?;
    Ok(())
}
