//! Student CRUD routes, nested under `/api/students`.

use crate::handlers::students::{create, delete as delete_handler, list, update};
use crate::state::AppState;
use axum::{routing::get, routing::put, Router};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", put(update).delete(delete_handler))
        .with_state(state)
}
