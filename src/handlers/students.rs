//! Record API: list, create, update and delete students.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{Student, StudentPayload};
use crate::response::{created, ok_message, StudentCreated};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// Any integer is a valid id. `None` means it is outside the `SERIAL` range, so no row can match.
pub(crate) fn parse_id(id_str: &str) -> Result<Option<i32>, AppError> {
    let id: i64 = id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest("invalid id".into()))?;
    Ok(i32::try_from(id).ok())
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let rows = state
        .store
        .list_students()
        .await
        .map_err(AppError::store("Failed to fetch students"))?;
    Ok(Json(rows))
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<StudentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let student = RequestValidator::new_student(&body)?;
    let id = state
        .store
        .insert_student(&student)
        .await
        .map_err(AppError::store("Failed to add student"))?;
    tracing::info!(student_id = id, "student added");
    Ok(created(StudentCreated {
        message: "Student added",
        student_id: id,
    }))
}

/// Overwrites all four fields. A missing row is not an error.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonBody(body): JsonBody<StudentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let student = RequestValidator::student_columns(&body)?;
    let Some(id) = parse_id(&id_str)? else {
        return Ok(ok_message("Student updated"));
    };
    let affected = state
        .store
        .update_student(id, &student)
        .await
        .map_err(AppError::store("Failed to update student"))?;
    tracing::info!(student_id = id, affected, "student updated");
    Ok(ok_message("Student updated"))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let Some(id) = parse_id(&id_str)? else {
        return Ok(ok_message("Student deleted"));
    };
    let affected = state
        .store
        .delete_student(id)
        .await
        .map_err(AppError::store("Failed to delete student"))?;
    tracing::info!(student_id = id, affected, "student deleted");
    Ok(ok_message("Student deleted"))
}

#[cfg(test)]
mod tests {
    use crate::routes::student_routes;
    use crate::state::AppState;
    use crate::store::MemoryStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> (Router, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = AppState { store: store.clone() };
        (Router::new().nest("/api/students", student_routes(state)), store)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(v) => {
                req = req.header("content-type", "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    fn ana() -> Value {
        json!({"name": "Ana", "age": "21", "course": "CS", "regid": "R001"})
    }

    #[tokio::test]
    async fn create_then_list_shows_the_record() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::POST, "/api/students", Some(ana())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Student added");
        let id = body["studentId"].as_i64().unwrap();

        let (status, list) = send(&app, Method::GET, "/api/students", None).await;
        assert_eq!(status, StatusCode::OK);
        let rows = list.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"].as_i64(), Some(id));
        assert_eq!(rows[0]["name"], "Ana");
        assert_eq!(rows[0]["age"], 21);
        assert_eq!(rows[0]["course"], "CS");
        assert_eq!(rows[0]["regid"], "R001");
    }

    #[tokio::test]
    async fn create_with_blank_field_never_reaches_the_store() {
        let (app, store) = app();
        store.set_unavailable(true);
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/students",
            Some(json!({"name": "Ana", "age": "21", "course": "", "regid": "R001"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "All fields are required");
    }

    #[tokio::test]
    async fn create_without_body_is_rejected() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::POST, "/api/students", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "All fields are required");
    }

    #[tokio::test]
    async fn duplicate_regid_is_a_generic_server_error() {
        let (app, _) = app();
        send(&app, Method::POST, "/api/students", Some(ana())).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/students",
            Some(json!({"name": "Bo", "age": 22, "course": "Art", "regid": "R001"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to add student"}));
    }

    #[tokio::test]
    async fn update_changes_only_the_target_record() {
        let (app, _) = app();
        send(&app, Method::POST, "/api/students", Some(ana())).await;
        let (_, second) = send(
            &app,
            Method::POST,
            "/api/students",
            Some(json!({"name": "Bo", "age": 22, "course": "Art", "regid": "R002"})),
        )
        .await;
        let id = second["studentId"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/students/{}", id),
            Some(json!({"name": "Bo", "age": "23", "course": "Math", "regid": "R002"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Student updated");

        let (_, list) = send(&app, Method::GET, "/api/students", None).await;
        let rows = list.as_array().unwrap();
        assert_eq!(rows[0]["course"], "CS");
        assert_eq!(rows[0]["age"], 21);
        assert_eq!(rows[1]["course"], "Math");
        assert_eq!(rows[1]["age"], 23);
    }

    #[tokio::test]
    async fn update_of_unknown_id_still_succeeds() {
        let (app, _) = app();
        let (status, _) = send(&app, Method::PUT, "/api/students/999", Some(ana())).await;
        assert_eq!(status, StatusCode::OK);
        let (_, list) = send(&app, Method::GET, "/api/students", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn update_with_missing_field_fails_in_the_store() {
        let (app, _) = app();
        let (_, created) = send(&app, Method::POST, "/api/students", Some(ana())).await;
        let id = created["studentId"].as_i64().unwrap();
        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/students/{}", id),
            Some(json!({"course": "Math"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to update student");
    }

    #[tokio::test]
    async fn delete_removes_one_record_and_tolerates_unknown_ids() {
        let (app, _) = app();
        let (_, created) = send(&app, Method::POST, "/api/students", Some(ana())).await;
        send(
            &app,
            Method::POST,
            "/api/students",
            Some(json!({"name": "Bo", "age": 22, "course": "Art", "regid": "R002"})),
        )
        .await;
        let id = created["studentId"].as_i64().unwrap();

        let (status, body) = send(&app, Method::DELETE, &format!("/api/students/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Student deleted");
        let (_, list) = send(&app, Method::GET, "/api/students", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["regid"], "R002");

        let (status, _) = send(&app, Method::DELETE, "/api/students/999", None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, list) = send(&app, Method::GET, "/api/students", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn store_outage_is_reported_per_operation() {
        let (app, store) = app();
        store.set_unavailable(true);
        let (status, body) = send(&app, Method::GET, "/api/students", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to fetch students");
        let (status, body) = send(&app, Method::DELETE, "/api/students/1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to delete student");
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_bad_request() {
        let (app, _) = app();
        let (status, body) = send(&app, Method::DELETE, "/api/students/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid id");
    }

    #[tokio::test]
    async fn ids_beyond_the_serial_range_are_unknown_not_invalid() {
        let (app, store) = app();
        send(&app, Method::POST, "/api/students", Some(ana())).await;
        store.set_unavailable(true);

        let (status, body) = send(&app, Method::PUT, "/api/students/4294967296", Some(ana())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Student updated");
        let (status, body) = send(&app, Method::DELETE, "/api/students/4294967296", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Student deleted");

        store.set_unavailable(false);
        let (_, list) = send(&app, Method::GET, "/api/students", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_object_bodies_count_as_missing_fields() {
        let (app, _) = app();
        for body in [json!(["Ana", "21", "CS", "R001"]), json!("Ana"), json!(42), json!(null)] {
            let (status, resp) = send(&app, Method::POST, "/api/students", Some(body.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
            assert_eq!(resp["error"], "All fields are required");
        }
        let (_, list) = send(&app, Method::GET, "/api/students", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let (app, _) = app();
        let req = Request::post("/api/students")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\": "))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
