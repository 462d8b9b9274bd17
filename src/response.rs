//! Success bodies.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct Message {
    pub message: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentCreated {
    pub message: &'static str,
    pub student_id: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreated {
    pub message: &'static str,
    pub user_id: i32,
}

pub fn ok_message(message: &'static str) -> (StatusCode, Json<Message>) {
    (StatusCode::OK, Json(Message { message }))
}

pub fn created<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(body))
}
