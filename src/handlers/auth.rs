//! Signup and login over the `users` table. No sessions or tokens are issued.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::{LoginPayload, PublicUser, SignupPayload};
use crate::response::{created, UserCreated};
use crate::service::validation::text_field;
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Serialize)]
pub struct LoginBody {
    pub message: &'static str,
    pub user: PublicUser,
}

pub async fn signup(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SignupPayload>,
) -> Result<impl IntoResponse, AppError> {
    let user = RequestValidator::new_user(&body.name, &body.email, &body.password)?;
    let id = state
        .store
        .insert_user(&user)
        .await
        .map_err(AppError::store("Failed to register user"))?;
    tracing::info!(user_id = id, "user registered");
    Ok(created(UserCreated {
        message: "User registered",
        user_id: id,
    }))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginPayload>,
) -> Result<Json<LoginBody>, AppError> {
    RequestValidator::require(&[&body.email, &body.password], "Email and password are required")?;
    let email = text_field("email", &body.email)?.unwrap_or_default();
    let password = text_field("password", &body.password)?.unwrap_or_default();
    let user = state
        .store
        .find_user_by_email(&email)
        .await
        .map_err(AppError::store("Failed to log in"))?
        .filter(|u| u.password == password)
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.into()))?;
    tracing::info!(user_id = user.id, "user logged in");
    Ok(Json(LoginBody {
        message: "Login successful",
        user: user.into(),
    }))
}
