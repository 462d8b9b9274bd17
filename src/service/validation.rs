//! Presence checks and coercion of raw request fields.

use crate::error::AppError;
use crate::models::{NewStudent, NewUser, StudentPayload};
use serde_json::Value;

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";

pub struct RequestValidator;

impl RequestValidator {
    /// Every field must be present and truthy: absent, `null`, `false`, `0` and `""` all count as missing.
    pub fn require(fields: &[&Value], message: &str) -> Result<(), AppError> {
        if fields.iter().all(|v| is_truthy(v)) {
            Ok(())
        } else {
            Err(AppError::Validation(message.to_string()))
        }
    }

    /// Create: all four fields required, then typed.
    pub fn new_student(body: &StudentPayload) -> Result<NewStudent, AppError> {
        Self::require(
            &[&body.name, &body.age, &body.course, &body.regid],
            ALL_FIELDS_REQUIRED,
        )?;
        Self::student_columns(body)
    }

    /// Update: fields are typed but not required. Missing ones become NULL and are left to the
    /// store's not-null constraints.
    pub fn student_columns(body: &StudentPayload) -> Result<NewStudent, AppError> {
        Ok(NewStudent {
            name: text_field("name", &body.name)?,
            age: age_field(&body.age)?,
            course: text_field("course", &body.course)?,
            regid: text_field("regid", &body.regid)?,
        })
    }

    pub fn new_user(name: &Value, email: &Value, password: &Value) -> Result<NewUser, AppError> {
        Self::require(&[name, email, password], ALL_FIELDS_REQUIRED)?;
        Ok(NewUser {
            name: required_text("name", name)?,
            email: required_text("email", email)?,
            password: required_text("password", password)?,
        })
    }
}

/// JavaScript-style truthiness of a JSON value.
pub fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings pass through, numbers are rendered as text, null is absent.
pub fn text_field(col: &str, v: &Value) -> Result<Option<String>, AppError> {
    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(AppError::Validation(format!("{} must be text", col))),
    }
}

fn required_text(col: &str, v: &Value) -> Result<String, AppError> {
    text_field(col, v)?.ok_or_else(|| AppError::Validation(ALL_FIELDS_REQUIRED.into()))
}

/// Accepts a JSON integer or a string holding one (form input arrives as text).
pub fn age_field(v: &Value) -> Result<Option<i32>, AppError> {
    let invalid = || AppError::Validation("age must be a whole number".into());
    match v {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(Some)
            .ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<i32>().map(Some).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
