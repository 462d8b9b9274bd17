use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row of `students`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub course: String,
    pub regid: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for create and update. Fields stay raw JSON so presence can be
/// judged before any typing happens.
#[derive(Debug, Default, Deserialize)]
pub struct StudentPayload {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub age: Value,
    #[serde(default)]
    pub course: Value,
    #[serde(default)]
    pub regid: Value,
}

/// Column values written by insert and update. `None` is bound as NULL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewStudent {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub course: Option<String>,
    pub regid: Option<String>,
}
