//! Store seam between handlers and the relational database.

pub mod postgres;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;

use crate::error::{AppError, ConfigError, StoreError};
use crate::models::{NewStudent, NewUser, Student, User};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use std::str::FromStr;

pub use postgres::PgStore;
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryStore;

/// Single-statement operations on `students`.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All rows, ordered by id.
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;
    /// Returns the generated id.
    async fn insert_student(&self, student: &NewStudent) -> Result<i32, StoreError>;
    /// Overwrites all four columns. Returns the number of rows affected.
    async fn update_student(&self, id: i32, student: &NewStudent) -> Result<u64, StoreError>;
    /// Returns the number of rows removed.
    async fn delete_student(&self, id: i32) -> Result<u64, StoreError>;
}

/// Signup and login lookups on `users`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: &NewUser) -> Result<i32, StoreError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

/// Everything the server context needs from a backing store.
#[async_trait]
pub trait Store: StudentStore + UserStore {
    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Connect to the `postgres` maintenance database and create the target database if it does not exist.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url).map_err(|e| ConfigError::Invalid {
        name: "DATABASE_URL",
        value: e.to_string(),
    })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let invalid = || ConfigError::Invalid {
        name: "DATABASE_URL",
        value: "no database path".into(),
    };
    let scheme_end = url.find("://").map(|i| i + 3).ok_or_else(invalid)?;
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(invalid)?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
