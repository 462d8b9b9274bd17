//! Initial schema: `users` and `students`, as an up/down pair.

use crate::error::AppError;
use sqlx::PgPool;

const TIMESTAMPS: &str = "created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),\n  updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()";

fn users_ddl() -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS users (
  id SERIAL PRIMARY KEY,
  name VARCHAR(255) NOT NULL,
  email VARCHAR(255) NOT NULL UNIQUE,
  password VARCHAR(255) NOT NULL,
  {}
)"#,
        TIMESTAMPS
    )
}

fn students_ddl() -> String {
    format!(
        r#"CREATE TABLE IF NOT EXISTS students (
  id SERIAL PRIMARY KEY,
  name VARCHAR(255) NOT NULL,
  age INTEGER NOT NULL,
  course VARCHAR(255) NOT NULL,
  regid VARCHAR(255) NOT NULL UNIQUE,
  {}
)"#,
        TIMESTAMPS
    )
}

/// Create both tables. Idempotent.
pub async fn migrate_up(pool: &PgPool) -> Result<(), AppError> {
    for (table, sql) in [("users", users_ddl()), ("students", students_ddl())] {
        tracing::debug!(sql = %sql, "migrate up");
        sqlx::query(&sql).execute(pool).await?;
        tracing::info!(table, "table ready");
    }
    Ok(())
}

/// Drop both tables, students first.
pub async fn migrate_down(pool: &PgPool) -> Result<(), AppError> {
    for table in ["students", "users"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
        tracing::info!(table, "table dropped");
    }
    Ok(())
}
