//! PostgreSQL store: one parameterized statement per operation.

use super::{Store, StudentStore, UserStore};
use crate::error::StoreError;
use crate::models::{NewStudent, NewUser, Student, User};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

const STUDENT_COLUMNS: &str = "id, name, age, course, regid, created_at, updated_at";
const USER_COLUMNS: &str = "id, name, email, password, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(PgStore { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl StudentStore for PgStore {
    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        let sql = format!("SELECT {} FROM students ORDER BY id", STUDENT_COLUMNS);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Student>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<i32, StoreError> {
        let sql = "INSERT INTO students (name, age, course, regid) VALUES ($1, $2, $3, $4) RETURNING id";
        tracing::debug!(sql = %sql, params = ?student, "query");
        let id: i32 = sqlx::query_scalar(sql)
            .bind(&student.name)
            .bind(student.age)
            .bind(&student.course)
            .bind(&student.regid)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update_student(&self, id: i32, student: &NewStudent) -> Result<u64, StoreError> {
        let sql = "UPDATE students SET name = $1, age = $2, course = $3, regid = $4, updated_at = NOW() WHERE id = $5";
        tracing::debug!(sql = %sql, id, params = ?student, "query");
        let result = sqlx::query(sql)
            .bind(&student.name)
            .bind(student.age)
            .bind(&student.course)
            .bind(&student.regid)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_student(&self, id: i32) -> Result<u64, StoreError> {
        let sql = "DELETE FROM students WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: &NewUser) -> Result<i32, StoreError> {
        let sql = "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING id";
        tracing::debug!(sql = %sql, email = %user.email, "query");
        let id: i32 = sqlx::query_scalar(sql)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        tracing::debug!(sql = %sql, email = %email, "query");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
