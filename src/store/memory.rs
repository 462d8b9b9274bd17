//! In-memory store with the same uniqueness and not-null rules as the SQL schema.

use super::{Store, StudentStore, UserStore};
use crate::error::StoreError;
use crate::models::{NewStudent, NewUser, Student, User};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    students: Vec<Student>,
    users: Vec<User>,
    next_student_id: i32,
    next_user_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every operation fails the way an unreachable database would.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn lock_tables(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Db(sqlx::Error::PoolTimedOut));
        }
        Ok(self.tables.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

fn not_null<'a, T>(col: &'static str, v: &'a Option<T>) -> Result<&'a T, StoreError> {
    v.as_ref().ok_or(StoreError::NotNull(col))
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.lock_tables()?.students.clone())
    }

    async fn insert_student(&self, student: &NewStudent) -> Result<i32, StoreError> {
        let mut t = self.lock_tables()?;
        let name = not_null("name", &student.name)?;
        let age = not_null("age", &student.age)?;
        let course = not_null("course", &student.course)?;
        let regid = not_null("regid", &student.regid)?;
        if t.students.iter().any(|s| &s.regid == regid) {
            return Err(StoreError::Unique("regid"));
        }
        t.next_student_id += 1;
        let now = Utc::now();
        let row = Student {
            id: t.next_student_id,
            name: name.clone(),
            age: *age,
            course: course.clone(),
            regid: regid.clone(),
            created_at: now,
            updated_at: now,
        };
        t.students.push(row);
        Ok(t.next_student_id)
    }

    async fn update_student(&self, id: i32, student: &NewStudent) -> Result<u64, StoreError> {
        let mut t = self.lock_tables()?;
        let Some(pos) = t.students.iter().position(|s| s.id == id) else {
            return Ok(0);
        };
        let name = not_null("name", &student.name)?;
        let age = not_null("age", &student.age)?;
        let course = not_null("course", &student.course)?;
        let regid = not_null("regid", &student.regid)?;
        if t.students.iter().any(|s| s.id != id && &s.regid == regid) {
            return Err(StoreError::Unique("regid"));
        }
        let row = &mut t.students[pos];
        row.name = name.clone();
        row.age = *age;
        row.course = course.clone();
        row.regid = regid.clone();
        row.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete_student(&self, id: i32) -> Result<u64, StoreError> {
        let mut t = self.lock_tables()?;
        let before = t.students.len();
        t.students.retain(|s| s.id != id);
        Ok((before - t.students.len()) as u64)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &NewUser) -> Result<i32, StoreError> {
        let mut t = self.lock_tables()?;
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Unique("email"));
        }
        t.next_user_id += 1;
        let now = Utc::now();
        let row = User {
            id: t.next_user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            created_at: now,
            updated_at: now,
        };
        t.users.push(row);
        Ok(t.next_user_id)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.lock_tables()?.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.lock_tables().map(|_| ())
    }
}
