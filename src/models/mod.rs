//! Rows and request payloads for `students` and `users`.

pub mod student;
pub mod user;

pub use student::{NewStudent, Student, StudentPayload};
pub use user::{LoginPayload, NewUser, PublicUser, SignupPayload, User};
