//! HTTP handlers for the Record API and auth.

pub mod auth;
pub mod students;
