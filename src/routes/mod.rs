//! Route binders: method + path to handler, one router per prefix.

pub mod auth;
pub mod common;
pub mod students;

pub use auth::auth_routes;
pub use common::common_routes;
pub use students::student_routes;
