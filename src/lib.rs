//! Student roster backend: student records and user signup/login over PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use migration::{migrate_down, migrate_up};
pub use models::{Student, User};
pub use routes::{auth_routes, common_routes, student_routes};
pub use server::{build_app, run, serve};
pub use state::AppState;
pub use store::{ensure_database_exists, PgStore, Store, StudentStore, UserStore};
#[cfg(any(test, feature = "test-support"))]
pub use store::MemoryStore;
