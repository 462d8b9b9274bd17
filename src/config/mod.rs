//! Process configuration from the environment.

use crate::error::ConfigError;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/student_roster";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_UPLOADS_DIR: &str = "uploads";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub uploads_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            uploads_dir: PathBuf::from(DEFAULT_UPLOADS_DIR),
        }
    }
}

impl ServerConfig {
    /// Reads `PORT`, `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and `UPLOADS_DIR`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        let port = match lookup("PORT") {
            Some(v) => parse("PORT", &v)?,
            None => defaults.port,
        };
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => parse("DATABASE_MAX_CONNECTIONS", &v)?,
            None => defaults.max_connections,
        };
        Ok(ServerConfig {
            port,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections,
            uploads_dir: lookup("UPLOADS_DIR").map(PathBuf::from).unwrap_or(defaults.uploads_dir),
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
