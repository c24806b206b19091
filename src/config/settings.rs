//! Process settings read from the environment (optionally seeded from a `.env` file).

use crate::config::validator::{parse_addr, parse_bool, parse_positive, validate_identifier};
use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/people";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;
pub const DEFAULT_LOG_FILTER: &str = "people_api=info,tower_http=info";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    /// Schema holding the `person` table. From env `PEOPLE_SCHEMA`, default `public`.
    pub schema: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
    pub cors_permissive: bool,
}

impl AppConfig {
    /// Read `.env` if present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let schema = lookup("PEOPLE_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        validate_identifier(&schema)?;

        let bind_addr = match lookup("BIND_ADDR") {
            Some(v) => parse_addr("BIND_ADDR", &v)?,
            None => parse_addr("BIND_ADDR", DEFAULT_BIND_ADDR)?,
        };
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => parse_positive("DB_MAX_CONNECTIONS", &v)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let body_limit_bytes = match lookup("BODY_LIMIT_BYTES") {
            Some(v) => parse_positive("BODY_LIMIT_BYTES", &v)?,
            None => DEFAULT_BODY_LIMIT_BYTES,
        };
        let cors_permissive = match lookup("CORS_PERMISSIVE") {
            Some(v) => parse_bool("CORS_PERMISSIVE", &v)?,
            None => false,
        };

        Ok(AppConfig {
            database_url,
            schema,
            bind_addr,
            max_connections,
            body_limit_bytes,
            cors_permissive,
        })
    }
}
