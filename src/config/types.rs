//! Server settings for an application built on the CRUD routes.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_ROUTE_PREFIX: &str = "api";
pub const DEFAULT_SCHEMA: &str = "crud";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Where models are persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            other => Err(ConfigError::Invalid {
                key: "CRUD_STORE",
                reason: format!("unknown store backend '{}'", other),
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Prefix the model routes are nested under, without slashes (e.g. `api` or `api/v1`).
    pub route_prefix: String,
    pub store: StoreBackend,
    /// Required when `store` is Postgres.
    pub database_url: Option<String>,
    /// Schema holding the model tables.
    pub schema: String,
    pub max_body_bytes: usize,
    /// Hide unexpected error text from response envelopes.
    pub redact_errors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            store: StoreBackend::Memory,
            database_url: None,
            schema: DEFAULT_SCHEMA.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            redact_errors: false,
        }
    }
}
