//! Load server settings from the environment (or any key lookup, for tests).

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::net::SocketAddr;

pub const ENV_BIND_ADDR: &str = "CRUD_BIND_ADDR";
pub const ENV_ROUTE_PREFIX: &str = "CRUD_ROUTE_PREFIX";
pub const ENV_STORE: &str = "CRUD_STORE";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_SCHEMA: &str = "CRUD_SCHEMA";
pub const ENV_MAX_BODY_BYTES: &str = "CRUD_MAX_BODY_BYTES";
pub const ENV_REDACT_ERRORS: &str = "CRUD_REDACT_ERRORS";

impl ServerConfig {
    /// Read `.env` if present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(ConfigError::Invalid {
                    key: ".env",
                    reason: err.to_string(),
                });
            }
        }
        Self::from_env()
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build and validate settings from `lookup`; unset keys fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr: SocketAddr = get(ENV_BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: ENV_BIND_ADDR,
                reason: e.to_string(),
            })?;
        let route_prefix = get(ENV_ROUTE_PREFIX)
            .map(|p| p.trim_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_ROUTE_PREFIX.to_string());
        let store = match get(ENV_STORE) {
            Some(s) => s.parse()?,
            None => StoreBackend::default(),
        };
        let max_body_bytes = match get(ENV_MAX_BODY_BYTES) {
            Some(s) => s.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                key: ENV_MAX_BODY_BYTES,
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };
        let redact_errors = match get(ENV_REDACT_ERRORS) {
            Some(s) => parse_flag(ENV_REDACT_ERRORS, &s)?,
            None => false,
        };

        let config = ServerConfig {
            bind_addr,
            route_prefix,
            store,
            database_url: get(ENV_DATABASE_URL),
            schema: get(ENV_SCHEMA).unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
            max_body_bytes,
            redact_errors,
        };
        validate(&config)?;
        Ok(config)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn reads_every_setting() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ENV_BIND_ADDR, "0.0.0.0:8080"),
            (ENV_ROUTE_PREFIX, "/api/v1/"),
            (ENV_STORE, "Postgres"),
            (ENV_DATABASE_URL, "postgres://localhost/books"),
            (ENV_SCHEMA, "library"),
            (ENV_MAX_BODY_BYTES, "2048"),
            (ENV_REDACT_ERRORS, "yes"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.route_prefix, "api/v1");
        assert_eq!(config.store, StoreBackend::Postgres);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/books"));
        assert_eq!(config.schema, "library");
        assert_eq!(config.max_body_bytes, 2048);
        assert!(config.redact_errors);
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = ServerConfig::from_lookup(lookup(&[(ENV_STORE, "postgres")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ENV_DATABASE_URL)));
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(ServerConfig::from_lookup(lookup(&[(ENV_BIND_ADDR, "nowhere")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[(ENV_STORE, "redis")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[(ENV_REDACT_ERRORS, "maybe")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[(ENV_MAX_BODY_BYTES, "-1")])).is_err());
    }
}
