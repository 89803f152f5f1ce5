//! Config validation: identifiers and limits.

use crate::config::{ServerConfig, StoreBackend, ENV_DATABASE_URL};
use crate::error::ConfigError;
use regex::Regex;

const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_-]*$";

/// One path segment or SQL identifier: letters, digits, `_` and `-`, not starting with a digit.
pub fn validate_segment(kind: &'static str, value: &str) -> Result<(), ConfigError> {
    let re = Regex::new(IDENTIFIER_PATTERN).map_err(|e| ConfigError::Invalid {
        key: kind,
        reason: e.to_string(),
    })?;
    if re.is_match(value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            key: kind,
            reason: format!("'{}' is not a valid identifier", value),
        })
    }
}

pub fn validate(config: &ServerConfig) -> Result<(), ConfigError> {
    if !config.route_prefix.is_empty() {
        for segment in config.route_prefix.split('/') {
            validate_segment("route prefix", segment)?;
        }
    }
    validate_segment("schema", &config.schema)?;
    if config.max_body_bytes == 0 {
        return Err(ConfigError::Invalid {
            key: "max body bytes",
            reason: "must be greater than zero".into(),
        });
    }
    if config.store == StoreBackend::Postgres && config.database_url.is_none() {
        return Err(ConfigError::Missing(ENV_DATABASE_URL));
    }
    Ok(())
}
