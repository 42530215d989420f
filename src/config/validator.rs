//! Semantic checks on a parsed config.

use crate::config::AppConfig;
use crate::error::ConfigError;

const SSL_MODES: &[&str] = &["disable", "allow", "prefer", "require", "verify-ca", "verify-full"];

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let db = &config.database;
    if config.server.port == 0 {
        return Err(invalid("PORT", "0", "port must be non-zero"));
    }
    if db.port == 0 {
        return Err(invalid("DB_PORT", "0", "port must be non-zero"));
    }
    if !SSL_MODES.contains(&db.ssl_mode.as_str()) {
        return Err(invalid("DB_SSLMODE", &db.ssl_mode, "unknown ssl mode"));
    }
    if db.max_connections == 0 {
        return Err(invalid("DB_MAX_CONNECTIONS", "0", "pool needs at least one connection"));
    }
    if db.min_connections > db.max_connections {
        return Err(invalid(
            "DB_MIN_CONNECTIONS",
            &db.min_connections.to_string(),
            "exceeds DB_MAX_CONNECTIONS",
        ));
    }
    if db.query_timeout.is_zero() {
        return Err(invalid("QUERY_TIMEOUT_SECS", "0", "timeout must be positive"));
    }
    if config.cache.enabled {
        if config.cache.port == 0 {
            return Err(invalid("REDIS_PORT", "0", "port must be non-zero"));
        }
        if config.cache.db < 0 {
            return Err(invalid("REDIS_DB", &config.cache.db.to_string(), "db index must be >= 0"));
        }
        if config.cache.ttl.is_zero() {
            return Err(invalid("CACHE_TTL_SECS", "0", "ttl must be positive"));
        }
        if config.cache.connect_timeout.is_zero() {
            return Err(invalid("REDIS_CONNECT_TIMEOUT_SECS", "0", "timeout must be positive"));
        }
        if config.cache.op_timeout.is_zero() {
            return Err(invalid("REDIS_TIMEOUT_MS", "0", "timeout must be positive"));
        }
    }
    Ok(())
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
