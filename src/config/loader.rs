//! Load configuration from environment variables.

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_ALLOWED_ORIGINS: &str =
    "http://localhost:3000,http://localhost:3001,http://localhost:3002,http://localhost:5173";

impl AppConfig {
    /// Read from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build and validate from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(&lookup);
        let cache_password = env.get("REDIS_PASSWORD");
        let config = AppConfig {
            server: ServerConfig {
                port: env.parse_or("PORT", 8080)?,
                allowed_origins: env
                    .get("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            },
            database: DatabaseConfig {
                host: env.get_or("DB_HOST", "localhost"),
                port: env.parse_or("DB_PORT", 5432)?,
                user: env.required("DB_USER")?,
                password: env.required("DB_PASSWORD")?,
                name: env.required("DB_NAME")?,
                ssl_mode: env.get_or("DB_SSLMODE", "disable"),
                max_connections: env.parse_or("DB_MAX_CONNECTIONS", 25)?,
                min_connections: env.parse_or("DB_MIN_CONNECTIONS", 5)?,
                connect_retries: env.parse_or("DB_CONNECT_RETRIES", 3)?,
                query_timeout: Duration::from_secs(env.parse_or("QUERY_TIMEOUT_SECS", 5)?),
            },
            cache: CacheConfig {
                enabled: env.parse_bool_or("CACHE_ENABLED", true)?,
                host: env.get_or("REDIS_HOST", "localhost"),
                port: env.parse_or("REDIS_PORT", 6379)?,
                password: cache_password,
                db: env.parse_or("REDIS_DB", 0)?,
                ttl: Duration::from_secs(env.parse_or("CACHE_TTL_SECS", 300)?),
                connect_timeout: Duration::from_secs(env.parse_or("REDIS_CONNECT_TIMEOUT_SECS", 10)?),
                op_timeout: Duration::from_millis(env.parse_or("REDIS_TIMEOUT_MS", 3000)?),
            },
        };
        validate(&config)?;
        Ok(config)
    }
}

struct Env<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.is_empty())
    }

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            None => Ok(default),
            Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value: v,
            }),
        }
    }

    fn parse_bool_or(&self, key: &'static str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::Invalid {
                    key,
                    value: v,
                    reason: "expected a boolean".into(),
                }),
            },
        }
    }
}
