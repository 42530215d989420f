//! Runtime configuration assembled from the environment.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_retries: u32,
    /// Deadline applied to every catalog query and to pool acquisition.
    pub query_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub db: i64,
    pub ttl: Duration,
    /// Bound on establishing (and re-establishing) the Redis connection.
    pub connect_timeout: Duration,
    /// Bound on any single cache command; past it the read falls through to the store.
    pub op_timeout: Duration,
}

impl CacheConfig {
    pub fn url(&self) -> String {
        match &self.password {
            Some(p) => format!(
                "redis://:{}@{}:{}/{}",
                urlencoding::encode(p),
                self.host,
                self.port,
                self.db
            ),
            None => format!("redis://{}:{}/{}", self.host, self.port, self.db),
        }
    }
}
