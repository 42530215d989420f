//! Read-through cache collaborator: key shapes, the `CacheStore` seam, and its Redis implementation.
//!
//! Entries expire by TTL only; the service has no write path that could invalidate them.

use crate::config::CacheConfig;
use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("redis: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("{0}")]
    Unavailable(String),
}

#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
    async fn ping(&self) -> Result<(), CacheError>;
}

/// Key shapes. List keys carry the resolved 1-based page number so equivalent
/// tokens ("", "0", "abc") share page 1's entry; by-id keys carry no page.
pub mod keys {
    use crate::model::Category;
    use crate::sql::page_number;

    pub fn all(page: &str) -> String {
        format!("components:all:page={}", page_number(page))
    }

    pub fn by_category(category: Category, page: &str) -> String {
        format!("components:category={}:page={}", category, page_number(page))
    }

    pub fn by_category_and_brand(category: Category, brand: &str, page: &str) -> String {
        format!(
            "components:category={}:brand={}:page={}",
            category,
            brand,
            page_number(page)
        )
    }

    pub fn by_id(id: i64) -> String {
        format!("components:id={}", id)
    }
}

#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    /// Connect and `PING`; an unreachable cache is a startup failure.
    /// Every command, including reconnects, is bounded by the configured timeouts.
    pub async fn connect(config: &CacheConfig) -> Result<Self, CacheError> {
        let client = redis::Client::open(config.url())?;
        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(config.connect_timeout)
            .set_response_timeout(config.op_timeout);
        let conn = ConnectionManager::new_with_config(client, manager_config).await?;
        let cache = RedisCache { conn };
        cache.ping().await?;
        tracing::info!(host = %config.host, port = config.port, db = config.db, "connected to Redis");
        Ok(cache)
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        Ok(conn.get(key).await?)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let secs = ttl.as_secs().max(1);
        let _: () = conn.set_ex(key, value, secs).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        if pong != "PONG" {
            return Err(CacheError::Unavailable(format!("unexpected PING reply: {}", pong)));
        }
        Ok(())
    }
}
