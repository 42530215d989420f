//! ComponentService: repository pass-through with an optional read-through cache.

use crate::cache::{keys, CacheError, CacheStore};
use crate::error::AppError;
use crate::model::{Category, Component};
use crate::repository::ComponentRepository;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on a single cache call when none is configured.
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone)]
pub struct ComponentService {
    repo: Arc<dyn ComponentRepository>,
    cache: Option<Arc<dyn CacheStore>>,
    ttl: Duration,
    cache_timeout: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Ok,
    Disabled,
    Unavailable,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Ok => "ok",
            CacheStatus::Disabled => "disabled",
            CacheStatus::Unavailable => "unavailable",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Readiness {
    pub database: bool,
    pub cache: CacheStatus,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        self.database && self.cache != CacheStatus::Unavailable
    }
}

impl ComponentService {
    pub fn new(repo: Arc<dyn ComponentRepository>) -> Self {
        Self {
            repo,
            cache: None,
            ttl: Duration::ZERO,
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        self.cache = Some(cache);
        self.ttl = ttl;
        self
    }

    /// A cache call that outlives this is abandoned and treated as a miss.
    pub fn with_cache_timeout(mut self, timeout: Duration) -> Self {
        self.cache_timeout = timeout;
        self
    }

    pub async fn get_all(&self, page: &str) -> Result<Vec<Component>, AppError> {
        self.read_through(keys::all(page), || self.repo.get_all(page)).await
    }

    pub async fn get_by_category(&self, category: Category, page: &str) -> Result<Vec<Component>, AppError> {
        self.read_through(keys::by_category(category, page), || {
            self.repo.get_by_category(category, page)
        })
        .await
    }

    pub async fn get_by_category_and_brand(
        &self,
        category: Category,
        brand: &str,
        page: &str,
    ) -> Result<Vec<Component>, AppError> {
        self.read_through(keys::by_category_and_brand(category, brand, page), || {
            self.repo.get_by_category_and_brand(category, brand, page)
        })
        .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Component, AppError> {
        self.read_through(keys::by_id(id), || self.repo.get_by_id(id)).await
    }

    pub async fn readiness(&self) -> Readiness {
        let database = self.repo.ping().await;
        let cache = match &self.cache {
            None => CacheStatus::Disabled,
            Some(cache) => match self.bounded(cache.ping()).await {
                Ok(()) => CacheStatus::Ok,
                Err(e) => {
                    tracing::warn!(error = %e, "cache ping failed");
                    CacheStatus::Unavailable
                }
            },
        };
        Readiness { database, cache }
    }

    /// Serve from cache when possible; otherwise load and store on success.
    /// Cache failures are logged and never fail the request. Errors are never cached.
    async fn read_through<T, F, Fut>(&self, key: String, load: F) -> Result<T, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let Some(cache) = &self.cache else {
            return load().await;
        };
        match self.bounded(cache.get(&key)).await {
            Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
                Ok(value) => {
                    tracing::debug!(%key, "cache hit");
                    return Ok(value);
                }
                Err(e) => {
                    tracing::warn!(%key, error = %e, "discarding undecodable cache entry");
                    if let Err(e) = self.bounded(cache.delete(&key)).await {
                        tracing::warn!(%key, error = %e, "cache delete failed");
                    }
                }
            },
            Ok(None) => tracing::debug!(%key, "cache miss"),
            Err(e) => tracing::warn!(%key, error = %e, "cache read failed"),
        }

        let value = load().await?;
        match serde_json::to_string(&value) {
            Ok(raw) => {
                if let Err(e) = self.bounded(cache.set(&key, &raw, self.ttl)).await {
                    tracing::warn!(%key, error = %e, "cache write failed");
                }
            }
            Err(e) => tracing::warn!(%key, error = %e, "cache payload encode failed"),
        }
        Ok(value)
    }

    async fn bounded<T, Fut>(&self, call: Fut) -> Result<T, CacheError>
    where
        Fut: Future<Output = Result<T, CacheError>>,
    {
        tokio::time::timeout(self.cache_timeout, call)
            .await
            .unwrap_or_else(|_| Err(CacheError::Timeout(self.cache_timeout)))
    }
}
