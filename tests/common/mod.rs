//! In-memory fakes for the repository and cache seams.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use parts_catalog::cache::{CacheError, CacheStore};
use parts_catalog::config::ServerConfig;
use parts_catalog::sql::Pagination;
use parts_catalog::{app, AppError, AppState, Category, Component, ComponentRepository, ComponentService};
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ALLOWED_ORIGIN: &str = "http://localhost:3000";

pub fn component(id: i64, category: Category, brand: &str) -> Component {
    Component {
        id,
        category,
        brand: brand.to_string(),
        model: format!("Model {}", id),
        sku: Some(format!("SKU-{}", id)),
        upc: None,
        specs: json!({"cores": 8, "boost": {"ghz": 5.1}, "tags": ["am5", "unlocked"]}),
        created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
    }
}

/// Applies the same filter and pagination semantics as the SQL repository.
#[derive(Default)]
pub struct InMemoryRepository {
    rows: Vec<Component>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryRepository {
    pub fn new(rows: Vec<Component>) -> Self {
        Self {
            rows,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn page<'a>(&self, rows: impl Iterator<Item = &'a Component>, page: &str) -> Vec<Component> {
        let p = Pagination::from_page_token(page);
        rows.skip(p.offset as usize).take(p.limit as usize).cloned().collect()
    }
}

#[async_trait]
impl ComponentRepository for InMemoryRepository {
    async fn get_all(&self, page: &str) -> Result<Vec<Component>, AppError> {
        self.record(format!("get_all:{}", page));
        Ok(self.page(self.rows.iter(), page))
    }

    async fn get_by_category(&self, category: Category, page: &str) -> Result<Vec<Component>, AppError> {
        self.record(format!("get_by_category:{}:{}", category, page));
        Ok(self.page(self.rows.iter().filter(|c| c.category == category), page))
    }

    async fn get_by_category_and_brand(
        &self,
        category: Category,
        brand: &str,
        page: &str,
    ) -> Result<Vec<Component>, AppError> {
        self.record(format!("get_by_category_and_brand:{}:{}:{}", category, brand, page));
        Ok(self.page(
            self.rows.iter().filter(|c| c.category == category && c.brand == brand),
            page,
        ))
    }

    async fn get_by_id(&self, id: i64) -> Result<Component, AppError> {
        self.record(format!("get_by_id:{}", id));
        self.rows
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("component {}", id)))
    }

    async fn ping(&self) -> bool {
        true
    }
}

/// Every read fails the way a lost connection would.
pub struct FailingRepository;

#[async_trait]
impl ComponentRepository for FailingRepository {
    async fn get_all(&self, _page: &str) -> Result<Vec<Component>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn get_by_category(&self, _category: Category, _page: &str) -> Result<Vec<Component>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn get_by_category_and_brand(
        &self,
        _category: Category,
        _brand: &str,
        _page: &str,
    ) -> Result<Vec<Component>, AppError> {
        Err(AppError::InvalidCategory("power_supply".into()))
    }

    async fn get_by_id(&self, _id: i64) -> Result<Component, AppError> {
        Err(AppError::Timeout(Duration::from_secs(5)))
    }

    async fn ping(&self) -> bool {
        false
    }
}

#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
    pub sets: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl InMemoryCache {
    pub fn insert(&self, key: &str, value: &str) {
        self.entries.lock().unwrap().insert(key.to_string(), value.to_string());
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        Ok(self.get_raw(key))
    }

    async fn set(&self, key: &str, value: &str, _ttl: Duration) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.insert(key, value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

/// Cache whose every call fails.
pub struct UnreachableCache;

#[async_trait]
impl CacheStore for UnreachableCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::Unavailable("connection refused".into()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".into()))
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".into()))
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Err(CacheError::Unavailable("connection refused".into()))
    }
}

/// Cache that accepts calls and never answers, like a stalled Redis server.
pub struct HangingCache;

#[async_trait]
impl CacheStore for HangingCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        std::future::pending().await
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        std::future::pending().await
    }

    async fn delete(&self, _key: &str) -> Result<(), CacheError> {
        std::future::pending().await
    }

    async fn ping(&self) -> Result<(), CacheError> {
        std::future::pending().await
    }
}

pub fn server_config() -> ServerConfig {
    ServerConfig {
        port: 8080,
        allowed_origins: vec![ALLOWED_ORIGIN.to_string()],
    }
}

pub fn router_with(repo: Arc<dyn ComponentRepository>) -> axum::Router {
    app(AppState::new(ComponentService::new(repo)), &server_config())
}
