//! Read-through cache behaviour of ComponentService.

mod common;

use common::{component, FailingRepository, HangingCache, InMemoryCache, InMemoryRepository, UnreachableCache};
use parts_catalog::cache::keys;
use parts_catalog::service::CacheStatus;
use parts_catalog::{AppError, Category, Component, ComponentService};
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_secs(300);

fn fixture() -> Vec<Component> {
    vec![
        component(1, Category::Cpu, "Intel"),
        component(2, Category::Cpu, "AMD"),
        component(3, Category::Memory, "Corsair"),
    ]
}

#[tokio::test]
async fn second_read_is_served_from_cache() {
    let repo = Arc::new(InMemoryRepository::new(fixture()));
    let cache = Arc::new(InMemoryCache::default());
    let service = ComponentService::new(repo.clone()).with_cache(cache.clone(), TTL);

    let first = service.get_by_category(Category::Cpu, "").await.unwrap();
    let second = service.get_by_category(Category::Cpu, "1").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(repo.calls(), vec!["get_by_category:cpu:"]);
    assert!(cache.get_raw(&keys::by_category(Category::Cpu, "")).is_some());
}

#[tokio::test]
async fn cached_payload_round_trips_specs() {
    let repo = Arc::new(InMemoryRepository::new(fixture()));
    let cache = Arc::new(InMemoryCache::default());
    let service = ComponentService::new(repo.clone()).with_cache(cache.clone(), TTL);

    let stored = service.get_by_id(3).await.unwrap();
    let cached = service.get_by_id(3).await.unwrap();
    assert_eq!(stored.specs, cached.specs);
    assert_eq!(stored, cached);
    assert_eq!(repo.calls(), vec!["get_by_id:3"]);
}

#[tokio::test]
async fn not_found_is_never_cached() {
    let repo = Arc::new(InMemoryRepository::new(fixture()));
    let cache = Arc::new(InMemoryCache::default());
    let service = ComponentService::new(repo.clone()).with_cache(cache.clone(), TTL);

    for _ in 0..2 {
        let err = service.get_by_id(404).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
    assert_eq!(repo.calls().len(), 2);
    assert_eq!(cache.len(), 0);
}

#[tokio::test]
async fn store_errors_are_never_cached() {
    let cache = Arc::new(InMemoryCache::default());
    let service = ComponentService::new(Arc::new(FailingRepository)).with_cache(cache.clone(), TTL);
    assert!(service.get_all("").await.is_err());
    assert_eq!(cache.set_count(), 0);
}

#[tokio::test]
async fn undecodable_entry_is_dropped_and_reloaded() {
    let repo = Arc::new(InMemoryRepository::new(fixture()));
    let cache = Arc::new(InMemoryCache::default());
    cache.insert(&keys::all("1"), "{not json");
    let service = ComponentService::new(repo.clone()).with_cache(cache.clone(), TTL);

    let rows = service.get_all("").await.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(repo.calls(), vec!["get_all:"]);
    assert_eq!(cache.deletes.load(std::sync::atomic::Ordering::SeqCst), 1);
    let refreshed: Vec<Component> = serde_json::from_str(&cache.get_raw(&keys::all("1")).unwrap()).unwrap();
    assert_eq!(refreshed, rows);
}

#[tokio::test]
async fn unreachable_cache_falls_through_to_store() {
    let repo = Arc::new(InMemoryRepository::new(fixture()));
    let service = ComponentService::new(repo.clone()).with_cache(Arc::new(UnreachableCache), TTL);

    let rows = service
        .get_by_category_and_brand(Category::Cpu, "AMD", "")
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 2);

    let readiness = service.readiness().await;
    assert!(readiness.database);
    assert_eq!(readiness.cache, CacheStatus::Unavailable);
    assert!(!readiness.is_ready());
}

#[tokio::test]
async fn brand_casing_produces_distinct_entries() {
    let repo = Arc::new(InMemoryRepository::new(fixture()));
    let cache = Arc::new(InMemoryCache::default());
    let service = ComponentService::new(repo.clone()).with_cache(cache.clone(), TTL);

    assert_eq!(service.get_by_category_and_brand(Category::Cpu, "Intel", "").await.unwrap().len(), 1);
    assert!(service.get_by_category_and_brand(Category::Cpu, "INTEL", "").await.unwrap().is_empty());
    assert_eq!(cache.len(), 2);
}

#[tokio::test]
async fn without_cache_every_read_hits_the_store() {
    let repo = Arc::new(InMemoryRepository::new(fixture()));
    let service = ComponentService::new(repo.clone());
    service.get_all("").await.unwrap();
    service.get_all("").await.unwrap();
    assert_eq!(repo.calls().len(), 2);
    assert_eq!(service.readiness().await.cache, CacheStatus::Disabled);
}

#[tokio::test]
async fn stalled_cache_times_out_and_falls_through_to_store() {
    let repo = Arc::new(InMemoryRepository::new(fixture()));
    let service = ComponentService::new(repo.clone())
        .with_cache(Arc::new(HangingCache), TTL)
        .with_cache_timeout(Duration::from_millis(50));

    let rows = tokio::time::timeout(Duration::from_secs(2), service.get_by_category(Category::Cpu, ""))
        .await
        .expect("read must not wait on a stalled cache")
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(repo.calls(), vec!["get_by_category:cpu:"]);

    let readiness = tokio::time::timeout(Duration::from_secs(2), service.readiness())
        .await
        .expect("readiness must not wait on a stalled cache");
    assert_eq!(readiness.cache, CacheStatus::Unavailable);
}
