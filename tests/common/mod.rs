//! Common test utilities for integration tests
//!
//! Provides an instrumented in-memory repository, a cache store driven by the
//! tokio clock, a cache store that always fails, and service builders shared
//! across integration test files.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

use coursehub::adapters::cache::MemoryCacheStore;
use coursehub::adapters::sqlite::{create_migrated_test_pool, SqliteCategoryRepository};
use coursehub::{
    CacheKeys, CachePolicy, CacheStore, Category, CategoryFilter, CategoryRepository,
    CategoryService, DomainError, DomainResult, Page, PageRequest,
};

/// Repository backed by a map that counts how often it is read.
///
/// Does not touch the filesystem or sqlx, so it is safe under a paused
/// tokio clock.
#[derive(Default)]
pub struct CountingRepository {
    rows: Mutex<BTreeMap<i64, Category>>,
    next_id: AtomicUsize,
    reads: AtomicUsize,
}

impl CountingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of read calls (get, list, all, search) served so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Change a row without going through the service, as another writer would.
    pub fn rename_behind_cache(&self, id: i64, name: &str) {
        if let Some(row) = self.rows.lock().unwrap().get_mut(&id) {
            row.name = name.to_string();
        }
    }

    /// Drop a row without going through the service.
    pub fn remove_behind_cache(&self, id: i64) {
        self.rows.lock().unwrap().remove(&id);
    }

    fn record_read(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }

    fn matching(&self, name: Option<&str>) -> Vec<Category> {
        self.rows
            .lock()
            .unwrap()
            .values()
            .filter(|c| name.is_none_or(|n| c.name_contains(n)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CategoryRepository for CountingRepository {
    async fn create(&self, name: &str, description: Option<&str>) -> DomainResult<Category> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let now = Utc::now();
        let category = Category {
            id,
            name: name.to_string(),
            description: description.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().insert(id, category.clone());
        Ok(category)
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Category>> {
        self.record_read();
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }

    async fn update(&self, id: i64, name: &str, description: Option<&str>) -> DomainResult<Category> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows.get_mut(&id).ok_or(DomainError::CategoryNotFound(id))?;
        row.name = name.to_string();
        row.description = description.map(str::to_string);
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        self.rows
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::CategoryNotFound(id))
    }

    async fn list(&self, filter: &CategoryFilter, page: PageRequest) -> DomainResult<Page<Category>> {
        self.record_read();
        Ok(page.paginate(&self.matching(filter.name_fragment())))
    }

    async fn all(&self) -> DomainResult<Vec<Category>> {
        self.record_read();
        Ok(self.matching(None))
    }

    async fn search(&self, name: Option<&str>) -> DomainResult<Vec<Category>> {
        self.record_read();
        Ok(self.matching(name))
    }

    async fn name_exists(&self, name: &str, excluding: Option<i64>) -> DomainResult<bool> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .any(|c| c.is_named(name) && Some(c.id) != excluding))
    }
}

/// Cache store that measures expiry on `tokio::time::Instant`, so TTL
/// boundaries can be stepped through on a paused runtime clock.
#[derive(Default)]
pub struct TokioClockCache {
    entries: Mutex<HashMap<String, (Vec<u8>, Instant)>>,
}

impl TokioClockCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn live(&self, key: &str) -> Option<Vec<u8>> {
        let now = Instant::now();
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .filter(|(_, expires_at)| now < *expires_at)
            .map(|(value, _)| value.clone())
    }

    pub fn is_empty(&self) -> bool {
        let now = Instant::now();
        !self
            .entries
            .lock()
            .unwrap()
            .values()
            .any(|(_, expires_at)| now < *expires_at)
    }
}

#[async_trait]
impl CacheStore for TokioClockCache {
    async fn exists(&self, key: &str) -> DomainResult<bool> {
        Ok(self.live(key).is_some())
    }

    async fn get(&self, key: &str) -> DomainResult<Option<Vec<u8>>> {
        Ok(self.live(key))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> DomainResult<()> {
        let expires_at = Instant::now() + ttl;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_vec(), expires_at));
        Ok(())
    }

    async fn delete(&self, key: &str) -> DomainResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Cache store whose backend is always unreachable.
pub struct UnreachableCache;

#[async_trait]
impl CacheStore for UnreachableCache {
    async fn exists(&self, _key: &str) -> DomainResult<bool> {
        Err(DomainError::CacheUnavailable("connection refused".to_string()))
    }

    async fn get(&self, _key: &str) -> DomainResult<Option<Vec<u8>>> {
        Err(DomainError::CacheUnavailable("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> DomainResult<()> {
        Err(DomainError::CacheUnavailable("connection refused".to_string()))
    }

    async fn delete(&self, _key: &str) -> DomainResult<()> {
        Err(DomainError::CacheUnavailable("connection refused".to_string()))
    }
}

/// Service over a counting repository and a tokio-clocked cache.
pub fn counting_service(
    policy: CachePolicy,
) -> (
    CategoryService<CountingRepository>,
    Arc<CountingRepository>,
    Arc<TokioClockCache>,
) {
    let repo = Arc::new(CountingRepository::new());
    let cache = Arc::new(TokioClockCache::new());
    let service = CategoryService::with_policy(
        Arc::clone(&repo),
        Arc::clone(&cache) as Arc<dyn CacheStore>,
        CacheKeys::default(),
        policy,
    );
    (service, repo, cache)
}

/// Service over a migrated in-memory SQLite database and an in-process cache.
pub async fn sqlite_service() -> (CategoryService<SqliteCategoryRepository>, Arc<MemoryCacheStore>) {
    let pool = create_migrated_test_pool()
        .await
        .expect("Failed to create test database");
    let cache = Arc::new(MemoryCacheStore::new());
    let service = CategoryService::new(
        Arc::new(SqliteCategoryRepository::new(pool)),
        Arc::clone(&cache) as Arc<dyn CacheStore>,
    );
    (service, cache)
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
