//! Key-value cache adapters.
//!
//! Provides three `CacheStore` implementations:
//! - [`RedisCacheStore`] - shared Redis instance for multi-node deployments
//! - [`MemoryCacheStore`] - per-process store with per-entry TTL
//! - [`NullCacheStore`] - no-op store for disabled caching

pub mod memory_store;
pub mod null_store;
pub mod redis_store;

pub use memory_store::MemoryCacheStore;
pub use null_store::NullCacheStore;
pub use redis_store::RedisCacheStore;

use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{CacheBackend, CacheConfig};
use crate::domain::ports::CacheStore;

/// Build the cache store selected by configuration.
pub async fn build_cache_store(config: &CacheConfig) -> DomainResult<Arc<dyn CacheStore>> {
    let store: Arc<dyn CacheStore> = match config.backend {
        CacheBackend::Redis => {
            let url = config.url.as_deref().ok_or_else(|| {
                DomainError::CacheUnavailable("redis backend requires cache.url".to_string())
            })?;
            Arc::new(RedisCacheStore::connect(url).await?)
        }
        CacheBackend::Memory => Arc::new(MemoryCacheStore::new()),
        CacheBackend::None => Arc::new(NullCacheStore),
    };
    tracing::info!(backend = ?config.backend, ttl_secs = config.ttl_secs, "cache store ready");
    Ok(store)
}
