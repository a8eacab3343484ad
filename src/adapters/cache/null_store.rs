//! Cache store used when caching is disabled.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::errors::DomainResult;
use crate::domain::ports::CacheStore;

/// Always misses and accepts every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCacheStore;

#[async_trait]
impl CacheStore for NullCacheStore {
    async fn exists(&self, _key: &str) -> DomainResult<bool> {
        Ok(false)
    }

    async fn get(&self, _key: &str) -> DomainResult<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> DomainResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> DomainResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_never_hits() {
        let store = NullCacheStore;
        store.set("k", b"v", Duration::from_secs(60)).await.unwrap();
        assert!(!store.exists("k").await.unwrap());
        assert!(store.get("k").await.unwrap().is_none());
    }
}
