//! Key-value cache port.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::errors::DomainResult;

/// Byte-oriented key-value store with per-entry expiry.
///
/// Errors surface as `DomainError::CacheUnavailable`; callers decide
/// whether to fail or fall back.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Whether an unexpired entry exists under the key.
    async fn exists(&self, key: &str) -> DomainResult<bool>;

    /// Value stored under the key, `None` when absent or expired.
    async fn get(&self, key: &str) -> DomainResult<Option<Vec<u8>>>;

    /// Store a value that expires after `ttl`.
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> DomainResult<()>;

    /// Remove the entry; removing a missing key is not an error.
    async fn delete(&self, key: &str) -> DomainResult<()>;
}
