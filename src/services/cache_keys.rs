//! Cache key derivation and expiry policy for categories.

use std::time::Duration;

use crate::domain::models::CacheConfig;

/// Deterministic cache keys derived from resource identity only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheKeys {
    prefix: String,
}

impl CacheKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Key holding the full, unfiltered collection.
    pub fn collection(&self) -> String {
        format!("{}categories", self.prefix)
    }

    /// Key holding a single category.
    pub fn item(&self, id: i64) -> String {
        format!("{}category:{id}", self.prefix)
    }
}

/// How long entries live and what a mutation drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub ttl: Duration,
    /// When false, update/delete only drop the collection entry and a
    /// cached item may be served stale until its TTL runs out.
    pub invalidate_items: bool,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            invalidate_items: true,
        }
    }
}

impl From<&CacheConfig> for CachePolicy {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl: Duration::from_secs(config.ttl_secs),
            invalidate_items: config.invalidate_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_without_prefix() {
        let keys = CacheKeys::default();
        assert_eq!(keys.collection(), "categories");
        assert_eq!(keys.item(42), "category:42");
    }

    #[test]
    fn test_keys_with_prefix() {
        let keys = CacheKeys::new("coursehub:");
        assert_eq!(keys.collection(), "coursehub:categories");
        assert_eq!(keys.item(7), "coursehub:category:7");
    }

    #[test]
    fn test_policy_from_config() {
        let config = CacheConfig {
            ttl_secs: 5,
            invalidate_items: false,
            ..CacheConfig::default()
        };
        let policy = CachePolicy::from(&config);
        assert_eq!(policy.ttl, Duration::from_secs(5));
        assert!(!policy.invalidate_items);
    }
}
