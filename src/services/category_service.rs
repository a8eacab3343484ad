//! Category service: cache-aside reads over the category repository.
//!
//! Reads consult the cache first and populate it on a miss. Every
//! mutation drops the collection entry; update and delete also drop the
//! item entry unless the policy says otherwise. Entries are keyed only by
//! resource identity, so invalidation never depends on request state.
//!
//! The collection entry always holds the full, unfiltered collection.
//! Unfiltered listings are paginated from that snapshot; filtered listings
//! and searches go straight to the repository.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::validation::require_text;
use crate::domain::models::{
    Category, CategoryChanges, CategoryFilter, NewCategory, Page, PageRequest, SearchCriteria,
    ValidationErrors, MAX_NAME_LENGTH, NAME_EXISTS_MESSAGE, NAME_TAKEN_MESSAGE,
};
use crate::domain::ports::{CacheStore, CategoryRepository};
use crate::services::cache_keys::{CacheKeys, CachePolicy};

pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
    cache: Arc<dyn CacheStore>,
    keys: CacheKeys,
    policy: CachePolicy,
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
            keys: self.keys.clone(),
            policy: self.policy,
        }
    }
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheStore>) -> Self {
        Self::with_policy(repository, cache, CacheKeys::default(), CachePolicy::default())
    }

    pub fn with_policy(
        repository: Arc<R>,
        cache: Arc<dyn CacheStore>,
        keys: CacheKeys,
        policy: CachePolicy,
    ) -> Self {
        Self {
            repository,
            cache,
            keys,
            policy,
        }
    }

    pub fn keys(&self) -> &CacheKeys {
        &self.keys
    }

    /// List categories, one page at a time.
    pub async fn get_collection(
        &self,
        filter: &CategoryFilter,
        page: PageRequest,
    ) -> DomainResult<Page<Category>> {
        if !filter.is_empty() {
            return self.repository.list(filter, page).await;
        }

        let key = self.keys.collection();
        if let Some(snapshot) = self.read_cached::<Vec<Category>>(&key).await? {
            return Ok(page.paginate(&snapshot));
        }

        let snapshot = self.repository.all().await?;
        self.write_cached(&key, &snapshot).await?;
        Ok(page.paginate(&snapshot))
    }

    /// Fetch one category.
    ///
    /// A cache hit is returned without touching the repository, so a
    /// category removed out-of-band stays visible until its entry expires.
    pub async fn get_by_id(&self, id: i64) -> DomainResult<Category> {
        let key = self.keys.item(id);
        if let Some(category) = self.read_cached::<Category>(&key).await? {
            return Ok(category);
        }

        let category = self
            .repository
            .get(id)
            .await?
            .ok_or(DomainError::CategoryNotFound(id))?;
        self.write_cached(&key, &category).await?;
        Ok(category)
    }

    /// Create a category with a unique name.
    pub async fn create(&self, draft: NewCategory) -> DomainResult<Category> {
        let mut errors = ValidationErrors::new();
        let name = draft.name.as_deref().map(str::trim);
        if require_text(&mut errors, "name", name, MAX_NAME_LENGTH) {
            if let Some(name) = name {
                if self.repository.name_exists(name, None).await? {
                    errors.add("name", NAME_EXISTS_MESSAGE);
                }
            }
        }
        errors.into_result()?;

        let name = name.unwrap_or_default();
        let category = self
            .repository
            .create(name, draft.description.as_deref().map(str::trim))
            .await?;
        tracing::info!(id = category.id, name = %category.name, "category created");

        self.invalidate(&[self.keys.collection()]).await?;
        Ok(category)
    }

    /// Replace a category's name and description.
    pub async fn update(&self, id: i64, changes: CategoryChanges) -> DomainResult<Category> {
        if self.repository.get(id).await?.is_none() {
            return Err(DomainError::CategoryNotFound(id));
        }

        let mut errors = ValidationErrors::new();
        let name = changes.name.as_deref().map(str::trim);
        if require_text(&mut errors, "name", name, MAX_NAME_LENGTH) {
            if let Some(name) = name {
                if self.repository.name_exists(name, Some(id)).await? {
                    errors.add("name", NAME_TAKEN_MESSAGE);
                }
            }
        }
        let description = changes.description.as_deref().map(str::trim);
        if description.is_none_or(str::is_empty) {
            errors.add("description", "The description field is required.");
        }
        errors.into_result()?;

        let category = self
            .repository
            .update(id, name.unwrap_or_default(), description)
            .await?;
        tracing::info!(id, name = %category.name, "category updated");

        self.invalidate(&self.mutation_keys(id)).await?;
        Ok(category)
    }

    /// Delete a category.
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.repository.delete(id).await?;
        tracing::info!(id, "category deleted");

        self.invalidate(&self.mutation_keys(id)).await
    }

    /// Search by name directly against the repository.
    pub async fn search(&self, criteria: &SearchCriteria) -> DomainResult<Vec<Category>> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &criteria.name {
            if name.chars().count() > MAX_NAME_LENGTH {
                errors.add(
                    "name",
                    format!("The name field must not be greater than {MAX_NAME_LENGTH} characters."),
                );
            }
        }
        errors.into_result()?;

        let fragment = criteria.name.as_deref().map(str::trim).filter(|s| !s.is_empty());
        self.repository.search(fragment).await
    }

    fn mutation_keys(&self, id: i64) -> Vec<String> {
        let mut keys = vec![self.keys.collection()];
        if self.policy.invalidate_items {
            keys.push(self.keys.item(id));
        }
        keys
    }

    async fn invalidate(&self, keys: &[String]) -> DomainResult<()> {
        for key in keys {
            self.cache.delete(key).await?;
            tracing::debug!(key = %key, "cache invalidated");
        }
        Ok(())
    }

    /// Cached value under `key`, `None` on a miss.
    ///
    /// An entry that no longer deserializes is treated as a miss and will
    /// be overwritten by the caller.
    async fn read_cached<T: DeserializeOwned>(&self, key: &str) -> DomainResult<Option<T>> {
        if !self.cache.exists(key).await? {
            tracing::debug!(key = %key, "cache miss");
            return Ok(None);
        }

        let Some(bytes) = self.cache.get(key).await? else {
            // Expired between the two calls.
            tracing::debug!(key = %key, "cache miss");
            return Ok(None);
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                tracing::debug!(key = %key, "cache hit");
                Ok(Some(value))
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "discarding unreadable cache entry");
                Ok(None)
            }
        }
    }

    async fn write_cached<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> DomainResult<()> {
        let bytes = serde_json::to_vec(value)?;
        self.cache.set(key, &bytes, self.policy.ttl).await?;
        tracing::debug!(key = %key, ttl_secs = self.policy.ttl.as_secs(), "cache populated");
        Ok(())
    }
}
