//! Category repository port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Category, CategoryFilter, Page, PageRequest};

/// Repository interface for Category persistence.
///
/// Attribute validation happens in the service; implementations only
/// enforce what the schema enforces.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category and return it with its assigned id.
    async fn create(&self, name: &str, description: Option<&str>) -> DomainResult<Category>;

    /// Get a category by ID.
    async fn get(&self, id: i64) -> DomainResult<Option<Category>>;

    /// Replace the attributes of an existing category.
    ///
    /// Fails with `CategoryNotFound` when no row has this id.
    async fn update(&self, id: i64, name: &str, description: Option<&str>) -> DomainResult<Category>;

    /// Delete a category by ID.
    ///
    /// Fails with `CategoryNotFound` when no row has this id.
    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// One page of categories matching the filter, ordered by id.
    async fn list(&self, filter: &CategoryFilter, page: PageRequest) -> DomainResult<Page<Category>>;

    /// Every category, ordered by id.
    async fn all(&self) -> DomainResult<Vec<Category>>;

    /// Categories whose name contains the fragment, ordered by id.
    /// `None` matches everything.
    async fn search(&self, name: Option<&str>) -> DomainResult<Vec<Category>>;

    /// Whether another category already uses this name.
    async fn name_exists(&self, name: &str, excluding: Option<i64>) -> DomainResult<bool>;
}
