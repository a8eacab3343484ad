//! Coursehub - category catalogue with a cache-aside read path
//!
//! Categories live in SQLite; reads are served through a key-value cache
//! (Redis, in-process, or disabled) that mutations invalidate by key.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, validation, errors and port traits
//! - **Service Layer** (`services`): Cache-aside coordination over the ports
//! - **Adapters** (`adapters`): SQLite, cache stores and the HTTP surface
//! - **Infrastructure Layer** (`infrastructure`): Configuration and logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use coursehub::adapters::cache::MemoryCacheStore;
//! use coursehub::adapters::sqlite::{create_migrated_test_pool, SqliteCategoryRepository};
//! use coursehub::{CategoryService, NewCategory};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = create_migrated_test_pool().await?;
//!     let service = CategoryService::new(
//!         Arc::new(SqliteCategoryRepository::new(pool)),
//!         Arc::new(MemoryCacheStore::new()),
//!     );
//!     let created = service.create(NewCategory::named("Science")).await?;
//!     assert_eq!(service.get_by_id(created.id).await?.name, "Science");
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    CacheBackend, CacheConfig, Category, CategoryChanges, CategoryFilter, Config, DatabaseConfig,
    LoggingConfig, NewCategory, Page, PageRequest, SearchCriteria, ServerConfig, ValidationErrors,
};
pub use domain::ports::{CacheStore, CategoryRepository};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CacheKeys, CachePolicy, CategoryService};
