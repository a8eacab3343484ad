//! CLI command implementations.

pub mod category;
pub mod init;
pub mod serve;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::adapters::cache::build_cache_store;
use crate::adapters::sqlite::{initialize_database, SqliteCategoryRepository};
use crate::domain::models::Config;
use crate::services::{CacheKeys, CachePolicy, CategoryService};

/// Open the database and cache named by `config` and wire the service over them.
pub async fn build_service(config: &Config) -> Result<CategoryService<SqliteCategoryRepository>> {
    let pool = initialize_database(&config.database)
        .await
        .with_context(|| format!("Failed to open database at {}", config.database.path))?;
    let cache = build_cache_store(&config.cache)
        .await
        .context("Failed to connect to cache")?;

    Ok(CategoryService::with_policy(
        Arc::new(SqliteCategoryRepository::new(pool)),
        cache,
        CacheKeys::new(config.cache.key_prefix.clone()),
        CachePolicy::from(&config.cache),
    ))
}
