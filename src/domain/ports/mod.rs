//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters must implement:
//! - CategoryRepository: relational persistence for categories
//! - CacheStore: key-value cache with per-entry TTL

pub mod cache_store;
pub mod category_repository;

pub use cache_store::CacheStore;
pub use category_repository::CategoryRepository;
