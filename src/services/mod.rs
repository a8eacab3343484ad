//! Service layer: business rules over the domain ports.

pub mod cache_keys;
pub mod category_service;

pub use cache_keys::{CacheKeys, CachePolicy};
pub use category_service::CategoryService;
