pub mod category;
pub mod config;
pub mod page;
pub mod validation;

pub use category::{
    Category, CategoryChanges, CategoryFilter, NewCategory, SearchCriteria, NAME_EXISTS_MESSAGE,
    NAME_TAKEN_MESSAGE,
};
pub use config::{CacheBackend, CacheConfig, Config, DatabaseConfig, LoggingConfig, ServerConfig};
pub use page::{Page, PageRequest, DEFAULT_PER_PAGE};
pub use validation::{ValidationErrors, MAX_NAME_LENGTH};
