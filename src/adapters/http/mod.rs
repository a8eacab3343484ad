//! REST boundary for the category store.

pub mod categories_http;
pub mod error;

pub use categories_http::{CategoriesHttpConfig, CategoriesHttpServer};
pub use error::{ApiError, ErrorResponse};
