//! Domain errors for the category store.

use thiserror::Error;

use crate::domain::models::ValidationErrors;

/// Domain-level errors that can occur in the category store.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Category not found: {0}")]
    CategoryNotFound(i64),

    /// An identifier that cannot name any category.
    #[error("Category not found: {0}")]
    InvalidCategoryId(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),

    #[error("Cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CategoryNotFound(_) | Self::InvalidCategoryId(_))
    }

    /// Field-level messages when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::ValidationFailed(errors)
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<redis::RedisError> for DomainError {
    fn from(err: redis::RedisError) -> Self {
        DomainError::CacheUnavailable(err.to_string())
    }
}
