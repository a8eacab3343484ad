//! Structured JSON error bodies for the REST boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::models::ValidationErrors;

pub const CODE_INTERNAL: &str = "error-0001";
pub const CODE_VALIDATION: &str = "error-0003";
pub const CODE_NOT_FOUND: &str = "error-0004";

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
    pub path: String,
}

/// A domain failure tied to the request path it occurred on.
#[derive(Debug)]
pub struct ApiError {
    pub error: DomainError,
    pub path: String,
}

impl ApiError {
    pub fn new(error: DomainError, path: impl Into<String>) -> Self {
        Self {
            error,
            path: path.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = match self.error {
            DomainError::ValidationFailed(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                CODE_VALIDATION,
                "Validation error".to_string(),
                Some(errors),
            ),
            DomainError::CategoryNotFound(_) | DomainError::InvalidCategoryId(_) => (
                StatusCode::NOT_FOUND,
                CODE_NOT_FOUND,
                "Category not found".to_string(),
                None,
            ),
            other => {
                tracing::error!(error = %other, path = %self.path, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CODE_INTERNAL,
                    "Server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: code,
            timestamp: Utc::now(),
            status: status.as_u16(),
            message,
            errors,
            path: self.path,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_body_shape() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "The category name already exists.");
        let response = ApiError::new(DomainError::ValidationFailed(errors), "/api/categories").into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert_eq!(json["error"], "error-0003");
        assert_eq!(json["status"], 422);
        assert_eq!(json["message"], "Validation error");
        assert_eq!(json["errors"]["name"][0], "The category name already exists.");
        assert_eq!(json["path"], "/api/categories");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_unparseable_id_is_not_found() {
        let response = ApiError::new(
            DomainError::InvalidCategoryId("abc".to_string()),
            "/api/categories/abc",
        )
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "error-0004");
        assert_eq!(json["message"], "Category not found");
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let response = ApiError::new(
            DomainError::CacheUnavailable("connection refused".to_string()),
            "/api/categories/1",
        )
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], "error-0001");
        assert!(json.get("errors").is_none());
        assert!(!json.to_string().contains("connection refused"));
    }
}
