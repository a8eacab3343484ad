//! Categories HTTP Server.
//!
//! REST endpoints over the category service:
//!
//! | Method | Path                        | Success                 |
//! |--------|-----------------------------|-------------------------|
//! | GET    | `/api/categories`           | 200 paginated list      |
//! | POST   | `/api/categories`           | 201 created category    |
//! | GET    | `/api/categories/search`    | 200 matching categories |
//! | GET    | `/api/categories/{id}`      | 200 category            |
//! | PUT    | `/api/categories/{id}`      | 200 updated category    |
//! | DELETE | `/api/categories/{id}`      | 200 confirmation        |

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        OriginalUri, Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use crate::domain::errors::DomainError;
use crate::domain::models::{
    Category, CategoryChanges, CategoryFilter, NewCategory, Page, PageRequest, SearchCriteria,
    ServerConfig, ValidationErrors,
};
use crate::domain::ports::CategoryRepository;
use crate::services::CategoryService;

/// Configuration for the categories HTTP server.
#[derive(Debug, Clone)]
pub struct CategoriesHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to enable CORS.
    pub enable_cors: bool,
    /// Page size when `per_page` is absent.
    pub default_per_page: u32,
    /// Upper bound on `per_page`.
    pub max_per_page: u32,
}

impl Default for CategoriesHttpConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for CategoriesHttpConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            enable_cors: config.enable_cors,
            default_per_page: config.default_per_page,
            max_per_page: config.max_per_page,
        }
    }
}

/// Text attributes of a category payload.
const TEXT_FIELDS: [&str; 2] = ["name", "description"];

const INVALID_BODY_MESSAGE: &str = "The request body must be a valid JSON object.";

/// Query parameters for the listing endpoint.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub name: Option<String>,
}

impl ListQuery {
    /// Parse raw query parameters, collecting one message per bad field.
    ///
    /// Blank `page`/`per_page` values count as absent.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let page = positive_param(&mut errors, params, "page");
        let per_page = positive_param(&mut errors, params, "per_page");
        errors.into_result()?;

        Ok(Self {
            per_page,
            page,
            name: params.get("name").cloned(),
        })
    }
}

fn positive_param(
    errors: &mut ValidationErrors,
    params: &HashMap<String, String>,
    field: &str,
) -> Option<u32> {
    let raw = params.get(field).map(|v| v.trim()).filter(|v| !v.is_empty())?;
    match raw.parse::<i64>() {
        Ok(n) if n >= 1 => Some(u32::try_from(n).unwrap_or(u32::MAX)),
        Ok(_) => {
            errors.add(field, format!("The {field} field must be at least 1."));
            None
        }
        Err(_) => {
            errors.add(field, format!("The {field} field must be an integer."));
            None
        }
    }
}

fn invalid(field: &str, message: impl Into<String>) -> DomainError {
    let mut errors = ValidationErrors::new();
    errors.add(field, message);
    DomainError::ValidationFailed(errors)
}

/// Decode a category payload, reporting type mismatches per field.
fn category_payload<T: DeserializeOwned>(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, DomainError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        invalid("body", INVALID_BODY_MESSAGE)
    })?;
    let Some(fields) = body.as_object() else {
        return Err(invalid("body", INVALID_BODY_MESSAGE));
    };

    let mut errors = ValidationErrors::new();
    for field in TEXT_FIELDS {
        if fields.get(field).is_some_and(|v| !(v.is_string() || v.is_null())) {
            errors.add(field, format!("The {field} field must be a string."));
        }
    }
    errors.into_result()?;

    serde_json::from_value(body).map_err(|e| invalid("body", e.to_string()))
}

/// The `{id}` segment as a category id; anything unparseable names no category.
fn category_id(id: Result<Path<i64>, PathRejection>, path: &str) -> Result<i64, ApiError> {
    id.map(|Path(id)| id).map_err(|_| {
        let raw = path.rsplit('/').next().unwrap_or_default();
        ApiError::new(DomainError::InvalidCategoryId(raw.to_string()), path)
    })
}

/// Pagination metadata returned alongside a page.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub from: Option<u64>,
    pub last_page: u32,
    pub per_page: u32,
    pub to: Option<u64>,
    pub total: u64,
    pub path: String,
}

/// Paginated listing response.
#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub data: Vec<Category>,
    pub meta: PageMeta,
}

impl CollectionResponse {
    fn from_page(page: Page<Category>, path: String) -> Self {
        let meta = PageMeta {
            current_page: page.current_page,
            from: page.from(),
            last_page: page.last_page(),
            per_page: page.per_page,
            to: page.to(),
            total: page.total,
            path,
        };
        Self {
            data: page.items,
            meta,
        }
    }
}

/// Unpaginated search response.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub data: Vec<Category>,
}

/// Delete confirmation.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub status: bool,
    pub message: String,
}

/// Shared state for the categories HTTP server.
struct AppState<R: CategoryRepository> {
    service: CategoryService<R>,
    config: CategoriesHttpConfig,
}

/// Categories HTTP Server.
pub struct CategoriesHttpServer<R: CategoryRepository + 'static> {
    config: CategoriesHttpConfig,
    service: CategoryService<R>,
}

impl<R: CategoryRepository + 'static> CategoriesHttpServer<R> {
    pub fn new(service: CategoryService<R>, config: CategoriesHttpConfig) -> Self {
        Self { config, service }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let state = Arc::new(AppState {
            service: self.service.clone(),
            config: self.config.clone(),
        });

        let app = Router::new()
            .route(
                "/api/categories",
                get(list_categories::<R>).post(create_category::<R>),
            )
            .route("/api/categories/search", get(search_categories::<R>))
            .route(
                "/api/categories/{id}",
                get(show_category::<R>)
                    .put(update_category::<R>)
                    .delete(delete_category::<R>),
            )
            .route("/health", get(health_check))
            .with_state(state);

        if self.config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    fn addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.config.host, self.config.port).parse()
    }

    /// Start the server.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.addr()?;
        let router = self.router();

        tracing::info!("Categories HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;
        Ok(())
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(
        self,
        shutdown: F,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = self.router();

        tracing::info!("Categories HTTP server listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn health_check() -> &'static str {
    "OK"
}

async fn list_categories<R: CategoryRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<CollectionResponse>, ApiError> {
    let path = uri.path().to_string();
    let query = match params {
        Ok(Query(params)) => ListQuery::from_params(&params).map_err(DomainError::from),
        Err(rejection) => Err(invalid("query", rejection.body_text())),
    }
    .map_err(|e| ApiError::new(e, path.as_str()))?;

    let page = PageRequest::from_query(
        query.page,
        query.per_page,
        state.config.default_per_page,
        state.config.max_per_page,
    );
    let filter = CategoryFilter { name: query.name };

    match state.service.get_collection(&filter, page).await {
        Ok(page) => Ok(Json(CollectionResponse::from_page(page, path))),
        Err(e) => Err(ApiError::new(e, path)),
    }
}

async fn create_category<R: CategoryRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let req: NewCategory =
        category_payload(payload).map_err(|e| ApiError::new(e, uri.path()))?;
    state
        .service
        .create(req)
        .await
        .map(|category| (StatusCode::CREATED, Json(category)))
        .map_err(|e| ApiError::new(e, uri.path()))
}

async fn show_category<R: CategoryRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Category>, ApiError> {
    let id = category_id(id, uri.path())?;
    state
        .service
        .get_by_id(id)
        .await
        .map(Json)
        .map_err(|e| ApiError::new(e, uri.path()))
}

async fn update_category<R: CategoryRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Category>, ApiError> {
    let id = category_id(id, uri.path())?;
    let req: CategoryChanges =
        category_payload(payload).map_err(|e| ApiError::new(e, uri.path()))?;
    state
        .service
        .update(id, req)
        .await
        .map(Json)
        .map_err(|e| ApiError::new(e, uri.path()))
}

async fn delete_category<R: CategoryRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    OriginalUri(uri): OriginalUri,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = category_id(id, uri.path())?;
    state
        .service
        .delete(id)
        .await
        .map(|()| {
            Json(DeleteResponse {
                status: true,
                message: "Category deleted successfully.".to_string(),
            })
        })
        .map_err(|e| ApiError::new(e, uri.path()))
}

async fn search_categories<R: CategoryRepository + 'static>(
    State(state): State<Arc<AppState<R>>>,
    OriginalUri(uri): OriginalUri,
    criteria: Result<Query<SearchCriteria>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(criteria) = criteria.map_err(|rejection| {
        ApiError::new(invalid("query", rejection.body_text()), uri.path())
    })?;
    state
        .service
        .search(&criteria)
        .await
        .map(|data| Json(SearchResponse { data }))
        .map_err(|e| ApiError::new(e, uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_list_query_parses_positive_integers() {
        let query =
            ListQuery::from_params(&params(&[("page", "2"), ("per_page", "5"), ("name", "ma")]))
                .unwrap();
        assert_eq!(query.page, Some(2));
        assert_eq!(query.per_page, Some(5));
        assert_eq!(query.name.as_deref(), Some("ma"));

        let blank = ListQuery::from_params(&params(&[("page", " ")])).unwrap();
        assert_eq!(blank, ListQuery::default());
    }

    #[test]
    fn test_list_query_reports_each_bad_field() {
        let errors =
            ListQuery::from_params(&params(&[("page", "0"), ("per_page", "abc")])).unwrap_err();
        assert_eq!(errors.messages("page"), ["The page field must be at least 1."]);
        assert_eq!(errors.messages("per_page"), ["The per_page field must be an integer."]);
    }

    #[test]
    fn test_category_payload_names_mistyped_fields() {
        let payload = Ok(Json(serde_json::json!({"name": 123, "description": ["x"]})));
        let err = category_payload::<NewCategory>(payload).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.messages("name"), ["The name field must be a string."]);
        assert_eq!(errors.messages("description"), ["The description field must be a string."]);
    }

    #[test]
    fn test_category_payload_accepts_nulls() {
        let payload = Ok(Json(serde_json::json!({"name": "Math", "description": null})));
        let draft: NewCategory = category_payload(payload).unwrap();
        assert_eq!(draft.name.as_deref(), Some("Math"));
        assert!(draft.description.is_none());
    }

    #[test]
    fn test_category_payload_rejects_non_objects() {
        let err = category_payload::<NewCategory>(Ok(Json(serde_json::json!([1, 2])))).unwrap_err();
        assert_eq!(
            err.validation_errors().unwrap().messages("body"),
            [INVALID_BODY_MESSAGE]
        );
    }
}
