//! SQLite implementation of the CategoryRepository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use super::parse_datetime;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    Category, CategoryFilter, Page, PageRequest, ValidationErrors, NAME_EXISTS_MESSAGE,
    NAME_TAKEN_MESSAGE,
};
use crate::domain::ports::CategoryRepository;

const SELECT_COLUMNS: &str = "SELECT id, name, description, created_at, updated_at FROM categories";

#[derive(Clone)]
pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// A concurrent write can slip past the service-level uniqueness check;
/// report it with the message the service would have used.
fn map_write_error(duplicate_message: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |err| {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let mut errors = ValidationErrors::new();
                errors.add("name", duplicate_message);
                return DomainError::ValidationFailed(errors);
            }
        }
        DomainError::from(err)
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn create(&self, name: &str, description: Option<&str>) -> DomainResult<Category> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO categories (name, description, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(description)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(map_write_error(NAME_EXISTS_MESSAGE))?;

        let id = result.last_insert_rowid();
        self.get(id).await?.ok_or(DomainError::CategoryNotFound(id))
    }

    async fn get(&self, id: i64) -> DomainResult<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Category::try_from).transpose()
    }

    async fn update(&self, id: i64, name: &str, description: Option<&str>) -> DomainResult<Category> {
        let result = sqlx::query(
            "UPDATE categories SET name = ?, description = ?, updated_at = ? WHERE id = ?",
        )
        .bind(name)
        .bind(description)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error(NAME_TAKEN_MESSAGE))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CategoryNotFound(id));
        }

        self.get(id).await?.ok_or(DomainError::CategoryNotFound(id))
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CategoryNotFound(id));
        }

        Ok(())
    }

    async fn list(&self, filter: &CategoryFilter, page: PageRequest) -> DomainResult<Page<Category>> {
        if let Some(fragment) = filter.name_fragment() {
            let matching = self.search(Some(fragment)).await?;
            return Ok(page.paginate(&matching));
        }

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
        let rows: Vec<CategoryRow> =
            sqlx::query_as(&format!("{SELECT_COLUMNS} ORDER BY id LIMIT ? OFFSET ?"))
                .bind(i64::from(page.per_page))
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

        Ok(Page {
            items: rows.into_iter().map(Category::try_from).collect::<DomainResult<_>>()?,
            total: u64::try_from(total).unwrap_or_default(),
            per_page: page.per_page,
            current_page: page.page,
        })
    }

    async fn all(&self) -> DomainResult<Vec<Category>> {
        let rows: Vec<CategoryRow> = sqlx::query_as(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Category::try_from).collect()
    }

    // SQLite's LIKE and NOCASE only fold ASCII, so name matching happens here.
    async fn search(&self, name: Option<&str>) -> DomainResult<Vec<Category>> {
        let all = self.all().await?;
        Ok(match name {
            Some(fragment) => all.into_iter().filter(|c| c.name_contains(fragment)).collect(),
            None => all,
        })
    }

    async fn name_exists(&self, name: &str, excluding: Option<i64>) -> DomainResult<bool> {
        Ok(self
            .all()
            .await?
            .iter()
            .any(|c| c.is_named(name) && Some(c.id) != excluding))
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    description: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<CategoryRow> for Category {
    type Error = DomainError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: parse_datetime(&row.created_at)?,
            updated_at: parse_datetime(&row.updated_at)?,
        })
    }
}
