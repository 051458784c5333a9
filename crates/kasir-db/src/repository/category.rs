//! # Category Repository
//!
//! Database operations for product categories.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::now_utc;
use kasir_core::{Category, CategoryId, NewCategory};

/// Repository for category database operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    /// Creates a new CategoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Lists all categories ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Gets a category by ID.
    pub async fn get_by_id(&self, id: CategoryId) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Inserts a category and returns it with its generated id.
    pub async fn insert(&self, category: &NewCategory) -> DbResult<Category> {
        debug!(name = %category.name, "Inserting category");

        let id = sqlx::query(
            r#"
            INSERT INTO categories (name, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(now_utc())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Category {
            id,
            name: category.name.clone(),
            description: category.description.clone(),
        })
    }

    /// Replaces name and description of a category.
    pub async fn update(&self, id: CategoryId, category: &NewCategory) -> DbResult<Category> {
        let result = sqlx::query(
            r#"
            UPDATE categories SET
                name = ?2,
                description = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(now_utc())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(Category {
            id,
            name: category.name.clone(),
            description: category.description.clone(),
        })
    }

    /// Deletes a category.
    pub async fn delete(&self, id: CategoryId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        Ok(())
    }
}
