//! # Product Repository
//!
//! Catalogue maintenance for products.
//!
//! ## Key Operations
//! - List with an optional case-insensitive name filter
//! - CRUD operations
//!
//! Stock is only ever set outright here (create / full update). Checkout
//! decrements it through [`crate::store::SqliteUnit`].

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::{like_pattern, now_utc};
use kasir_core::{NewProduct, Product, ProductId};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let drinks = repo.list(Some("teh")).await?;
/// let product = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products ordered by id.
    ///
    /// `name` matches anywhere in the product name, ignoring ASCII case.
    /// A blank filter lists everything.
    pub async fn list(&self, name: Option<&str>) -> DbResult<Vec<Product>> {
        let filter = name.map(str::trim).filter(|n| !n.is_empty());

        let products = match filter {
            Some(fragment) => {
                debug!(filter = %fragment, "Listing products by name");
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, name, unit_price, stock_quantity
                    FROM products
                    WHERE name LIKE ?1 ESCAPE '\'
                    ORDER BY id
                    "#,
                )
                .bind(like_pattern(fragment))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(
                    "SELECT id, name, unit_price, stock_quantity FROM products ORDER BY id",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(products)
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, unit_price, stock_quantity FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a product and returns it with its generated id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        let now = now_utc();

        debug!(name = %product.name, "Inserting product");

        let id = sqlx::query(
            r#"
            INSERT INTO products (name, unit_price, stock_quantity, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
        )
        .bind(&product.name)
        .bind(product.unit_price)
        .bind(product.stock_quantity)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Product {
            id,
            name: product.name.clone(),
            unit_price: product.unit_price,
            stock_quantity: product.stock_quantity,
        })
    }

    /// Replaces every field of a product.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - No product with this id
    pub async fn update(&self, id: ProductId, product: &NewProduct) -> DbResult<Product> {
        debug!(id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                unit_price = ?3,
                stock_quantity = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(product.unit_price)
        .bind(product.stock_quantity)
        .bind(now_utc())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(Product {
            id,
            name: product.name.clone(),
            unit_price: product.unit_price,
            stock_quantity: product.stock_quantity,
        })
    }

    /// Deletes a product. Past transaction lines keep their name snapshot.
    pub async fn delete(&self, id: ProductId) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
