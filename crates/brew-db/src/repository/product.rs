//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Full catalog load (the session filters in memory)
//! - CRUD for the back office
//! - Absolute stock writes from the Stock Committer
//!
//! ## Stock Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  The counter decrements stock in memory first, then pushes the     │
//! │  resulting value:                                                   │
//! │                                                                     │
//! │     UPDATE products SET stock = 7 WHERE id = ?                      │
//! │                                                                     │
//! │  One register, one actor: the in-memory value IS the latest value. │
//! │  The CHECK (stock >= 0) constraint still rejects a negative write. │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use brew_core::Product;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Loads every product, ordered by id (menu order).
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, image_name, price_cents, stock, category
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Loaded products");
        Ok(products)
    }

    /// Inserts a new product and returns it with its store-assigned id.
    ///
    /// The `id` field of the argument is ignored.
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(name = %product.name, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, image_name, price_cents, stock, category)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&product.name)
        .bind(&product.image_name)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.category)
        .execute(&self.pool)
        .await?;

        let mut saved = product.clone();
        saved.id = result.last_insert_rowid();
        Ok(saved)
    }

    /// Updates every field of an existing product.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                image_name = ?3,
                price_cents = ?4,
                stock = ?5,
                category = ?6
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.image_name)
        .bind(product.price_cents)
        .bind(product.stock)
        .bind(product.category)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Writes an absolute stock value.
    pub async fn set_stock(&self, id: i64, stock: i64) -> DbResult<()> {
        debug!(id = id, stock = stock, "Setting stock");

        let result = sqlx::query("UPDATE products SET stock = ?2 WHERE id = ?1")
            .bind(id)
            .bind(stock)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// Past invoices keep their lines; they reference products by name only.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
