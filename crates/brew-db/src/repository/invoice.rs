//! # Invoice Repository
//!
//! Database operations for invoices and their lines.
//!
//! ## Two-Phase Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. insert_header(order_id, created_at, total)  → invoice id           │
//! │        fails? nothing was written, caller aborts                       │
//! │                                                                         │
//! │  2. insert_line(invoice id, line)   × N, each on its own               │
//! │        one failing does not stop the others                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two phases are deliberately NOT one transaction: a header can end up
//! with fewer lines than the cart had. Rows are never updated afterwards.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use brew_core::{Invoice, InvoiceLine};

/// Invoice header row.
#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: i64,
    order_id: String,
    created_at: DateTime<Utc>,
    total_cents: i64,
}

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Writes an invoice header and returns its id.
    pub async fn insert_header(
        &self,
        order_id: &str,
        created_at: DateTime<Utc>,
        total_cents: i64,
    ) -> DbResult<i64> {
        debug!(order_id = %order_id, total_cents = total_cents, "Inserting invoice");

        let result = sqlx::query(
            r#"
            INSERT INTO invoices (order_id, created_at, total_cents)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(order_id)
        .bind(created_at)
        .bind(total_cents)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Writes one invoice line.
    pub async fn insert_line(&self, invoice_id: i64, line: &InvoiceLine) -> DbResult<()> {
        debug!(
            invoice_id = invoice_id,
            product = %line.product_name,
            quantity = line.quantity,
            "Inserting invoice line"
        );

        sqlx::query(
            r#"
            INSERT INTO invoice_items (invoice_id, product_name, quantity, line_price_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(invoice_id)
        .bind(&line.product_name)
        .bind(line.quantity)
        .bind(line.line_price_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lines of one invoice in insertion order.
    pub async fn get_lines(&self, invoice_id: i64) -> DbResult<Vec<InvoiceLine>> {
        let lines = sqlx::query_as::<_, InvoiceLine>(
            r#"
            SELECT product_name, quantity, line_price_cents
            FROM invoice_items
            WHERE invoice_id = ?1
            ORDER BY id
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Every invoice with its lines, newest first.
    pub async fn list_with_lines(&self) -> DbResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, order_id, created_at, total_cents
            FROM invoices
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut invoices = Vec::with_capacity(rows.len());
        for row in rows {
            let lines = self.get_lines(row.id).await?;
            invoices.push(Invoice {
                id: row.id,
                order_id: row.order_id,
                created_at: row.created_at,
                total_cents: row.total_cents,
                lines,
            });
        }

        debug!(count = invoices.len(), "Loaded invoice history");
        Ok(invoices)
    }

    /// Counts invoices.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
