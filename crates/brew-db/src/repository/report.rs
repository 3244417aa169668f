//! # Report Repository
//!
//! Read-only projections over committed data. Nothing here writes.
//!
//! ```text
//! daily_sales()       invoices        GROUP BY DATE(created_at)   newest day first
//! top_products(n)     invoice_items   GROUP BY product_name       most units first
//! low_stock(t)        products        WHERE stock < t             lowest stock first
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use brew_core::{DailySale, LowStockItem, TopProduct};

/// Repository for report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Post-discount sales total per calendar day (UTC).
    pub async fn daily_sales(&self) -> DbResult<Vec<DailySale>> {
        let rows = sqlx::query_as::<_, DailySale>(
            r#"
            SELECT DATE(created_at) AS day, SUM(total_cents) AS total_cents
            FROM invoices
            GROUP BY DATE(created_at)
            ORDER BY day DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(days = rows.len(), "Daily sales report");
        Ok(rows)
    }

    /// Units sold per invoice-line name.
    ///
    /// Hot and cold variants are separate names ("Latte (Hot)", "Latte (Cold)").
    pub async fn top_products(&self, limit: u32) -> DbResult<Vec<TopProduct>> {
        let rows = sqlx::query_as::<_, TopProduct>(
            r#"
            SELECT product_name, SUM(quantity) AS units_sold
            FROM invoice_items
            GROUP BY product_name
            ORDER BY units_sold DESC, product_name
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), limit = limit, "Top products report");
        Ok(rows)
    }

    /// Products whose stock is strictly below `threshold`.
    pub async fn low_stock(&self, threshold: i64) -> DbResult<Vec<LowStockItem>> {
        let rows = sqlx::query_as::<_, LowStockItem>(
            r#"
            SELECT name, stock
            FROM products
            WHERE stock < ?1
            ORDER BY stock ASC, name
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), threshold = threshold, "Low stock report");
        Ok(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use brew_core::{Category, InvoiceLine, Product};
    use chrono::{NaiveDate, TimeZone, Utc};

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let invoices = db.invoices();

        let sales = [
            ("ORD00001", Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap(), 500, "Latte (Hot)", 2),
            ("ORD00002", Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap(), 300, "Espresso", 1),
            ("ORD00003", Utc.with_ymd_and_hms(2026, 10, 18, 15, 0, 0).unwrap(), 900, "Latte (Hot)", 3),
            ("ORD00004", Utc.with_ymd_and_hms(2026, 10, 18, 16, 0, 0).unwrap(), 600, "Muffin", 2),
        ];
        for (order_id, at, total, name, qty) in sales {
            let id = invoices.insert_header(order_id, at, total).await.unwrap();
            let line = InvoiceLine {
                product_name: name.to_string(),
                quantity: qty,
                line_price_cents: total,
            };
            invoices.insert_line(id, &line).await.unwrap();
        }

        let products = db.products();
        for (name, stock) in [("Espresso", 20), ("Cheesecake", 2), ("Muffin", 4), ("Scone", 5)] {
            products
                .insert(&Product::new(name, 300, stock, Category::Dessert))
                .await
                .unwrap();
        }

        db
    }

    #[tokio::test]
    async fn test_daily_sales_newest_first() {
        let db = seeded().await;
        let days = db.reports().daily_sales().await.unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert_eq!(days[0].total_cents, 1800);
        assert_eq!(days[1].day, NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        assert_eq!(days[1].total_cents, 500);
    }

    #[tokio::test]
    async fn test_top_products_sums_quantities() {
        let db = seeded().await;
        let top = db.reports().top_products(2).await.unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product_name, "Latte (Hot)");
        assert_eq!(top[0].units_sold, 5);
        assert_eq!(top[1].product_name, "Muffin");
        assert_eq!(top[1].units_sold, 2);
    }

    #[tokio::test]
    async fn test_low_stock_is_strictly_below_threshold() {
        let db = seeded().await;
        let low = db.reports().low_stock(5).await.unwrap();

        let names: Vec<_> = low.iter().map(|i| (i.name.as_str(), i.stock)).collect();
        assert_eq!(names, vec![("Cheesecake", 2), ("Muffin", 4)]);
    }
}
