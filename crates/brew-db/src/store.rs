//! # Store Traits
//!
//! The persistence operations the order session depends on, as traits so
//! the session can be driven by the SQLite [`Database`] in production and by
//! a recording fake in tests.
//!
//! ## Seams
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderSession<S: OrderStore>                                            │
//! │       │                                                                 │
//! │       ├── OrderStore          what taking an order needs                │
//! │       │     load_products / load_discount_codes                         │
//! │       │     set_product_stock / increment_discount_usage                │
//! │       │     insert_invoice / insert_invoice_line                        │
//! │       │                                                                 │
//! │       └── BackOfficeStore     catalog + code admin, history, reports    │
//! │                                                                         │
//! │  impl OrderStore for Database        (this file)                       │
//! │  impl BackOfficeStore for Database   (this file)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::DbResult;
use crate::pool::Database;
use brew_core::{DailySale, DiscountCode, Invoice, InvoiceLine, LowStockItem, Product, TopProduct};

/// Persistence needed to take and fulfil orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn load_products(&self) -> DbResult<Vec<Product>>;

    async fn load_discount_codes(&self) -> DbResult<Vec<DiscountCode>>;

    /// Writes an absolute stock value for a product.
    async fn set_product_stock(&self, id: i64, stock: i64) -> DbResult<()>;

    async fn increment_discount_usage(&self, id: i64) -> DbResult<()>;

    /// Writes an invoice header and returns the store-assigned id.
    async fn insert_invoice(
        &self,
        order_id: &str,
        created_at: DateTime<Utc>,
        total_cents: i64,
    ) -> DbResult<i64>;

    async fn insert_invoice_line(&self, invoice_id: i64, line: &InvoiceLine) -> DbResult<()>;
}

/// Back-office persistence: catalog and code administration, history and
/// reports.
#[async_trait]
pub trait BackOfficeStore: OrderStore {
    /// Inserts a product; returns it with its id.
    async fn insert_product(&self, product: &Product) -> DbResult<Product>;

    async fn update_product(&self, product: &Product) -> DbResult<()>;

    async fn delete_product(&self, id: i64) -> DbResult<()>;

    /// Inserts a code; returns it with its id.
    async fn insert_discount_code(&self, code: &DiscountCode) -> DbResult<DiscountCode>;

    async fn update_discount_code(&self, code: &DiscountCode) -> DbResult<()>;

    async fn delete_discount_code(&self, id: i64) -> DbResult<()>;

    /// Every invoice with its lines, newest first.
    async fn list_invoices(&self) -> DbResult<Vec<Invoice>>;

    async fn daily_sales(&self) -> DbResult<Vec<DailySale>>;

    async fn top_products(&self, limit: u32) -> DbResult<Vec<TopProduct>>;

    async fn low_stock(&self, threshold: i64) -> DbResult<Vec<LowStockItem>>;
}

// =============================================================================
// SQLite implementation
// =============================================================================

#[async_trait]
impl OrderStore for Database {
    async fn load_products(&self) -> DbResult<Vec<Product>> {
        self.products().list().await
    }

    async fn load_discount_codes(&self) -> DbResult<Vec<DiscountCode>> {
        self.discount_codes().list().await
    }

    async fn set_product_stock(&self, id: i64, stock: i64) -> DbResult<()> {
        self.products().set_stock(id, stock).await
    }

    async fn increment_discount_usage(&self, id: i64) -> DbResult<()> {
        self.discount_codes().increment_usage(id).await
    }

    async fn insert_invoice(
        &self,
        order_id: &str,
        created_at: DateTime<Utc>,
        total_cents: i64,
    ) -> DbResult<i64> {
        self.invoices()
            .insert_header(order_id, created_at, total_cents)
            .await
    }

    async fn insert_invoice_line(&self, invoice_id: i64, line: &InvoiceLine) -> DbResult<()> {
        self.invoices().insert_line(invoice_id, line).await
    }
}

#[async_trait]
impl BackOfficeStore for Database {
    async fn insert_product(&self, product: &Product) -> DbResult<Product> {
        self.products().insert(product).await
    }

    async fn update_product(&self, product: &Product) -> DbResult<()> {
        self.products().update(product).await
    }

    async fn delete_product(&self, id: i64) -> DbResult<()> {
        self.products().delete(id).await
    }

    async fn insert_discount_code(&self, code: &DiscountCode) -> DbResult<DiscountCode> {
        self.discount_codes().insert(code).await
    }

    async fn update_discount_code(&self, code: &DiscountCode) -> DbResult<()> {
        self.discount_codes().update(code).await
    }

    async fn delete_discount_code(&self, id: i64) -> DbResult<()> {
        self.discount_codes().delete(id).await
    }

    async fn list_invoices(&self) -> DbResult<Vec<Invoice>> {
        self.invoices().list_with_lines().await
    }

    async fn daily_sales(&self) -> DbResult<Vec<DailySale>> {
        self.reports().daily_sales().await
    }

    async fn top_products(&self, limit: u32) -> DbResult<Vec<TopProduct>> {
        self.reports().top_products(limit).await
    }

    async fn low_stock(&self, threshold: i64) -> DbResult<Vec<LowStockItem>> {
        self.reports().low_stock(threshold).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use brew_core::{Category, DiscountRate};

    /// Drives the database through the trait only, the way the session does.
    async fn sell_one<S: OrderStore>(store: &S) -> i64 {
        let products = store.load_products().await.unwrap();
        let product = &products[0];
        store
            .set_product_stock(product.id, product.stock - 1)
            .await
            .unwrap();

        let invoice_id = store
            .insert_invoice("TRAIT001", Utc::now(), product.price_cents)
            .await
            .unwrap();
        let line = InvoiceLine {
            product_name: product.name.clone(),
            quantity: 1,
            line_price_cents: product.price_cents,
        };
        store.insert_invoice_line(invoice_id, &line).await.unwrap();
        invoice_id
    }

    #[tokio::test]
    async fn test_database_as_order_store() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.insert_product(&Product::new("Americano", 325, 3, Category::Drink))
            .await
            .unwrap();
        let code = db
            .insert_discount_code(&DiscountCode::new("FIVE", DiscountRate::from_bps(500)))
            .await
            .unwrap();

        sell_one(&db).await;
        db.increment_discount_usage(code.id).await.unwrap();

        assert_eq!(db.load_products().await.unwrap()[0].stock, 2);
        assert_eq!(db.load_discount_codes().await.unwrap()[0].usage_count, 1);

        let history = db.list_invoices().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].lines[0].product_name, "Americano");
        assert_eq!(history[0].total(), history[0].lines_total());
    }
}
