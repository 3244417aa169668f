//! In-memory [`OrderStore`] that records every write and can be told to
//! fail specific calls.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard};

use brew_core::{Category, DiscountCode, DiscountRate, InvoiceLine, Product};
use brew_db::{DbError, DbResult, OrderStore};

/// A write the session pushed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    SetStock { id: i64, stock: i64 },
    IncrementUsage { id: i64 },
    InsertInvoice { order_id: String, total_cents: i64 },
    InsertLine { invoice_id: i64, line: InvoiceLine },
}

#[derive(Debug, Default)]
pub struct StoreState {
    pub products: Vec<Product>,
    pub codes: Vec<DiscountCode>,
    pub writes: Vec<Write>,
    pub fail_loads: bool,
    pub fail_stock: bool,
    pub fail_usage: bool,
    pub fail_invoice: bool,
    /// Line writes for these product names fail.
    pub fail_lines_named: Vec<String>,
    next_invoice_id: i64,
}

#[derive(Debug, Default)]
pub struct RecordingStore {
    state: Mutex<StoreState>,
}

fn injected() -> DbError {
    DbError::QueryFailed("injected failure".to_string())
}

impl RecordingStore {
    /// Espresso (id 1, $3.00, 10), Muffin (id 2, $3.00, 5), Latte (id 3,
    /// $2.50, 2); codes WELCOME10 (10%), STAFF50 (50%), OLD25 (inactive).
    pub fn menu() -> Self {
        let mut products = vec![
            Product::new("Espresso", 300, 10, Category::Drink),
            Product::new("Muffin", 300, 5, Category::Dessert),
            Product::new("Latte", 250, 2, Category::Drink),
        ];
        for (i, p) in products.iter_mut().enumerate() {
            p.id = i as i64 + 1;
        }

        let mut codes = vec![
            DiscountCode::new("WELCOME10", DiscountRate::from_bps(1000)),
            DiscountCode::new("STAFF50", DiscountRate::from_bps(5000)),
            DiscountCode::new("OLD25", DiscountRate::from_bps(2500)),
        ];
        for (i, c) in codes.iter_mut().enumerate() {
            c.id = i as i64 + 1;
        }
        codes[2].active = false;

        RecordingStore {
            state: Mutex::new(StoreState {
                products,
                codes,
                ..StoreState::default()
            }),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.state().writes.clone()
    }
}

#[async_trait]
impl OrderStore for RecordingStore {
    async fn load_products(&self) -> DbResult<Vec<Product>> {
        let state = self.state();
        if state.fail_loads {
            return Err(injected());
        }
        Ok(state.products.clone())
    }

    async fn load_discount_codes(&self) -> DbResult<Vec<DiscountCode>> {
        let state = self.state();
        if state.fail_loads {
            return Err(injected());
        }
        Ok(state.codes.clone())
    }

    async fn set_product_stock(&self, id: i64, stock: i64) -> DbResult<()> {
        let mut state = self.state();
        if state.fail_stock {
            return Err(injected());
        }
        state.writes.push(Write::SetStock { id, stock });
        if let Some(p) = state.products.iter_mut().find(|p| p.id == id) {
            p.stock = stock;
        }
        Ok(())
    }

    async fn increment_discount_usage(&self, id: i64) -> DbResult<()> {
        let mut state = self.state();
        if state.fail_usage {
            return Err(injected());
        }
        state.writes.push(Write::IncrementUsage { id });
        if let Some(c) = state.codes.iter_mut().find(|c| c.id == id) {
            c.usage_count += 1;
        }
        Ok(())
    }

    async fn insert_invoice(
        &self,
        order_id: &str,
        _created_at: DateTime<Utc>,
        total_cents: i64,
    ) -> DbResult<i64> {
        let mut state = self.state();
        if state.fail_invoice {
            return Err(injected());
        }
        state.writes.push(Write::InsertInvoice {
            order_id: order_id.to_string(),
            total_cents,
        });
        state.next_invoice_id += 1;
        Ok(state.next_invoice_id)
    }

    async fn insert_invoice_line(&self, invoice_id: i64, line: &InvoiceLine) -> DbResult<()> {
        let mut state = self.state();
        if state.fail_lines_named.contains(&line.product_name) {
            return Err(injected());
        }
        state.writes.push(Write::InsertLine {
            invoice_id,
            line: line.clone(),
        });
        Ok(())
    }
}
