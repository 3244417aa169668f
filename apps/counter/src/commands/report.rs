//! # Report Commands
//!
//! Read-only projections over persisted invoices and the product table.
//! Nothing here touches the cart or the cached lists.

use tracing::debug;

use crate::error::ApiError;
use crate::state::OrderSession;
use brew_core::{DailySale, Invoice, LowStockItem, TopProduct};
use brew_db::BackOfficeStore;

/// Every invoice with its persisted lines, newest first.
pub async fn invoice_history<S: BackOfficeStore>(
    session: &OrderSession<S>,
) -> Result<Vec<Invoice>, ApiError> {
    debug!("invoice_history command");
    Ok(session.store.list_invoices().await?)
}

/// Sales total per calendar day (UTC), newest day first.
pub async fn daily_sales<S: BackOfficeStore>(
    session: &OrderSession<S>,
) -> Result<Vec<DailySale>, ApiError> {
    debug!("daily_sales command");
    Ok(session.store.daily_sales().await?)
}

/// Best sellers by units sold, at most `limit` rows.
pub async fn top_products<S: BackOfficeStore>(
    session: &OrderSession<S>,
    limit: u32,
) -> Result<Vec<TopProduct>, ApiError> {
    debug!(limit = limit, "top_products command");
    Ok(session.store.top_products(limit).await?)
}

/// Products whose stock is strictly below `threshold`, lowest first.
pub async fn low_stock<S: BackOfficeStore>(
    session: &OrderSession<S>,
    threshold: i64,
) -> Result<Vec<LowStockItem>, ApiError> {
    debug!(threshold = threshold, "low_stock command");
    Ok(session.store.low_stock(threshold).await?)
}
