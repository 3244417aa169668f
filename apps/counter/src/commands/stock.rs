//! # Stock Committer
//!
//! Forwards a new absolute stock value to the store. The in-memory product
//! already carries the new value when this runs, and a failure here does not
//! put it back: the catalog is then ahead of the store until the next reload.

use tracing::debug;

use crate::error::ApiError;
use brew_db::OrderStore;

/// Persists `stock` as the product's stock.
pub async fn commit_stock<S: OrderStore>(
    store: &S,
    product_id: i64,
    stock: i64,
) -> Result<(), ApiError> {
    debug!(product_id = product_id, stock = stock, "commit_stock");

    store
        .set_product_stock(product_id, stock)
        .await
        .map_err(|e| ApiError::persist("commit stock", e))
}
