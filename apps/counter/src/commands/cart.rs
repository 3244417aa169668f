//! # Cart Commands
//!
//! Adding items, cancelling the pending order and reading the cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│ Invoiced │                        │
//! │  │  Cart    │     │          │     │          │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │                        │            complete_order                      │
//! │                   add_item          (order.rs)                          │
//! │                   apply_discount                                        │
//! │                   (discount.rs)                                         │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   cancel_order ──────────────► (back to empty)          │
//! │                                                 stock NOT restored      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::commands::stock::commit_stock;
use crate::error::ApiError;
use crate::state::OrderSession;
use brew_core::{Cart, CartEntry, CoreError, ServeTemperature};
use brew_db::OrderStore;

/// Cart contents and running totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    /// Display lines in insertion order
    pub lines: Vec<String>,
    pub item_count: i64,
    pub subtotal_cents: i64,
    pub discount_bps: u32,
    /// Post-discount total
    pub total_cents: i64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        CartView {
            lines: cart.display_lines(),
            item_count: cart.item_count(),
            subtotal_cents: cart.subtotal().cents(),
            discount_bps: cart.discount().bps(),
            total_cents: cart.current_total().cents(),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart<S>(session: &OrderSession<S>) -> CartView {
    CartView::from(&session.cart)
}

/// Adds `quantity` units of a product to the cart.
///
/// ## Behavior
/// - Repeated additions of one product make repeated entries
/// - The line price is frozen at the moment of adding
/// - Stock is decremented in memory, then committed to the store
///
/// ## Flow
/// ```text
/// add_item(id, qty, temp)
///      │
///      ├── product not in catalog ─────────► NOT_FOUND
///      ├── qty outside 1..=999 ────────────► VALIDATION_ERROR
///      ├── stock < qty ────────────────────► INSUFFICIENT_STOCK
///      │        (cart and stock untouched)
///      ▼
/// stock -= qty, entry appended
///      │
///      ▼
/// commit_stock ── fails ──► PERSIST_FAILED (entry and decrement stay)
///      │
///      ▼
/// CartView
/// ```
pub async fn add_item<S: OrderStore>(
    session: &mut OrderSession<S>,
    product_id: i64,
    quantity: i64,
    temperature: Option<ServeTemperature>,
) -> Result<CartView, ApiError> {
    debug!(
        product_id = product_id,
        quantity = quantity,
        temperature = ?temperature,
        "add_item command"
    );

    let product = session
        .catalog
        .get_mut(product_id)
        .ok_or(CoreError::ProductNotFound(product_id))?;

    let entry = session.cart.add_item(product, quantity, temperature)?;
    let remaining = product.stock;

    info!(
        label = %entry.label,
        quantity = entry.quantity,
        line_price = %entry.line_price(),
        remaining_stock = remaining,
        "Item added to cart"
    );

    commit_stock(&session.store, product_id, remaining).await?;

    Ok(CartView::from(&session.cart))
}

/// Discards the pending order.
///
/// Entries, counters and the active discount are cleared. Stock taken by
/// the discarded entries stays taken, and a discount code already applied
/// stays counted. Returns the discarded entries.
pub fn cancel_order<S>(session: &mut OrderSession<S>) -> Vec<CartEntry> {
    let discarded = session.cart.reset();

    let units: i64 = discarded.iter().map(|e| e.quantity).sum();
    info!(
        entries = discarded.len(),
        units_not_restocked = units,
        "Order cancelled"
    );
    for entry in &discarded {
        debug!(
            product_id = entry.product_id,
            quantity = entry.quantity,
            "Cancelled entry keeps its stock decrement"
        );
    }

    discarded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing::{RecordingStore, Write};

    async fn session() -> OrderSession<RecordingStore> {
        OrderSession::load(RecordingStore::menu()).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_item_decrements_and_commits_stock() {
        let mut session = session().await;

        let view = add_item(&mut session, 1, 3, None).await.unwrap();
        assert_eq!(view.lines, vec!["Espresso x3 - $9.00"]);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal_cents, 900);
        assert_eq!(view.total_cents, 900);

        assert_eq!(session.catalog().get(1).unwrap().stock, 7);
        assert_eq!(
            session.store().writes(),
            vec![Write::SetStock { id: 1, stock: 7 }]
        );
    }

    #[tokio::test]
    async fn test_repeated_additions_stay_separate() {
        let mut session = session().await;

        add_item(&mut session, 2, 1, None).await.unwrap();
        add_item(&mut session, 1, 1, Some(ServeTemperature::Hot))
            .await
            .unwrap();
        let view = add_item(&mut session, 2, 2, None).await.unwrap();

        assert_eq!(
            view.lines,
            vec!["Muffin x1 - $3.00", "Espresso (Hot) x1 - $3.00", "Muffin x2 - $6.00"]
        );
        assert_eq!(view.item_count, 4);
        assert_eq!(session.catalog().get(2).unwrap().stock, 2);
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_everything_untouched() {
        let mut session = session().await;

        let err = add_item(&mut session, 3, 3, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        assert!(session.cart().is_empty());
        assert_eq!(session.catalog().get(3).unwrap().stock, 2);
        assert!(session.store().writes().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_and_bad_quantity() {
        let mut session = session().await;

        let err = add_item(&mut session, 99, 1, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 99");

        let err = add_item(&mut session, 1, 0, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add_item(&mut session, 1, 1000, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(session.store().writes().is_empty());
    }

    #[tokio::test]
    async fn test_stock_persist_failure_keeps_entry() {
        let mut session = session().await;
        session.store().state().fail_stock = true;

        let err = add_item(&mut session, 1, 2, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PersistFailed);

        // In-memory mutation stands, the catalog is ahead of the store
        assert_eq!(session.cart().item_count(), 2);
        assert_eq!(session.catalog().get(1).unwrap().stock, 8);
        assert_eq!(session.store().state().products[0].stock, 10);
    }

    #[tokio::test]
    async fn test_cancel_does_not_restore_stock() {
        let mut session = session().await;

        add_item(&mut session, 3, 2, None).await.unwrap();
        let discarded = cancel_order(&mut session);
        assert_eq!(discarded.len(), 1);
        assert!(get_cart(&session).lines.is_empty());

        assert_eq!(session.catalog().get(3).unwrap().stock, 0);
        let err = add_item(&mut session, 3, 1, None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
    }
}
