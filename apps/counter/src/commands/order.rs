//! # Order Commands
//!
//! Completing the pending order into a persisted invoice, and rendering its
//! receipt.
//!
//! ## Fulfillment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    complete_order                                       │
//! │                                                                         │
//! │  1. Empty cart? ───────────────────────────► EMPTY_CART, no writes     │
//! │  2. Order id (8 hex chars) + timestamp, total = round2(sub × (1-f))    │
//! │  3. insert_invoice ── fails ───────────────► PERSIST_FAILED            │
//! │                                               cart untouched            │
//! │  4. For each cart entry, insert_invoice_line                           │
//! │        each write independent: a failure is logged, collected in       │
//! │        failed_lines, and the next line is still attempted              │
//! │  5. Reset the cart                                                     │
//! │  6. CompletedOrder { invoice, entries, failed_lines }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are persisted straight from the structured cart entries; the
//! `"<label> x<qty> - $<price>"` display line is never parsed back here.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::OrderSession;
use brew_core::{decode_line, CartEntry, CoreError, Invoice, InvoiceLine, Money};
use brew_db::OrderStore;

/// A line whose write failed during completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedLine {
    pub line: InvoiceLine,
    pub reason: String,
}

/// Outcome of a completed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedOrder {
    /// The invoice as persisted (only lines whose write succeeded)
    pub invoice: Invoice,

    /// Cart entries as they were before persistence, for the receipt
    pub entries: Vec<CartEntry>,

    /// Lines the store refused
    pub failed_lines: Vec<FailedLine>,
}

impl CompletedOrder {
    /// Whether every cart entry made it into the store.
    pub fn is_complete(&self) -> bool {
        self.failed_lines.is_empty()
    }

    pub fn total(&self) -> Money {
        self.invoice.total()
    }
}

/// Generates a human-readable order id: 8 upper-case hex characters.
pub fn generate_order_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id.make_ascii_uppercase();
    id
}

/// Invoice timestamp, whole seconds.
fn invoice_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Completes the pending order.
pub async fn complete_order<S: OrderStore>(
    session: &mut OrderSession<S>,
) -> Result<CompletedOrder, ApiError> {
    debug!(entries = session.cart.entries().len(), "complete_order command");

    if session.cart.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let order_id = generate_order_id();
    let created_at = invoice_timestamp();
    let total = session.cart.current_total();

    let invoice_id = session
        .store
        .insert_invoice(&order_id, created_at, total.cents())
        .await
        .map_err(|e| ApiError::persist("write invoice", e))?;

    let mut lines = Vec::with_capacity(session.cart.entries().len());
    let mut failed_lines = Vec::new();

    for entry in session.cart.entries() {
        let line = InvoiceLine::from(entry);
        match session.store.insert_invoice_line(invoice_id, &line).await {
            Ok(()) => lines.push(line),
            Err(err) => {
                warn!(
                    order_id = %order_id,
                    product = %line.product_name,
                    quantity = line.quantity,
                    error = %err,
                    "Invoice line not persisted"
                );
                failed_lines.push(FailedLine {
                    line,
                    reason: err.to_string(),
                });
            }
        }
    }

    let entries = session.cart.reset();

    info!(
        order_id = %order_id,
        invoice_id = invoice_id,
        total = %total,
        lines = lines.len(),
        failed_lines = failed_lines.len(),
        "Order completed"
    );

    Ok(CompletedOrder {
        invoice: Invoice {
            id: invoice_id,
            order_id,
            created_at,
            total_cents: total.cents(),
            lines,
        },
        entries,
        failed_lines,
    })
}

/// Renders the receipt of a completed order from its cart entries as taken.
///
/// Pure formatting; nothing is persisted.
pub fn render_receipt(store_name: &str, order: &CompletedOrder) -> String {
    brew_core::render_receipt(
        store_name,
        &order.invoice.order_id,
        order.invoice.created_at,
        &order.entries,
        order.invoice.total(),
    )
}

/// Reads a printed receipt line such as `"Latte x2 - $5.00"` back into an
/// invoice line.
///
/// Lines that do not have the display shape fail with UNRECOVERABLE_LINE.
pub fn decode_receipt_line(text: &str) -> Result<InvoiceLine, ApiError> {
    debug!(text = %text, "decode_receipt_line command");

    decode_line(text.trim()).map_err(|err| {
        warn!(text = %text, error = %err, "Receipt line not recoverable");
        ApiError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_item;
    use crate::commands::discount::apply_discount;
    use crate::error::ErrorCode;
    use crate::testing::{RecordingStore, Write};

    async fn session() -> OrderSession<RecordingStore> {
        OrderSession::load(RecordingStore::menu()).await.unwrap()
    }

    fn line(name: &str, quantity: i64, cents: i64) -> InvoiceLine {
        InvoiceLine {
            product_name: name.to_string(),
            quantity,
            line_price_cents: cents,
        }
    }

    #[test]
    fn test_order_id_shape() {
        let id = generate_order_id();
        assert_eq!(id.len(), 8);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        assert_ne!(id, generate_order_id());
    }

    #[test]
    fn test_decode_receipt_line() {
        assert_eq!(
            decode_receipt_line("  Muffin x2 - $6.00").unwrap(),
            line("Muffin", 2, 600)
        );

        let err = decode_receipt_line("Muffin x2 - ").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnrecoverableLine);

        let err = decode_receipt_line("Total: $8.10").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnrecoverableLine);
    }

    #[tokio::test]
    async fn test_empty_cart_writes_nothing() {
        let mut session = session().await;

        let err = complete_order(&mut session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert!(session.store().writes().is_empty());
    }

    #[tokio::test]
    async fn test_complete_with_discount() {
        let mut session = session().await;
        add_item(&mut session, 1, 1, None).await.unwrap();
        add_item(&mut session, 2, 2, None).await.unwrap();
        apply_discount(&mut session, "WELCOME10").await.unwrap();

        let order = complete_order(&mut session).await.unwrap();

        assert!(order.is_complete());
        assert_eq!(order.invoice.total_cents, 810);
        assert_eq!(order.invoice.order_id.len(), 8);
        assert_eq!(
            order.invoice.lines,
            vec![line("Espresso", 1, 300), line("Muffin", 2, 600)]
        );
        assert_eq!(order.invoice.lines_total().cents(), 900);
        assert_eq!(order.entries.len(), 2);
        assert!(session.cart().is_empty());
        assert!(session.cart().discount().is_zero());

        let writes = session.store().writes();
        assert!(writes.contains(&Write::InsertInvoice {
            order_id: order.invoice.order_id.clone(),
            total_cents: 810,
        }));
        assert!(writes.contains(&Write::InsertLine {
            invoice_id: order.invoice.id,
            line: line("Muffin", 2, 600),
        }));
    }

    #[tokio::test]
    async fn test_header_failure_leaves_cart_untouched() {
        let mut session = session().await;
        add_item(&mut session, 1, 2, None).await.unwrap();
        session.store().state().fail_invoice = true;

        let err = complete_order(&mut session).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PersistFailed);

        assert_eq!(session.cart().item_count(), 2);
        assert!(!session
            .store()
            .writes()
            .iter()
            .any(|w| matches!(w, Write::InsertLine { .. })));
    }

    #[tokio::test]
    async fn test_line_failure_does_not_stop_other_lines() {
        let mut session = session().await;
        add_item(&mut session, 1, 1, None).await.unwrap();
        add_item(&mut session, 2, 1, None).await.unwrap();
        add_item(&mut session, 3, 1, None).await.unwrap();
        session
            .store()
            .state()
            .fail_lines_named
            .push("Muffin".to_string());

        let order = complete_order(&mut session).await.unwrap();

        assert!(!order.is_complete());
        assert_eq!(order.failed_lines.len(), 1);
        assert_eq!(order.failed_lines[0].line, line("Muffin", 1, 300));
        assert_eq!(
            order.invoice.lines,
            vec![line("Espresso", 1, 300), line("Latte", 1, 250)]
        );
        // Total reflects the cart, not the persisted lines
        assert_eq!(order.invoice.total_cents, 850);
        assert_eq!(order.entries.len(), 3);
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_receipt_uses_cart_entries() {
        let mut session = session().await;
        add_item(&mut session, 3, 2, None).await.unwrap();
        session
            .store()
            .state()
            .fail_lines_named
            .push("Latte".to_string());

        let order = complete_order(&mut session).await.unwrap();
        assert!(order.invoice.lines.is_empty());

        let receipt = render_receipt("Corner Beans", &order);
        assert!(receipt.starts_with("**** Corner Beans Receipt ****\n"));
        assert!(receipt.contains(&format!("Order ID: {}\n", order.invoice.order_id)));
        assert!(receipt.contains("  Latte x2 - $5.00\n"));
        assert!(receipt.contains("Total: $5.00\n"));
        assert!(receipt.ends_with("**** Thank you! ****\n"));
    }
}
