//! # Discount Commands
//!
//! ## Usage Policy
//! A code is spent the moment it is accepted: its usage counter goes up by
//! one and is persisted right away, whether the order is later completed or
//! cancelled. Applying a second code replaces the first; discounts never
//! stack.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::state::OrderSession;
use brew_db::OrderStore;

/// Result of an accepted discount code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    /// The code as stored (not as typed)
    pub code: String,
    pub discount_bps: u32,
    pub subtotal_cents: i64,
    pub total_cents: i64,
}

/// Applies a discount code to the pending order.
///
/// ## Flow
/// ```text
/// apply_discount("welcome10")
///      │
///      ├── unknown / inactive ──────────► DISCOUNT_REJECTED (nothing changes)
///      ▼
/// cart discount := code rate
/// cached usage_count += 1
///      │
///      ▼
/// increment_discount_usage ── fails ──► PERSIST_FAILED (discount stays)
///      │
///      ▼
/// reload code list (failure only logged)
/// ```
pub async fn apply_discount<S: OrderStore>(
    session: &mut OrderSession<S>,
    entered: &str,
) -> Result<AppliedDiscount, ApiError> {
    debug!(entered = %entered, "apply_discount command");

    let code = session.discounts.accept(entered)?.clone();

    session.cart.apply_discount(code.rate());
    session.discounts.record_use(code.id);

    info!(
        code = %code.code,
        rate = %code.rate(),
        total = %session.cart.current_total(),
        "Discount applied"
    );

    session
        .store
        .increment_discount_usage(code.id)
        .await
        .map_err(|e| ApiError::persist("record discount usage", e))?;

    if let Err(err) = session.reload_discounts().await {
        warn!(error = %err, "Discount codes not reloaded after use");
    }

    Ok(AppliedDiscount {
        code: code.code,
        discount_bps: code.discount_bps,
        subtotal_cents: session.cart.subtotal().cents(),
        total_cents: session.cart.current_total().cents(),
    })
}
