//! # Receipt Rendering
//!
//! Plain-text receipt for a completed order. Pure formatting: it takes the
//! cart entries as they were before persistence, so whatever happened to
//! individual line writes does not change what the customer sees.
//!
//! ```text
//! **** Coffee Order Receipt ****
//! Order ID: 3F9A12C0
//! Date/Time: 2026-10-19 08:15:02
//! Items:
//!   Espresso x1 - $3.00
//!   Muffin x2 - $6.00
//!
//! Total: $8.10
//! **** Thank you! ****
//! ```

use chrono::{DateTime, Utc};
use std::fmt::Write;

use crate::codec::encode_line;
use crate::money::Money;
use crate::types::CartEntry;

/// Timestamp format printed on receipts.
pub const RECEIPT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the receipt text.
pub fn render_receipt(
    store_name: &str,
    order_id: &str,
    created_at: DateTime<Utc>,
    entries: &[CartEntry],
    total: Money,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(out, "**** {} Receipt ****", store_name);
    let _ = writeln!(out, "Order ID: {}", order_id);
    let _ = writeln!(out, "Date/Time: {}", created_at.format(RECEIPT_TIME_FORMAT));
    out.push_str("Items:\n");
    for entry in entries {
        let _ = writeln!(out, "  {}", encode_line(entry));
    }
    let _ = writeln!(out, "\nTotal: {}", total);
    out.push_str("**** Thank you! ****\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Product};
    use chrono::TimeZone;

    #[test]
    fn test_render_receipt() {
        let espresso = Product::new("Espresso", 300, 10, Category::Drink);
        let muffin = Product::new("Muffin", 300, 10, Category::Dessert);
        let entries = vec![
            CartEntry::from_product(&espresso, 1, None),
            CartEntry::from_product(&muffin, 2, None),
        ];
        let created_at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 2).unwrap();

        let text = render_receipt(
            "Coffee Order",
            "3F9A12C0",
            created_at,
            &entries,
            Money::from_cents(810),
        );

        assert_eq!(
            text,
            "**** Coffee Order Receipt ****\n\
             Order ID: 3F9A12C0\n\
             Date/Time: 2026-10-19 08:15:02\n\
             Items:\n  \
             Espresso x1 - $3.00\n  \
             Muffin x2 - $6.00\n\
             \n\
             Total: $8.10\n\
             **** Thank you! ****\n"
        );
    }
}
