//! # Line-Item Codec
//!
//! The textual line shown for every cart entry:
//!
//! ```text
//! "<label> x<quantity> - $<line price>"      e.g.  "Latte (Hot) x2 - $5.00"
//! ```
//!
//! Completion persists structured entries directly; this format is only a
//! rendering. The decoder stays available for reading such lines back
//! (receipts, pasted orders) and reports every line it cannot recover.
//!
//! ## Decoding Rules
//! ```text
//! "Latte (Hot) x2 - $5.00"
//!  └────┬─────────┘   └─┬─┘
//!   left part        right part        split on " - ", exactly two parts
//!       │               │
//!   last 'x' splits   strip '$', parse amount (0.00 if malformed)
//!   label | quantity  (quantity 1 if malformed)
//! ```
//!
//! Known limits of the format: a label may not contain `" - "` (product
//! names are validated for this), and the LAST `x` of the left part is
//! taken as the quantity marker.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CartEntry, InvoiceLine};

const SEPARATOR: &str = " - ";

/// Renders an entry as its display line.
pub fn encode_line(entry: &CartEntry) -> String {
    format!("{} x{}{}{}", entry.label, entry.quantity, SEPARATOR, entry.line_price())
}

/// Recovers `(label, quantity, line price)` from a display line.
///
/// ## Example
/// ```rust
/// use brew_core::decode_line;
///
/// let line = decode_line("Latte x2 - $5.00").unwrap();
/// assert_eq!(line.product_name, "Latte");
/// assert_eq!(line.quantity, 2);
/// assert_eq!(line.line_price_cents, 500);
///
/// assert!(decode_line("Latte x2 $5.00").is_err());
/// ```
pub fn decode_line(line: &str) -> CoreResult<InvoiceLine> {
    let mut parts: Vec<&str> = line.split(SEPARATOR).collect();
    // Trailing empty pieces are not parts: "Latte x2 - " has no price
    while parts.len() > 1 && parts.last().is_some_and(|p| p.is_empty()) {
        parts.pop();
    }
    let [left, right] = parts.as_slice() else {
        return Err(unrecoverable(line, "expected exactly one ' - ' separator"));
    };

    let x_index = match left.rfind('x') {
        Some(index) if index > 0 => index,
        _ => return Err(unrecoverable(line, "missing quantity marker 'x'")),
    };

    let label = left[..x_index].trim();
    if label.is_empty() {
        return Err(unrecoverable(line, "empty label"));
    }
    let quantity = left[x_index + 1..].trim().parse::<i64>().unwrap_or(1);

    let price_text = right.trim();
    let price_text = price_text.strip_prefix('$').unwrap_or(price_text);
    let line_price = Money::parse(price_text).unwrap_or_default();

    Ok(InvoiceLine {
        product_name: label.to_string(),
        quantity,
        line_price_cents: line_price.cents(),
    })
}

fn unrecoverable(line: &str, reason: &str) -> CoreError {
    CoreError::UnrecoverableLine {
        line: line.to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Batch Decoding
// =============================================================================

/// Outcome of decoding a batch of display lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedLines {
    /// Recovered lines, in input order.
    pub lines: Vec<InvoiceLine>,

    /// Input lines that could not be recovered, verbatim.
    pub dropped: Vec<String>,
}

impl DecodedLines {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty()
    }

    /// Sum of the recovered line prices.
    pub fn total(&self) -> Money {
        self.lines.iter().map(InvoiceLine::line_price).sum()
    }
}

/// Decodes every line, collecting the unrecoverable ones instead of failing.
pub fn decode_lines<I, S>(lines: I) -> DecodedLines
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut decoded = DecodedLines::default();
    for line in lines {
        let line = line.as_ref();
        match decode_line(line) {
            Ok(recovered) => decoded.lines.push(recovered),
            Err(_) => decoded.dropped.push(line.to_string()),
        }
    }
    decoded
}

// =============================================================================
// Unit Tests
// =============================================================================
