//! # Validation Module
//!
//! Input validation for the counter and the back office.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal front end                                           │
//! │  └── Parses numbers and enums out of the typed command                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Commands (Rust)                                              │
//! │  └── THIS MODULE: business rule validation, before any mutation        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints (stock >= 0, bps within 0..=10000)              │
//! │  └── UNIQUE constraints (code, order id)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brew_core::validation::{validate_product_name, validate_quantity};
//!
//! validate_product_name("Flat White").unwrap();
//! validate_quantity(2).unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Longest accepted discount code.
pub const MAX_DISCOUNT_CODE_LEN: usize = 50;

/// Highest accepted unit price: $1,000,000.00.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Separator of the display line format; may not appear inside a name.
const LINE_SEPARATOR: &str = " - ";

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
/// - Must not contain `" - "`, the separator of the display line format
///
/// ## Example
/// ```rust
/// use brew_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Cappuccino").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// assert!(validate_product_name("Tea - Green").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    if name.contains(LINE_SEPARATOR) {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: format!("must not contain '{}'", LINE_SEPARATOR),
        });
    }

    Ok(())
}

/// Validates a discount code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - No whitespace anywhere (codes are typed at the counter)
pub fn validate_discount_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.chars().count() > MAX_DISCOUNT_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_DISCOUNT_CODE_LEN,
        });
    }

    if code.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity for a single cart addition (1..=999).
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a unit price in cents. Zero is allowed (free refills).
pub fn validate_price(price_cents: i64) -> ValidationResult<()> {
    if price_cents < 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    if price_cents > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates a stock count.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustBePositive {
            field: "stock".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Espresso").is_ok());
        assert!(validate_product_name("Pain au chocolat").is_ok());

        assert!(matches!(
            validate_product_name(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_product_name(&"a".repeat(201)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
        assert!(matches!(
            validate_product_name("Cake - Slice"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        // A bare hyphen is fine, only the spaced separator is reserved
        assert!(validate_product_name("Cold-Brew").is_ok());
    }

    #[test]
    fn test_validate_discount_code() {
        assert!(validate_discount_code("WELCOME10").is_ok());
        assert!(validate_discount_code("").is_err());
        assert!(validate_discount_code("TWO WORDS").is_err());
        assert!(validate_discount_code(&"X".repeat(51)).is_err());
        assert!(validate_discount_code(&"X".repeat(50)).is_ok());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_and_stock() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(-1).is_err());
        assert!(validate_price(MAX_PRICE_CENTS).is_ok());
        assert!(validate_price(MAX_PRICE_CENTS + 1).is_err());
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(-1).is_err());
    }
}
