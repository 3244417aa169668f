//! # Domain Types
//!
//! Core domain types used throughout the Brew Counter.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  DiscountCode   │   │   CartEntry     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (0=unsaved) │   │  code (NOCASE)  │   │  label          │       │
//! │  │  price_cents    │   │  discount_bps   │   │  quantity       │       │
//! │  │  stock          │   │  usage_count    │   │  line_price     │       │
//! │  │  category       │   │  active         │   │  (frozen)       │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │ completion     │
//! │                                              ┌────────▼────────┐       │
//! │                                              │    Invoice      │       │
//! │                                              │  order_id       │       │
//! │                                              │  total_cents    │       │
//! │                                              │  lines[]        │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Menu category of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Drink,
    Dessert,
}

impl Category {
    /// Stored / displayed form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Drink => "DRINK",
            Category::Dessert => "DESSERT",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DRINK" | "DRINKS" => Ok(Category::Drink),
            "DESSERT" | "DESSERTS" => Ok(Category::Dessert),
            _ => Err(ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!("'{}' is not DRINK or DESSERT", s.trim()),
            }),
        }
    }
}

// =============================================================================
// Serve Temperature
// =============================================================================

/// How a drink is served. Appended to the cart label, e.g. `"Latte (Hot)"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeTemperature {
    Hot,
    Cold,
}

impl ServeTemperature {
    /// Builds the display label for a product served this way.
    pub fn label_for(name: &str, temperature: Option<ServeTemperature>) -> String {
        match temperature {
            Some(ServeTemperature::Hot) => format!("{} (Hot)", name),
            Some(ServeTemperature::Cold) => format!("{} (Cold)", name),
            None => name.to_string(),
        }
    }
}

impl FromStr for ServeTemperature {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hot" => Ok(ServeTemperature::Hot),
            "cold" | "iced" => Ok(ServeTemperature::Cold),
            _ => Err(ValidationError::InvalidFormat {
                field: "temperature".to_string(),
                reason: format!("'{}' is not hot or cold", s.trim()),
            }),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product on the menu.
///
/// The persisted row is the source of truth; this in-memory copy is a cache
/// that the session reloads wholesale after catalog edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned id; 0 means "not saved yet".
    pub id: i64,

    /// Display name shown on the menu and (as label) on cart lines.
    pub name: String,

    /// Optional image file reference.
    pub image_name: Option<String>,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Units left. Never negative.
    pub stock: i64,

    pub category: Category,
}

impl Product {
    /// Creates an unsaved product (id 0, no image).
    pub fn new(name: impl Into<String>, price_cents: i64, stock: i64, category: Category) -> Self {
        Product {
            id: 0,
            name: name.into(),
            image_name: None,
            price_cents,
            stock,
            category,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether `quantity` units can be taken without going below zero.
    #[inline]
    pub fn has_stock(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount fraction in basis points (10000 bps = 1.0 = everything off).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Basis points in a whole (fraction 1.0).
    pub const FULL_BPS: u32 = 10_000;

    /// Creates a rate from basis points, capped at [`Self::FULL_BPS`].
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        DiscountRate(bps.min(Self::FULL_BPS))
    }

    /// Creates a rate from a fraction, clamped into [0.0, 1.0].
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::DiscountRate;
    ///
    /// assert_eq!(DiscountRate::from_fraction(0.15).bps(), 1500);
    /// assert_eq!(DiscountRate::from_fraction(1.5), DiscountRate::full());
    /// assert_eq!(DiscountRate::from_fraction(-0.2), DiscountRate::zero());
    /// ```
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return DiscountRate::zero();
        }
        let clamped = fraction.clamp(0.0, 1.0);
        DiscountRate((clamped * f64::from(Self::FULL_BPS)).round() as u32)
    }

    /// No discount.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Everything off.
    #[inline]
    pub const fn full() -> Self {
        DiscountRate(Self::FULL_BPS)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction in [0.0, 1.0] (display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / f64::from(Self::FULL_BPS)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for DiscountRate {
    /// `1500` bps shows as `15%`, `1250` as `12.5%`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let rest = self.0 % 100;
        if rest == 0 {
            write!(f, "{}%", whole)
        } else if rest % 10 == 0 {
            write!(f, "{}.{}%", whole, rest / 10)
        } else {
            write!(f, "{}.{:02}%", whole, rest)
        }
    }
}

// =============================================================================
// Discount Code
// =============================================================================

/// A discount code the cashier can type in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DiscountCode {
    pub id: i64,

    /// Match key; compared case-insensitively.
    pub code: String,

    /// Discount in basis points, always within 0..=10000.
    pub discount_bps: u32,

    /// Times the code was successfully applied. Only ever goes up.
    pub usage_count: i64,

    pub active: bool,
}

impl DiscountCode {
    /// Creates an unsaved, active code with zero usage.
    pub fn new(code: impl Into<String>, rate: DiscountRate) -> Self {
        DiscountCode {
            id: 0,
            code: code.into(),
            discount_bps: rate.bps(),
            usage_count: 0,
            active: true,
        }
    }

    /// Returns the discount rate.
    #[inline]
    pub fn rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.discount_bps)
    }

    /// Case-insensitive exact match against the entered code.
    pub fn matches(&self, entered: &str) -> bool {
        self.code.eq_ignore_ascii_case(entered.trim())
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// One product-quantity selection in the pending order.
///
/// ## Price Freezing
/// The line price is captured when the entry is created and never
/// recomputed, even if the catalog price changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Product the entry was taken from.
    pub product_id: i64,

    /// Product name, optionally suffixed with the serve temperature.
    pub label: String,

    /// Units taken (≥ 1).
    pub quantity: i64,

    /// Unit price in cents at the time of adding (frozen).
    pub unit_price_cents: i64,

    /// unit price × quantity at the time of adding (frozen).
    pub line_price_cents: i64,
}

impl CartEntry {
    /// Captures an entry from a product.
    pub fn from_product(
        product: &Product,
        quantity: i64,
        temperature: Option<ServeTemperature>,
    ) -> Self {
        CartEntry {
            product_id: product.id,
            label: ServeTemperature::label_for(&product.name, temperature),
            quantity,
            unit_price_cents: product.price_cents,
            line_price_cents: product.price().multiply_quantity(quantity).cents(),
        }
    }

    #[inline]
    pub fn line_price(&self) -> Money {
        Money::from_cents(self.line_price_cents)
    }

    /// The `"<label> x<qty> - $<price>"` display line.
    pub fn display_line(&self) -> String {
        crate::codec::encode_line(self)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A persisted line of an invoice.
///
/// `product_name` is free text (the cart label), not a product reference,
/// so invoices survive product renames and deletions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InvoiceLine {
    pub product_name: String,
    pub quantity: i64,
    pub line_price_cents: i64,
}

impl InvoiceLine {
    #[inline]
    pub fn line_price(&self) -> Money {
        Money::from_cents(self.line_price_cents)
    }
}

impl From<&CartEntry> for InvoiceLine {
    fn from(entry: &CartEntry) -> Self {
        InvoiceLine {
            product_name: entry.label.clone(),
            quantity: entry.quantity,
            line_price_cents: entry.line_price_cents,
        }
    }
}

/// A completed, persisted order. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Id the store assigned to the invoice header.
    pub id: i64,

    /// Human-readable order identifier, e.g. `"3F9A12C0"`.
    pub order_id: String,

    pub created_at: DateTime<Utc>,

    /// Post-discount total in cents.
    pub total_cents: i64,

    /// Lines that were persisted, in cart order.
    pub lines: Vec<InvoiceLine>,
}

impl Invoice {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Sum of the line prices (pre-discount).
    pub fn lines_total(&self) -> Money {
        self.lines.iter().map(InvoiceLine::line_price).sum()
    }
}

// =============================================================================
// Report Rows
// =============================================================================

/// Sales total for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DailySale {
    pub day: NaiveDate,
    pub total_cents: i64,
}

/// Units sold per invoice-line product name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TopProduct {
    pub product_name: String,
    pub units_sold: i64,
}

/// A product running low on stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct LowStockItem {
    pub name: String,
    pub stock: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("drink".parse::<Category>().unwrap(), Category::Drink);
        assert_eq!(" DESSERT ".parse::<Category>().unwrap(), Category::Dessert);
        assert!("pastry".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&Category::Dessert).unwrap();
        assert_eq!(json, "\"DESSERT\"");
    }

    #[test]
    fn test_discount_rate_clamps() {
        assert_eq!(DiscountRate::from_fraction(1.5).bps(), 10_000);
        assert_eq!(DiscountRate::from_fraction(-0.2).bps(), 0);
        assert_eq!(DiscountRate::from_fraction(f64::NAN).bps(), 0);
        assert_eq!(DiscountRate::from_fraction(0.10).bps(), 1000);
        assert_eq!(DiscountRate::from_bps(20_000), DiscountRate::full());
        assert!((DiscountRate::from_bps(2500).fraction() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_discount_rate_display() {
        assert_eq!(DiscountRate::from_bps(1500).to_string(), "15%");
        assert_eq!(DiscountRate::from_bps(1250).to_string(), "12.5%");
        assert_eq!(DiscountRate::from_bps(1234).to_string(), "12.34%");
    }

    #[test]
    fn test_discount_code_matches_case_insensitively() {
        let code = DiscountCode::new("Influencer10", DiscountRate::from_bps(1000));
        assert!(code.matches("INFLUENCER10"));
        assert!(code.matches(" influencer10 "));
        assert!(!code.matches("influencer"));
    }

    #[test]
    fn test_cart_entry_freezes_price_and_label() {
        let mut latte = Product::new("Latte", 250, 10, Category::Drink);
        latte.id = 7;

        let entry = CartEntry::from_product(&latte, 2, Some(ServeTemperature::Hot));
        latte.price_cents = 999;

        assert_eq!(entry.product_id, 7);
        assert_eq!(entry.label, "Latte (Hot)");
        assert_eq!(entry.line_price_cents, 500);
        assert_eq!(entry.unit_price_cents, 250);
    }

    #[test]
    fn test_invoice_line_from_entry_uses_label() {
        let muffin = Product::new("Muffin", 300, 4, Category::Dessert);
        let entry = CartEntry::from_product(&muffin, 2, None);
        let line = InvoiceLine::from(&entry);

        assert_eq!(line.product_name, "Muffin");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_price(), Money::from_cents(600));
    }
}
