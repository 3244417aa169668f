//! # brew-core: Pure Business Logic for the Brew Counter
//!
//! This crate is the order-taking engine of the counter with every I/O
//! concern stripped out. Persistence lives in `brew-db`; orchestration of
//! store calls lives in the counter app.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Brew Counter Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Counter App (apps/counter)                      │   │
//! │  │   filter_catalog, add_item, apply_discount, complete_order     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ brew-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌──────────┐ ┌────────┐ ┌────────┐ ┌─────────┐  │   │
//! │  │   │ catalog │ │ discount │ │  cart  │ │ codec  │ │ receipt │  │   │
//! │  │   │ filter  │ │ resolver │ │ ledger │ │ lines  │ │  text   │  │   │
//! │  │   └─────────┘ └──────────┘ └────────┘ └────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    brew-db (Database Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, DiscountCode, CartEntry, Invoice, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`catalog`] - Catalog view and filter queries
//! - [`discount`] - Discount code resolution
//! - [`cart`] - Cart ledger (pending order)
//! - [`codec`] - Line-item display encoding and decoding
//! - [`receipt`] - Human-readable receipt rendering
//!
//! ## Example Usage
//!
//! ```rust
//! use brew_core::{Cart, Category, DiscountRate, Money, Product};
//!
//! let mut latte = Product::new("Latte", 250, 10, Category::Drink);
//! let mut cart = Cart::new();
//!
//! cart.add_item(&mut latte, 2, None).unwrap();
//! cart.apply_discount(DiscountRate::from_fraction(0.10));
//!
//! assert_eq!(latte.stock, 8);
//! assert_eq!(cart.current_total(), Money::from_cents(450));
//! ```

pub mod cart;
pub mod catalog;
pub mod codec;
pub mod discount;
pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// Re-exports so callers can write `brew_core::Cart` instead of
// `brew_core::cart::Cart`.

pub use cart::Cart;
pub use catalog::{Catalog, CatalogFilter};
pub use codec::{decode_line, decode_lines, encode_line, DecodedLines};
pub use discount::{DiscountBook, RejectReason};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::render_receipt;
pub use types::*;

/// Maximum quantity accepted by a single cart addition.
///
/// Guards against typing 100 instead of 10; the stock bound still applies
/// on top of this.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Stock level below which a product shows up in the low-stock report.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;
