//! # Cart Ledger
//!
//! The pending order: entries in insertion order, a running item count, a
//! running pre-discount subtotal and at most one active discount.
//!
//! ## Add Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_item(product, qty, temperature)                                    │
//! │     │                                                                   │
//! │     ├── qty outside 1..=999 ──────────► Validation (nothing changed)   │
//! │     ├── product.stock < qty ──────────► InsufficientStock (unchanged)  │
//! │     │                                                                   │
//! │     ├── product.stock -= qty            (caller persists the new value) │
//! │     ├── entries.push(CartEntry)         (price frozen here)             │
//! │     └── item_count += qty, subtotal += line price                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - `item_count == Σ entry.quantity`
//! - `subtotal == Σ entry.line_price`
//! - Adding the same product twice yields two entries, never a merge
//! - `reset()` never gives stock back

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CartEntry, DiscountRate, Product, ServeTemperature};
use crate::validation::validate_quantity;

/// The order in progress.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
    item_count: i64,
    subtotal: Money,
    discount: DiscountRate,
}

impl Cart {
    /// Creates an empty cart with no discount.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Takes `quantity` units of `product` into the cart.
    ///
    /// On success the product's in-memory stock is already decremented;
    /// persisting the new stock value is the caller's job. On failure
    /// neither the cart nor the product is touched.
    pub fn add_item(
        &mut self,
        product: &mut Product,
        quantity: i64,
        temperature: Option<ServeTemperature>,
    ) -> CoreResult<&CartEntry> {
        validate_quantity(quantity)?;

        if !product.has_stock(quantity) {
            return Err(CoreError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        // Prices read back from the store are not re-validated
        let subtotal = product
            .price()
            .checked_multiply_quantity(quantity)
            .and_then(|line| self.subtotal.checked_add(line))
            .ok_or_else(|| ValidationError::Overflow {
                field: "order total".to_string(),
            })?;

        product.stock -= quantity;

        let entry = CartEntry::from_product(product, quantity, temperature);
        self.item_count += entry.quantity;
        self.subtotal = subtotal;
        self.entries.push(entry);

        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Sets the active discount, replacing any previous one.
    pub fn apply_discount(&mut self, rate: DiscountRate) {
        self.discount = rate;
    }

    /// `round2(subtotal × (1 - discount))`, computed on every call.
    pub fn current_total(&self) -> Money {
        self.subtotal.apply_discount(self.discount)
    }

    /// Clears entries, counters and discount, handing back what was dropped.
    ///
    /// Stock taken by the dropped entries stays taken.
    pub fn reset(&mut self) -> Vec<CartEntry> {
        self.item_count = 0;
        self.subtotal = Money::zero();
        self.discount = DiscountRate::zero();
        std::mem::take(&mut self.entries)
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of quantities across entries.
    pub fn item_count(&self) -> i64 {
        self.item_count
    }

    /// Pre-discount total.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn discount(&self) -> DiscountRate {
        self.discount
    }

    /// Display lines, one per entry, in insertion order.
    pub fn display_lines(&self) -> Vec<String> {
        self.entries.iter().map(CartEntry::display_line).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn espresso() -> Product {
        let mut p = Product::new("Espresso", 300, 10, Category::Drink);
        p.id = 1;
        p
    }

    fn muffin() -> Product {
        let mut p = Product::new("Muffin", 300, 5, Category::Dessert);
        p.id = 2;
        p
    }

    #[test]
    fn test_overflowing_total_is_rejected_before_mutation() {
        let mut cart = Cart::new();
        let mut big = Product::new("Big", i64::MAX / 2 + 1, 5, Category::Drink);

        let err = cart.add_item(&mut big, 2, None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Overflow { .. })
        ));
        assert_eq!(big.stock, 5);
        assert!(cart.is_empty());

        // Each line fits on its own, the running subtotal does not
        cart.add_item(&mut big, 1, None).unwrap();
        let err = cart.add_item(&mut big, 1, None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Overflow { .. })
        ));
        assert_eq!(big.stock, 4);
        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_add_item_decrements_stock_and_tracks_totals() {
        let mut cart = Cart::new();
        let mut espresso = espresso();
        let mut muffin = muffin();

        cart.add_item(&mut espresso, 1, None).unwrap();
        cart.add_item(&mut muffin, 2, None).unwrap();
        cart.add_item(&mut espresso, 3, Some(ServeTemperature::Cold)).unwrap();

        assert_eq!(espresso.stock, 6);
        assert_eq!(muffin.stock, 3);
        assert_eq!(cart.item_count(), 6);
        assert_eq!(cart.subtotal(), Money::from_cents(1800));
        assert_eq!(
            cart.item_count(),
            cart.entries().iter().map(|e| e.quantity).sum::<i64>()
        );
        assert_eq!(
            cart.subtotal(),
            cart.entries().iter().map(CartEntry::line_price).sum::<Money>()
        );
    }

    #[test]
    fn test_repeated_additions_are_separate_entries() {
        let mut cart = Cart::new();
        let mut espresso = espresso();

        cart.add_item(&mut espresso, 1, Some(ServeTemperature::Hot)).unwrap();
        cart.add_item(&mut espresso, 1, Some(ServeTemperature::Hot)).unwrap();

        assert_eq!(cart.entries().len(), 2);
        assert_eq!(
            cart.display_lines(),
            vec!["Espresso (Hot) x1 - $3.00", "Espresso (Hot) x1 - $3.00"]
        );
    }

    #[test]
    fn test_insufficient_stock_leaves_everything_unchanged() {
        let mut cart = Cart::new();
        let mut muffin = muffin();
        cart.add_item(&mut muffin, 2, None).unwrap();

        let err = cart.add_item(&mut muffin, 4, None).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 3,
                requested: 4,
                ..
            }
        ));
        assert_eq!(muffin.stock, 3);
        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.item_count(), 2);

        // Exactly the remaining stock is still fine
        cart.add_item(&mut muffin, 3, None).unwrap();
        assert_eq!(muffin.stock, 0);
    }

    #[test]
    fn test_invalid_quantity_is_rejected() {
        let mut cart = Cart::new();
        let mut espresso = espresso();

        assert!(matches!(
            cart.add_item(&mut espresso, 0, None),
            Err(CoreError::Validation(_))
        ));
        assert!(cart.add_item(&mut espresso, 1000, None).is_err());
        assert_eq!(espresso.stock, 10);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_discount_replaces_instead_of_stacking() {
        let mut cart = Cart::new();
        let mut espresso = espresso();
        let mut muffin = muffin();
        cart.add_item(&mut espresso, 1, None).unwrap();
        cart.add_item(&mut muffin, 2, None).unwrap();

        cart.apply_discount(DiscountRate::from_bps(2500));
        assert_eq!(cart.current_total(), Money::from_cents(675));

        cart.apply_discount(DiscountRate::from_bps(1000));
        assert_eq!(cart.current_total(), Money::from_cents(810));
    }

    #[test]
    fn test_total_follows_later_additions() {
        let mut cart = Cart::new();
        let mut espresso = espresso();
        cart.apply_discount(DiscountRate::from_bps(5000));
        cart.add_item(&mut espresso, 1, None).unwrap();
        assert_eq!(cart.current_total(), Money::from_cents(150));
        cart.add_item(&mut espresso, 1, None).unwrap();
        assert_eq!(cart.current_total(), Money::from_cents(300));
    }

    #[test]
    fn test_reset_clears_but_keeps_stock_taken() {
        let mut cart = Cart::new();
        let mut muffin = muffin();
        cart.add_item(&mut muffin, 2, None).unwrap();
        cart.apply_discount(DiscountRate::from_bps(1000));

        let dropped = cart.reset();

        assert_eq!(dropped.len(), 1);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), Money::zero());
        assert_eq!(cart.discount(), DiscountRate::zero());
        assert_eq!(muffin.stock, 3);

        // The next order sees the reduced stock
        assert!(cart.add_item(&mut muffin, 4, None).is_err());
    }
}
