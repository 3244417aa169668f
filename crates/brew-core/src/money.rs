//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With doubles:                                                          │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │    a running subtotal drifts a little on every addition                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    line price  = unit cents × quantity       (exact)                    │
//! │    subtotal    = Σ line cents                (exact)                    │
//! │    total       = round(subtotal × (1 - f))   (one rounding, at the end) │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brew_core::money::Money;
//!
//! let price = Money::from_cents(350); // $3.50
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.to_string(), "$7.00");
//!
//! // Operator input is parsed, never converted from a float
//! assert_eq!(Money::parse("$4.25"), Some(Money::from_cents(425)));
//! assert_eq!(Money::parse("cheap"), None);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Where Money Flows
/// ```text
/// Product.price_cents ──► CartEntry.line_price ──► Cart.subtotal
///                                                      │
///                              DiscountRate ───────────┤
///                                                      ▼
///                                   Cart.current_total ──► Invoice.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// [`Money::multiply_quantity`] that returns `None` instead of overflowing.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Addition that returns `None` instead of overflowing.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns what remains after taking `rate` off this amount.
    ///
    /// Rounds half up to the cent, i.e. `round2(amount * (1 - fraction))`.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::{DiscountRate, Money};
    ///
    /// let subtotal = Money::from_cents(900);
    /// let total = subtotal.apply_discount(DiscountRate::from_fraction(0.10));
    /// assert_eq!(total.cents(), 810);
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        // i128 keeps amount × bps clear of overflow
        let kept_bps = i128::from(DiscountRate::FULL_BPS - rate.bps());
        let cents = (i128::from(self.0) * kept_bps + 5000).div_euclid(10_000);
        Money(cents as i64)
    }

    /// Parses a decimal amount such as `"3.50"`, `"$3.5"`, `"3"` or `".75"`.
    ///
    /// Returns `None` for anything that is not a plain decimal number; the
    /// callers decide what a missing value means (no bound, zero price).
    /// Digits past the second decimal place round half up.
    pub fn parse(input: &str) -> Option<Money> {
        let s = input.trim();
        let s = s.strip_prefix('$').unwrap_or(s).trim_start();
        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major_str, minor_str) = s.split_once('.').unwrap_or((s, ""));
        if major_str.is_empty() && minor_str.is_empty() {
            return None;
        }
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(major_str) || !all_digits(minor_str) {
            return None;
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().ok()?
        };

        let mut minor_digits = minor_str.bytes().map(|b| i64::from(b - b'0'));
        let tens = minor_digits.next().unwrap_or(0);
        let ones = minor_digits.next().unwrap_or(0);
        let round_up = minor_digits.next().is_some_and(|d| d >= 5);

        let mut cents = major.checked_mul(100)?.checked_add(tens * 10 + ones)?;
        if round_up {
            cents = cents.checked_add(1)?;
        }

        Some(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$D.CC`, the format used on cart lines and receipts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
