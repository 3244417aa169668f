//! # Discount Resolver
//!
//! In-memory half of discount handling: finding a code the cashier typed
//! and deciding whether it may be applied. Counting the use and persisting
//! the counter is done by the counter app, which owns the store handle.
//!
//! ## Apply Flow
//! ```text
//! typed code ──► DiscountBook::accept()
//!                   │
//!                   ├── no match ─────────► Rejected(NotFound)
//!                   ├── match, inactive ──► Rejected(Inactive)
//!                   └── match, active ────► Accepted(rate)
//!                                              │
//!                                              ├─► Cart::apply_discount (replaces)
//!                                              └─► usage_count + 1 (persisted now,
//!                                                  even if the order is cancelled)
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::types::DiscountCode;

/// Why a code was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NotFound,
    Inactive,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotFound => f.write_str("code not found"),
            RejectReason::Inactive => f.write_str("code is inactive"),
        }
    }
}

/// The loaded list of discount codes.
///
/// Refreshed wholesale from the store after every change that could have
/// touched a code (applying one, back-office edits).
#[derive(Debug, Clone, Default)]
pub struct DiscountBook {
    codes: Vec<DiscountCode>,
}

impl DiscountBook {
    pub fn new(codes: Vec<DiscountCode>) -> Self {
        DiscountBook { codes }
    }

    /// Replaces the whole list with a fresh load.
    pub fn replace(&mut self, codes: Vec<DiscountCode>) {
        self.codes = codes;
    }

    pub fn codes(&self) -> &[DiscountCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Case-insensitive exact lookup, active or not.
    pub fn resolve(&self, entered: &str) -> Option<&DiscountCode> {
        self.codes.iter().find(|c| c.matches(entered))
    }

    /// Looks up a code and checks that it may be applied.
    ///
    /// Does not mutate anything; the caller records the use.
    pub fn accept(&self, entered: &str) -> CoreResult<&DiscountCode> {
        let code = self
            .resolve(entered)
            .ok_or_else(|| CoreError::DiscountRejected {
                code: entered.trim().to_string(),
                reason: RejectReason::NotFound,
            })?;

        if !code.active {
            return Err(CoreError::DiscountRejected {
                code: code.code.clone(),
                reason: RejectReason::Inactive,
            });
        }

        Ok(code)
    }

    /// Bumps the in-memory counter of an accepted code.
    ///
    /// Keeps the cached list consistent until the next reload.
    pub fn record_use(&mut self, id: i64) {
        if let Some(code) = self.codes.iter_mut().find(|c| c.id == id) {
            code.usage_count += 1;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DiscountRate;

    fn book() -> DiscountBook {
        let mut welcome = DiscountCode::new("WELCOME10", DiscountRate::from_bps(1000));
        welcome.id = 1;
        let mut expired = DiscountCode::new("Summer25", DiscountRate::from_bps(2500));
        expired.id = 2;
        expired.active = false;
        DiscountBook::new(vec![welcome, expired])
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let book = book();
        assert_eq!(book.resolve("welcome10").map(|c| c.id), Some(1));
        assert_eq!(book.resolve("SUMMER25").map(|c| c.id), Some(2));
        assert!(book.resolve("WELCOME").is_none());
    }

    #[test]
    fn test_accept_active_code() {
        let book = book();
        let code = book.accept(" Welcome10 ").unwrap();
        assert_eq!(code.rate().bps(), 1000);
    }

    #[test]
    fn test_accept_rejects_unknown_and_inactive() {
        let book = book();

        let err = book.accept("NOPE").unwrap_err();
        assert!(matches!(
            err,
            CoreError::DiscountRejected {
                reason: RejectReason::NotFound,
                ..
            }
        ));

        let err = book.accept("summer25").unwrap_err();
        assert!(matches!(
            err,
            CoreError::DiscountRejected {
                reason: RejectReason::Inactive,
                ..
            }
        ));
    }

    #[test]
    fn test_record_use_bumps_counter() {
        let mut book = book();
        book.record_use(1);
        book.record_use(1);
        book.record_use(99);
        assert_eq!(book.resolve("WELCOME10").unwrap().usage_count, 2);
        assert_eq!(book.resolve("SUMMER25").unwrap().usage_count, 0);
    }
}
