//! # Order Session
//!
//! Everything one running counter owns: the injected store handle, the
//! cached catalog and code list, and the cart in progress.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderSession<S: OrderStore>                                            │
//! │                                                                         │
//! │  store      ── injected at startup, never reached globally             │
//! │  catalog    ── cache of the product table, reloaded wholesale          │
//! │  discounts  ── cache of the code table, reloaded wholesale             │
//! │  cart       ── the pending order, never partially persisted            │
//! │                                                                         │
//! │  One session = one actor. Commands take `&mut OrderSession`, so the    │
//! │  borrow checker already serializes every cart mutation.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use brew_core::{Cart, Catalog, DiscountBook};
use brew_db::{DbResult, OrderStore};

/// The state of a running counter.
#[derive(Debug)]
pub struct OrderSession<S> {
    pub(crate) store: S,
    pub(crate) catalog: Catalog,
    pub(crate) discounts: DiscountBook,
    pub(crate) cart: Cart,
}

impl<S: OrderStore> OrderSession<S> {
    /// Opens a session: loads products and codes, starts with an empty cart.
    pub async fn load(store: S) -> DbResult<Self> {
        let products = store.load_products().await?;
        let codes = store.load_discount_codes().await?;

        info!(
            products = products.len(),
            discount_codes = codes.len(),
            "Order session loaded"
        );

        Ok(OrderSession {
            store,
            catalog: Catalog::new(products),
            discounts: DiscountBook::new(codes),
            cart: Cart::new(),
        })
    }

    /// Replaces the cached catalog with a fresh load.
    pub async fn reload_catalog(&mut self) -> DbResult<()> {
        let products = self.store.load_products().await?;
        debug!(count = products.len(), "Catalog reloaded");
        self.catalog.replace(products);
        Ok(())
    }

    /// Replaces the cached code list with a fresh load.
    pub async fn reload_discounts(&mut self) -> DbResult<()> {
        let codes = self.store.load_discount_codes().await?;
        debug!(count = codes.len(), "Discount codes reloaded");
        self.discounts.replace(codes);
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn discounts(&self) -> &DiscountBook {
        &self.discounts
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Gives the store handle back (for shutdown).
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingStore;

    #[tokio::test]
    async fn test_load_and_reload() {
        let store = RecordingStore::menu();
        let mut session = OrderSession::load(store).await.unwrap();

        assert_eq!(session.catalog().len(), 3);
        assert_eq!(session.discounts().len(), 3);
        assert!(session.cart().is_empty());

        session.store().state().products[0].stock = 0;
        session.reload_catalog().await.unwrap();
        assert_eq!(session.catalog().products()[0].stock, 0);
    }

    #[tokio::test]
    async fn test_load_failure_is_reported() {
        let store = RecordingStore::menu();
        store.state().fail_loads = true;
        assert!(OrderSession::load(store).await.is_err());
    }
}
