//! # Administration Commands
//!
//! Product and discount code maintenance. Every write is validated first
//! and followed by a wholesale reload of the affected cached list, so the
//! session never trusts a list the store has moved past.
//!
//! ```text
//! add / edit / delete ──► validate ──► store write ──► reload list
//!                            │              │              │
//!                     VALIDATION_ERROR  NOT_FOUND /    PERSIST_FAILED
//!                                       PERSIST_FAILED
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::OrderSession;
use brew_core::validation::{
    validate_discount_code, validate_price, validate_product_name, validate_stock,
};
use brew_core::{Category, CoreError, DiscountCode, DiscountRate, Product};
use brew_db::BackOfficeStore;

// =============================================================================
// Inputs
// =============================================================================

/// Product fields as entered by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub image_name: Option<String>,
    pub price_cents: i64,
    pub stock: i64,
    pub category: Category,
}

impl ProductDraft {
    fn validate(&self) -> Result<(), ApiError> {
        validate_product_name(&self.name).map_err(CoreError::from)?;
        validate_price(self.price_cents).map_err(CoreError::from)?;
        validate_stock(self.stock).map_err(CoreError::from)?;
        Ok(())
    }

    fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name.trim().to_string(),
            image_name: self.image_name.filter(|s| !s.trim().is_empty()),
            price_cents: self.price_cents,
            stock: self.stock,
            category: self.category,
        }
    }
}

/// Discount code fields as entered by the operator.
///
/// `fraction` is clamped into `[0.0, 1.0]` before storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCodeDraft {
    pub code: String,
    pub fraction: f64,
    pub active: bool,
}

impl DiscountCodeDraft {
    fn validate(&self) -> Result<(), ApiError> {
        validate_discount_code(&self.code).map_err(CoreError::from)?;
        Ok(())
    }

    fn into_code(self, id: i64, usage_count: i64) -> DiscountCode {
        DiscountCode {
            id,
            code: self.code.trim().to_string(),
            discount_bps: DiscountRate::from_fraction(self.fraction).bps(),
            usage_count,
            active: self.active,
        }
    }
}

// =============================================================================
// Products
// =============================================================================

async fn reload_catalog<S: BackOfficeStore>(session: &mut OrderSession<S>) -> Result<(), ApiError> {
    session
        .reload_catalog()
        .await
        .map_err(|e| ApiError::persist("reload catalog", e))
}

async fn reload_discounts<S: BackOfficeStore>(
    session: &mut OrderSession<S>,
) -> Result<(), ApiError> {
    session
        .reload_discounts()
        .await
        .map_err(|e| ApiError::persist("reload discount codes", e))
}

/// Adds a product to the menu.
pub async fn add_product<S: BackOfficeStore>(
    session: &mut OrderSession<S>,
    draft: ProductDraft,
) -> Result<Product, ApiError> {
    debug!(name = %draft.name, "add_product command");
    draft.validate()?;

    let saved = session.store.insert_product(&draft.into_product(0)).await?;
    info!(id = saved.id, name = %saved.name, "Product added");

    reload_catalog(session).await?;
    Ok(saved)
}

/// Replaces every field of an existing product.
pub async fn edit_product<S: BackOfficeStore>(
    session: &mut OrderSession<S>,
    id: i64,
    draft: ProductDraft,
) -> Result<Product, ApiError> {
    debug!(id = id, "edit_product command");
    draft.validate()?;

    let product = draft.into_product(id);
    session.store.update_product(&product).await?;
    info!(id = id, name = %product.name, "Product updated");

    reload_catalog(session).await?;
    Ok(product)
}

/// Removes a product. Past invoices keep their lines (names are free text).
pub async fn delete_product<S: BackOfficeStore>(
    session: &mut OrderSession<S>,
    id: i64,
) -> Result<(), ApiError> {
    debug!(id = id, "delete_product command");

    session.store.delete_product(id).await?;
    info!(id = id, "Product deleted");

    reload_catalog(session).await
}

// =============================================================================
// Discount Codes
// =============================================================================

/// Adds a discount code with zero usage.
pub async fn add_discount_code<S: BackOfficeStore>(
    session: &mut OrderSession<S>,
    draft: DiscountCodeDraft,
) -> Result<DiscountCode, ApiError> {
    debug!(code = %draft.code, fraction = draft.fraction, "add_discount_code command");
    draft.validate()?;

    let saved = session
        .store
        .insert_discount_code(&draft.into_code(0, 0))
        .await?;
    info!(id = saved.id, code = %saved.code, rate = %saved.rate(), "Discount code added");

    reload_discounts(session).await?;
    Ok(saved)
}

/// Updates code text, rate and active flag; the usage counter is kept.
pub async fn edit_discount_code<S: BackOfficeStore>(
    session: &mut OrderSession<S>,
    id: i64,
    draft: DiscountCodeDraft,
) -> Result<DiscountCode, ApiError> {
    debug!(id = id, "edit_discount_code command");
    draft.validate()?;

    let usage_count = session
        .discounts
        .codes()
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.usage_count)
        .ok_or_else(|| ApiError::not_found("DiscountCode", id))?;

    let code = draft.into_code(id, usage_count);
    session.store.update_discount_code(&code).await?;
    info!(id = id, code = %code.code, rate = %code.rate(), "Discount code updated");

    reload_discounts(session).await?;
    Ok(code)
}

pub async fn delete_discount_code<S: BackOfficeStore>(
    session: &mut OrderSession<S>,
    id: i64,
) -> Result<(), ApiError> {
    debug!(id = id, "delete_discount_code command");

    session.store.delete_discount_code(id).await?;
    info!(id = id, "Discount code deleted");

    reload_discounts(session).await
}
