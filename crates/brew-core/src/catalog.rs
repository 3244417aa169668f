//! # Catalog View
//!
//! The loaded product list and the menu filter.
//!
//! ## Filter Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Criterion      Active when          Match                              │
//! │  ─────────      ───────────          ─────                              │
//! │  name           non-blank input      case-insensitive substring         │
//! │  min price      parses as amount     price >= min (inclusive)           │
//! │  max price      parses as amount     price <= max (inclusive)           │
//! │  category       Some(..)             exact                              │
//! │                                                                         │
//! │  All active criteria are AND-ed. A bound that does not parse is        │
//! │  treated as "no bound", never as an error.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Category, Product};

// =============================================================================
// Filter
// =============================================================================

/// Criteria for narrowing down the menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Lower-cased name fragment.
    pub name: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub category: Option<Category>,
}

impl CatalogFilter {
    /// Builds a filter from raw operator input.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::{CatalogFilter, Money};
    ///
    /// let filter = CatalogFilter::from_inputs("lat", "2", "abc", None);
    /// assert_eq!(filter.name.as_deref(), Some("lat"));
    /// assert_eq!(filter.min_price, Some(Money::from_cents(200)));
    /// assert_eq!(filter.max_price, None); // malformed bound = no bound
    /// ```
    pub fn from_inputs(
        name: &str,
        min_price: &str,
        max_price: &str,
        category: Option<Category>,
    ) -> Self {
        let name = name.trim();
        CatalogFilter {
            name: (!name.is_empty()).then(|| name.to_lowercase()),
            min_price: Money::parse(min_price),
            max_price: Money::parse(max_price),
            category,
        }
    }

    /// Whether a product passes every active criterion.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(fragment) = &self.name {
            if !product.name.to_lowercase().contains(fragment.as_str()) {
                return false;
            }
        }

        let price = product.price();
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }

        self.category.map_or(true, |c| c == product.category)
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// In-memory cache of the product table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Replaces the whole list with a fresh load.
    pub fn replace(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    /// Products passing `filter`, in catalog order.
    pub fn filter(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let mut products = vec![
            Product::new("Espresso", 300, 20, Category::Drink),
            Product::new("Iced Latte", 450, 10, Category::Drink),
            Product::new("Blueberry Muffin", 300, 6, Category::Dessert),
            Product::new("Cheesecake", 550, 3, Category::Dessert),
        ];
        for (i, p) in products.iter_mut().enumerate() {
            p.id = i as i64 + 1;
        }
        Catalog::new(products)
    }

    fn names(products: Vec<&Product>) -> Vec<&str> {
        products.into_iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything_in_order() {
        let catalog = catalog();
        let all = catalog.filter(&CatalogFilter::default());
        assert_eq!(
            names(all),
            vec!["Espresso", "Iced Latte", "Blueberry Muffin", "Cheesecake"]
        );
    }

    #[test]
    fn test_name_is_case_insensitive_substring() {
        let catalog = catalog();
        let filter = CatalogFilter::from_inputs("LATTE", "", "", None);
        assert_eq!(names(catalog.filter(&filter)), vec!["Iced Latte"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = catalog();
        let filter = CatalogFilter::from_inputs("", "3.00", "4.50", None);
        assert_eq!(
            names(catalog.filter(&filter)),
            vec!["Espresso", "Iced Latte", "Blueberry Muffin"]
        );
    }

    #[test]
    fn test_malformed_bounds_are_ignored() {
        let catalog = catalog();
        let filter = CatalogFilter::from_inputs("", "cheap", "lots", None);
        assert_eq!(catalog.filter(&filter).len(), 4);
    }

    #[test]
    fn test_criteria_are_anded() {
        let catalog = catalog();
        let filter = CatalogFilter::from_inputs("e", "", "3", Some(Category::Dessert));
        assert_eq!(names(catalog.filter(&filter)), vec!["Blueberry Muffin"]);
    }

    #[test]
    fn test_get_and_get_mut() {
        let mut catalog = catalog();
        assert_eq!(catalog.get(4).map(|p| p.name.as_str()), Some("Cheesecake"));
        assert!(catalog.get(42).is_none());

        if let Some(p) = catalog.get_mut(1) {
            p.stock = 0;
        }
        assert_eq!(catalog.get(1).unwrap().stock, 0);
    }
}
