//! # Catalog Commands

use tracing::debug;

use crate::state::OrderSession;
use brew_core::{CatalogFilter, Product};

/// Products passing every active criterion of `filter`, in catalog order.
///
/// Reads the cached catalog only; no store call.
pub fn filter_catalog<S>(session: &OrderSession<S>, filter: &CatalogFilter) -> Vec<Product> {
    let products: Vec<Product> = session
        .catalog
        .filter(filter)
        .into_iter()
        .cloned()
        .collect();

    debug!(
        name = ?filter.name,
        category = ?filter.category,
        matches = products.len(),
        "filter_catalog"
    );
    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingStore;
    use brew_core::Category;

    #[tokio::test]
    async fn test_filter_by_name_and_category() {
        let session = OrderSession::load(RecordingStore::menu()).await.unwrap();

        let all = filter_catalog(&session, &CatalogFilter::default());
        assert_eq!(all.len(), 3);

        let drinks = filter_catalog(
            &session,
            &CatalogFilter::from_inputs("", "", "", Some(Category::Drink)),
        );
        let names: Vec<_> = drinks.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Espresso", "Latte"]);

        let muffin = filter_catalog(&session, &CatalogFilter::from_inputs("MUF", "", "", None));
        assert_eq!(muffin.len(), 1);
        assert_eq!(muffin[0].name, "Muffin");
    }

    #[tokio::test]
    async fn test_malformed_bound_is_ignored() {
        let session = OrderSession::load(RecordingStore::menu()).await.unwrap();

        let cheap = filter_catalog(&session, &CatalogFilter::from_inputs("", "abc", "2.75", None));
        assert_eq!(cheap.len(), 1);
        assert_eq!(cheap[0].name, "Latte");
    }
}
