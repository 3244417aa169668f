//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`BREW_*`)
//! 2. Defaults (this file)
//!
//! Read-only after startup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use brew_core::DEFAULT_LOW_STOCK_THRESHOLD;

/// Default number of rows in the top-products report.
pub const DEFAULT_TOP_PRODUCTS_LIMIT: u32 = 10;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (receipt header: `**** <name> Receipt ****`)
    pub store_name: String,

    /// Products with stock strictly below this show up as low stock
    pub low_stock_threshold: i64,

    /// Rows in the top-products report
    pub top_products_limit: u32,

    /// Explicit database file; `None` uses the platform data directory
    pub database_path: Option<PathBuf>,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: "Coffee Order".to_string(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            top_products_limit: DEFAULT_TOP_PRODUCTS_LIMIT,
            database_path: None,
        }
    }
}

impl ConfigState {
    /// Loads configuration from environment variables.
    ///
    /// ## Environment Variables
    /// - `BREW_STORE_NAME`: receipt header name
    /// - `BREW_LOW_STOCK_THRESHOLD`: low stock report threshold
    /// - `BREW_TOP_PRODUCTS_LIMIT`: top products report size
    /// - `BREW_DB_PATH`: database file
    ///
    /// Values that do not parse keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("BREW_STORE_NAME") {
            let store_name = store_name.trim();
            if !store_name.is_empty() {
                config.store_name = store_name.to_string();
            }
        }

        if let Some(threshold) = lookup("BREW_LOW_STOCK_THRESHOLD") {
            if let Ok(threshold) = threshold.trim().parse::<i64>() {
                config.low_stock_threshold = threshold;
            }
        }

        if let Some(limit) = lookup("BREW_TOP_PRODUCTS_LIMIT") {
            if let Ok(limit) = limit.trim().parse::<u32>() {
                config.top_products_limit = limit;
            }
        }

        if let Some(path) = lookup("BREW_DB_PATH") {
            if !path.trim().is_empty() {
                config.database_path = Some(PathBuf::from(path));
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup(&[]));
        assert_eq!(config.store_name, "Coffee Order");
        assert_eq!(config.low_stock_threshold, 5);
        assert_eq!(config.top_products_limit, 10);
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("BREW_STORE_NAME", "Corner Beans"),
            ("BREW_LOW_STOCK_THRESHOLD", "3"),
            ("BREW_TOP_PRODUCTS_LIMIT", "oops"),
            ("BREW_DB_PATH", "/tmp/brew.db"),
        ]));
        assert_eq!(config.store_name, "Corner Beans");
        assert_eq!(config.low_stock_threshold, 3);
        assert_eq!(config.top_products_limit, 10);
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/brew.db")));
    }
}
