//! # State Module
//!
//! Application state for the counter.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │  OrderSession<S>             │   │  ConfigState                 │   │
//! │  │                              │   │                              │   │
//! │  │  store (injected)            │   │  store_name                  │   │
//! │  │  catalog / discounts (cache) │   │  low_stock_threshold         │   │
//! │  │  cart (pending order)        │   │  top_products_limit          │   │
//! │  │                              │   │  database_path               │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  • OrderSession: mutated only through `&mut` by one actor              │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{ConfigState, DEFAULT_TOP_PRODUCTS_LIMIT};
pub use session::OrderSession;
