//! # Counter Commands
//!
//! Every operation the terminal (or any other front end) can ask of a
//! running order session.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Menu filtering
//! ├── cart.rs     ◄─── Add item, cancel order, cart view
//! ├── discount.rs ◄─── Apply a discount code
//! ├── order.rs    ◄─── Complete order, receipt rendering
//! ├── stock.rs    ◄─── Stock commit forwarding
//! ├── admin.rs    ◄─── Product and discount code administration
//! └── report.rs   ◄─── Invoice history and read-only reports
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  cli.rs parses:   add 1 2 hot                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_item(                                              │
//! │      &mut session,        ◄── OrderSession<S>, the only actor          │
//! │      product_id, quantity, temperature,                                 │
//! │  ) -> Result<CartView, ApiError>                                        │
//! │         │                                                               │
//! │         ├── brew-core: check + mutate in memory                        │
//! │         └── S: OrderStore: persist, await, surface failure             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands that only take orders need `S: OrderStore`. Administration and
//! reports need the wider `S: BackOfficeStore`.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod discount;
pub mod order;
pub mod report;
pub mod stock;
