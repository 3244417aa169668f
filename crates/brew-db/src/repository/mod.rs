//! # Repository Module
//!
//! Database repository implementations for the Brew Counter.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Counter command                                                       │
//! │       │                                                                 │
//! │       │  db.products().set_stock(7, 12)                                │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list(&self)                                                       │
//! │  ├── insert(&self, product)                                            │
//! │  ├── update(&self, product)                                            │
//! │  └── set_stock(&self, id, stock)                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and stock writes
//! - [`DiscountCodeRepository`](discount::DiscountCodeRepository) - Code CRUD and usage counter
//! - [`InvoiceRepository`](invoice::InvoiceRepository) - Invoice headers, lines and history
//! - [`ReportRepository`](report::ReportRepository) - Read-only projections

pub mod discount;
pub mod invoice;
pub mod product;
pub mod report;
