//! # Repository Module
//!
//! Database repository implementations for the counter.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Console Session                                                       │
//! │       │                                                                 │
//! │       │  db.orders().record_items(customer_id, order.items())          │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── record_item(&self, customer_id, product_id, quantity)             │
//! │  ├── record_items(&self, customer_id, items)                           │
//! │  └── fetch_summary(&self, customer_id)                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Catalog lookups
//! - [`CustomerRepository`](customer::CustomerRepository) - Customer registration
//! - [`OrderRepository`](order::OrderRepository) - Order rows and the summary join

pub mod customer;
pub mod order;
pub mod product;
