//! # stationery-core: Pure Business Logic for the Stationery Counter
//!
//! This crate holds the domain of the counter: products, the in-memory
//! order a customer builds up, and the rules that keep it consistent.
//! Nothing in here touches a database or the console.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Stationery Counter Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               Console Session (stationery-counter)              │   │
//! │  │    Catalog ──► Register ──► Collect ──► Flush ──► Summary       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stationery-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   order   │  │  catalog  │  │ validation│  │   │
//! │  │   │  Product  │  │   Order   │  │  Static   │  │   names   │  │   │
//! │  │   │  Summary  │  │ OrderItem │  │  Catalog  │  │quantities │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stationery-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, SummaryLine, ...)
//! - [`money`] - Integer money in the smallest currency unit
//! - [`order`] - The in-memory order and its line items
//! - [`catalog`] - The seeded, in-memory product table
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stationery_core::catalog::StaticCatalog;
//! use stationery_core::order::Order;
//!
//! let catalog = StaticCatalog::seeded();
//! let notebook = catalog.get(2).unwrap().clone();
//!
//! let mut order = Order::new();
//! order.add(notebook.clone(), 3).unwrap();
//! order.add(notebook, 2).unwrap();
//! order.remove_at(1).unwrap();
//!
//! assert_eq!(order.len(), 1);
//! assert_eq!(order.total().amount(), 100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::StaticCatalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, OrderItem, Reduction};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency label printed in front of every amount.
///
/// The counter historically prices everything in whole rupees; the app can
/// override the label, amounts stay in the smallest unit either way.
pub const DEFAULT_CURRENCY_LABEL: &str = "Rupees";
