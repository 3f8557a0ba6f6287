//! # stationery-db: Database Layer for the Stationery Counter
//!
//! This crate provides database access for the counter.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Stationery Counter Data Flow                        │
//! │                                                                         │
//! │  Console Session (register, flush, summary)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  stationery-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │◄───│ ProductRepo    │   │ 001_schema   │  │   │
//! │  │   │ SqlitePool    │    │ CustomerRepo   │   │ 002_seed     │  │   │
//! │  │   │               │    │ OrderRepo      │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: products / customers / orders                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, customer, order)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stationery_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("sqlite://stationery.db")).await?;
//!
//! let customer_id = db.customers().register("John Smith").await?;
//! db.orders().record_item(customer_id, 2, 3).await?;
//! let summary = db.orders().fetch_summary(customer_id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::customer::CustomerRepository;
pub use repository::order::{FlushMode, OrderRepository};
pub use repository::product::ProductRepository;
