//! # Domain Types
//!
//! Core domain types shared by the database layer and the console session.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Customer     │   │  SummaryLine    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (storage)   │   │  customer_name  │       │
//! │  │  name           │   │  name           │   │  product_name   │       │
//! │  │  price          │   └─────────────────┘   │  quantity       │       │
//! │  └─────────────────┘                         │  line_total     │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  Customer 1──* orders row *──1 Product                                 │
//! │  (the in-memory Order is never stored as a whole, only its rows)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Immutable once constructed. Line items hold a clone, so a product is
/// never edited through an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Catalog identifier (positive, unique).
    pub id: i64,

    /// Display name shown on the catalog listing and the summary.
    pub name: String,

    /// Unit price in the smallest currency unit.
    pub price: i64,
}

impl Product {
    /// Creates a product.
    pub fn new(id: i64, name: impl Into<String>, price: i64) -> Self {
        Product {
            id,
            name: name.into(),
            price,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::new(self.price)
    }

    /// Catalog listing line, e.g. `2. Notebook (Rupees 50)`.
    pub fn listing(&self, currency: &str) -> String {
        format!(
            "{}. {} ({})",
            self.id,
            self.name,
            self.unit_price().labelled(currency)
        )
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.listing(crate::DEFAULT_CURRENCY_LABEL))
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer. The id is assigned by storage on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
}

// =============================================================================
// Summary
// =============================================================================

/// One row of the orders × customers × products join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SummaryLine {
    pub customer_name: String,
    pub product_name: String,
    pub quantity: i64,
    /// `price × quantity`, computed by the query.
    pub line_total: i64,
}

impl SummaryLine {
    /// Returns the line total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::new(self.line_total)
    }

    /// Summary line, e.g. `Notebook (x2): Rupees 100`.
    pub fn render(&self, currency: &str) -> String {
        format!(
            "{} (x{}): {}",
            self.product_name,
            self.quantity,
            self.total().labelled(currency)
        )
    }
}

/// The persisted order of one customer, with its grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub total: Money,
}

impl OrderSummary {
    /// Builds a summary, summing the line totals.
    pub fn from_lines(lines: Vec<SummaryLine>) -> Self {
        let total = lines.iter().map(SummaryLine::total).sum();
        OrderSummary { lines, total }
    }

    /// Returns true when the customer has no persisted rows.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product: &str, quantity: i64, line_total: i64) -> SummaryLine {
        SummaryLine {
            customer_name: "John Smith".to_string(),
            product_name: product.to_string(),
            quantity,
            line_total,
        }
    }

    #[test]
    fn test_product_listing() {
        let product = Product::new(2, "Notebook", 50);
        assert_eq!(product.listing("Rupees"), "2. Notebook (Rupees 50)");
        assert_eq!(product.to_string(), "2. Notebook (Rupees 50)");
        assert_eq!(product.unit_price().amount(), 50);
    }

    #[test]
    fn test_summary_line_render() {
        assert_eq!(
            line("Notebook", 2, 100).render("Rupees"),
            "Notebook (x2): Rupees 100"
        );
    }

    #[test]
    fn test_summary_total() {
        let summary =
            OrderSummary::from_lines(vec![line("Notebook", 2, 100), line("Pen", 3, 30)]);
        assert_eq!(summary.total.amount(), 130);
        assert!(!summary.is_empty());

        let empty = OrderSummary::from_lines(Vec::new());
        assert!(empty.is_empty());
        assert!(empty.total.is_zero());
    }
}
