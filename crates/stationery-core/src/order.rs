//! # Order
//!
//! The in-memory order a customer builds during one session.
//!
//! ## Order Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Operations                                     │
//! │                                                                         │
//! │  Console Command          Order Method           State Change           │
//! │  ───────────────          ────────────           ────────────           │
//! │                                                                         │
//! │  product id p ──────────► add(product, qty) ───► items.push(item)      │
//! │                                                                         │
//! │  -1 ────────────────────► remove_at(pos) ──────► items.remove(pos-1)   │
//! │                                                                         │
//! │  -2 ────────────────────► reduce_at(pos, n) ───► items[pos-1].qty -= n │
//! │                                                  (removed at zero)     │
//! │                                                                         │
//! │  0 (finish) ────────────► items() ─────────────► (read only, flushed)  │
//! │                                                                         │
//! │  NOTE: Nothing here touches storage. The session flushes explicitly.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Positions
//! Positions are 1-based and follow the display ordering. Removing an item
//! shifts every later item's position down by one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::validation::validate_quantity;

// =============================================================================
// Order Item
// =============================================================================

/// One line item: a product and how many of it.
///
/// ## Invariant
/// `quantity > 0` for as long as the item sits in an [`Order`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Copy of the catalog product at the time it was added.
    pub product: Product,

    /// Quantity ordered.
    pub quantity: i64,
}

impl OrderItem {
    /// Product identifier, as persisted in the orders table.
    #[inline]
    pub fn product_id(&self) -> i64 {
        self.product.id
    }

    /// Calculates the line total (unit price × quantity).
    ///
    /// Items built through [`Order::add`] never saturate.
    pub fn line_total(&self) -> Money {
        self.product
            .unit_price()
            .saturating_multiply_quantity(self.quantity)
    }

    /// Order listing line, e.g. `Notebook (x3): Rupees 150`.
    pub fn render(&self, currency: &str) -> String {
        format!(
            "{} (x{}): {}",
            self.product.name,
            self.quantity,
            self.line_total().labelled(currency)
        )
    }
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(crate::DEFAULT_CURRENCY_LABEL))
    }
}

// =============================================================================
// Reduction outcome
// =============================================================================

/// What [`Order::reduce_at`] did to the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduction {
    /// The item is still in the order with the new quantity.
    Reduced { remaining: i64 },
    /// The quantity reached zero and the item was dropped.
    Removed(OrderItem),
}

// =============================================================================
// Order
// =============================================================================

/// The in-memory order.
///
/// ## Invariants
/// - Every item has `quantity > 0`
/// - The same product may appear in several items; adds never merge
/// - Insertion order only matters for display positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    items: Vec<OrderItem>,

    /// When the order was opened.
    pub opened_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new empty order.
    pub fn new() -> Self {
        Order {
            items: Vec::new(),
            opened_at: Utc::now(),
        }
    }

    /// Appends a new line item.
    ///
    /// ## Behavior
    /// - Quantity must be positive, otherwise the order is left unchanged
    ///   and the validation error is returned
    /// - Quantity is capped at [`MAX_QUANTITY`](crate::validation::MAX_QUANTITY)
    /// - The line total, and the order total with it, must fit in [`Money`]
    /// - A product already in the order gets a second line, not a merge
    pub fn add(&mut self, product: Product, quantity: i64) -> CoreResult<&OrderItem> {
        validate_quantity(quantity)?;

        let overflow = || CoreError::AmountOverflow {
            price: product.price,
            quantity,
        };
        let line_total = product
            .unit_price()
            .checked_multiply_quantity(quantity)
            .ok_or_else(overflow)?;
        self.total().checked_add(line_total).ok_or_else(overflow)?;

        self.items.push(OrderItem { product, quantity });
        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    /// Removes the item at a 1-based position and returns it.
    pub fn remove_at(&mut self, position: i64) -> CoreResult<OrderItem> {
        let index = self.index_of(position)?;
        Ok(self.items.remove(index))
    }

    /// Reduces the quantity of the item at a 1-based position.
    ///
    /// ## Behavior
    /// ```text
    /// item: Pen (x3)
    ///
    /// reduce_at(1, 1) ──► Reduced { remaining: 2 }
    /// reduce_at(1, 3) ──► Removed(Pen)            (hit exactly zero)
    /// reduce_at(1, 4) ──► InvalidReduceAmount     (item unchanged)
    /// reduce_at(1, 0) ──► InvalidReduceAmount     (item unchanged)
    /// ```
    pub fn reduce_at(&mut self, position: i64, amount: i64) -> CoreResult<Reduction> {
        let index = self.index_of(position)?;
        let available = self.items[index].quantity;

        if amount <= 0 || amount > available {
            return Err(CoreError::InvalidReduceAmount {
                requested: amount,
                available,
            });
        }

        let remaining = available - amount;
        if remaining == 0 {
            return Ok(Reduction::Removed(self.items.remove(index)));
        }

        self.items[index].quantity = remaining;
        Ok(Reduction::Reduced { remaining })
    }

    /// Read view of the line items, in display order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Number of line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the order is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::line_total).sum()
    }

    /// Maps a 1-based position to an index.
    fn index_of(&self, position: i64) -> CoreResult<usize> {
        if self.items.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        if position < 1 || position > self.items.len() as i64 {
            return Err(CoreError::ItemOutOfRange {
                position,
                len: self.items.len(),
            });
        }

        Ok((position - 1) as usize)
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::validation::MAX_QUANTITY;

    fn notebook() -> Product {
        Product::new(2, "Notebook", 50)
    }

    fn pen() -> Product {
        Product::new(1, "Pen", 10)
    }

    #[test]
    fn test_add_appends_without_merging() {
        let mut order = Order::new();

        order.add(notebook(), 3).unwrap();
        order.add(notebook(), 2).unwrap();

        assert_eq!(order.len(), 2);
        assert_eq!(order.total().amount(), 250);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut order = Order::new();

        let err = order.add(pen(), 0).unwrap_err();
        assert_eq!(
            err,
            CoreError::Validation(ValidationError::MustBePositive {
                field: "quantity".to_string()
            })
        );
        assert!(order.add(pen(), -4).is_err());
        assert!(order.is_empty());
    }

    #[test]
    fn test_add_rejects_oversized_quantity() {
        let mut order = Order::new();
        let scissors = Product::new(10, "Scissors", 60);

        let err = order.add(scissors.clone(), 200_000_000_000_000_000).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(order.is_empty());

        let item = order.add(scissors, MAX_QUANTITY).unwrap();
        assert_eq!(item.line_total().amount(), 60 * MAX_QUANTITY);
        assert_eq!(order.items()[0].to_string(), "Scissors (x2147483647): Rupees 128849018820");
    }

    #[test]
    fn test_add_rejects_line_total_overflow() {
        let mut order = Order::new();
        let bullion = Product::new(11, "Bullion", i64::MAX / 2);

        assert_eq!(
            order.add(bullion.clone(), 3),
            Err(CoreError::AmountOverflow {
                price: i64::MAX / 2,
                quantity: 3
            })
        );

        order.add(bullion.clone(), 2).unwrap();
        assert!(matches!(
            order.add(bullion, 1),
            Err(CoreError::AmountOverflow { .. })
        ));
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn test_notebook_scenario() {
        let mut order = Order::new();

        order.add(notebook(), 3).unwrap();
        order.add(notebook(), 2).unwrap();
        let removed = order.remove_at(1).unwrap();

        assert_eq!(removed.quantity, 3);
        assert_eq!(order.len(), 1);
        assert_eq!(order.items()[0].quantity, 2);
        assert_eq!(order.total().amount(), 100);
        assert_eq!(order.items()[0].to_string(), "Notebook (x2): Rupees 100");
    }

    #[test]
    fn test_remove_shifts_positions() {
        let mut order = Order::new();
        order.add(pen(), 1).unwrap();
        order.add(notebook(), 1).unwrap();
        order.add(Product::new(9, "Glue", 25), 1).unwrap();

        order.remove_at(2).unwrap();

        assert_eq!(order.items()[1].product.name, "Glue");
        assert!(matches!(
            order.remove_at(3),
            Err(CoreError::ItemOutOfRange { position: 3, len: 2 })
        ));
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut order = Order::new();
        order.add(pen(), 1).unwrap();

        assert!(order.remove_at(0).is_err());
        assert!(order.remove_at(-1).is_err());
        assert!(order.remove_at(2).is_err());
        assert_eq!(order.len(), 1);
    }

    #[test]
    fn test_empty_order_reports_no_items() {
        let mut order = Order::new();

        assert_eq!(order.remove_at(1), Err(CoreError::EmptyOrder));
        assert_eq!(order.reduce_at(1, 1), Err(CoreError::EmptyOrder));
        assert!(order.is_empty());
    }

    #[test]
    fn test_reduce_less_than_quantity() {
        let mut order = Order::new();
        order.add(pen(), 3).unwrap();

        let outcome = order.reduce_at(1, 1).unwrap();

        assert_eq!(outcome, Reduction::Reduced { remaining: 2 });
        assert_eq!(order.items()[0].quantity, 2);
    }

    #[test]
    fn test_reduce_equal_to_quantity_removes_item() {
        let mut order = Order::new();
        order.add(pen(), 3).unwrap();
        order.add(notebook(), 1).unwrap();

        let outcome = order.reduce_at(1, 3).unwrap();

        assert!(matches!(outcome, Reduction::Removed(ref item) if item.product.id == 1));
        assert_eq!(order.len(), 1);
        assert_eq!(order.items()[0].product.name, "Notebook");
    }

    #[test]
    fn test_reduce_invalid_amount_leaves_item_unchanged() {
        let mut order = Order::new();
        order.add(pen(), 3).unwrap();

        assert_eq!(
            order.reduce_at(1, 4),
            Err(CoreError::InvalidReduceAmount {
                requested: 4,
                available: 3
            })
        );
        assert!(order.reduce_at(1, 0).is_err());
        assert!(order.reduce_at(2, 1).is_err());
        assert_eq!(order.items()[0].quantity, 3);
    }

    #[test]
    fn test_length_tracks_adds_minus_removals() {
        let mut order = Order::new();
        let mut adds = 0;
        for qty in 1..=6 {
            order.add(pen(), qty).unwrap();
            adds += 1;
        }

        order.remove_at(1).unwrap();
        order.reduce_at(1, 2).unwrap(); // qty 2 → removed
        order.reduce_at(1, 1).unwrap(); // qty 3 → 2, still present

        assert_eq!(order.len(), adds - 2);
    }
}
