//! # Order Repository
//!
//! Persists order rows and reads back the customer's summary.
//!
//! ## Flush Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Flush                                       │
//! │                                                                         │
//! │  In-memory Order: [Notebook x2, Pen x3]                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  record_items(customer_id, items)                                      │
//! │       │                                                                 │
//! │       ├── FlushMode::Atomic   BEGIN; INSERT; INSERT; COMMIT            │
//! │       │                       (a failing insert rolls back every row)  │
//! │       │                                                                 │
//! │       └── FlushMode::PerItem  INSERT; INSERT  (each autocommitted,     │
//! │                               rows before a failure stay persisted)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fetch_summary(customer_id)                                            │
//! │       └── orders ⋈ customers ⋈ products, ORDER BY orders.id            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use stationery_core::validation::validate_quantity;
use stationery_core::{OrderItem, SummaryLine};

const INSERT_ORDER_ROW: &str = r#"
    INSERT INTO orders (customer_id, product_id, quantity, ordered_at)
    VALUES (?1, ?2, ?3, ?4)
"#;

/// How a whole order is written to the orders table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlushMode {
    /// One transaction for the whole order.
    #[default]
    Atomic,
    /// One autocommitted insert per line item.
    PerItem,
}

/// Repository for order-row database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
    flush_mode: FlushMode,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool, flush_mode: FlushMode) -> Self {
        OrderRepository { pool, flush_mode }
    }

    /// Inserts one order row.
    ///
    /// Quantities the in-memory order would refuse are rejected before
    /// anything is written.
    pub async fn record_item(&self, customer_id: i64, product_id: i64, quantity: i64) -> DbResult<()> {
        debug!(customer_id, product_id, quantity, "Recording order row");
        check_quantity(quantity)?;

        sqlx::query(INSERT_ORDER_ROW)
            .bind(customer_id)
            .bind(product_id)
            .bind(quantity)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Writes every line item of an order, honoring the flush mode.
    ///
    /// ## Returns
    /// Number of rows written.
    pub async fn record_items(&self, customer_id: i64, items: &[OrderItem]) -> DbResult<usize> {
        info!(
            customer_id,
            items = items.len(),
            mode = ?self.flush_mode,
            "Flushing order"
        );

        match self.flush_mode {
            FlushMode::PerItem => {
                for item in items {
                    self.record_item(customer_id, item.product_id(), item.quantity)
                        .await?;
                }
            }
            FlushMode::Atomic => {
                let mut tx = self
                    .pool
                    .begin()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

                for item in items {
                    insert_in(&mut tx, customer_id, item).await?;
                }

                tx.commit()
                    .await
                    .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
            }
        }

        Ok(items.len())
    }

    /// Reads the customer's persisted order through the three-way join.
    ///
    /// Rows come back in insertion order (`orders.id`).
    pub async fn fetch_summary(&self, customer_id: i64) -> DbResult<Vec<SummaryLine>> {
        let lines = sqlx::query_as::<_, SummaryLine>(
            r#"
            SELECT
                c.name AS customer_name,
                p.name AS product_name,
                o.quantity AS quantity,
                CAST(p.price * o.quantity AS INTEGER) AS line_total
            FROM orders o
            JOIN customers c ON o.customer_id = c.id
            JOIN products p ON o.product_id = p.id
            WHERE o.customer_id = ?1
            ORDER BY o.id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(customer_id, rows = lines.len(), "Fetched order summary");
        Ok(lines)
    }

    /// Counts the order rows stored for a customer.
    pub async fn count_for_customer(&self, customer_id: i64) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders WHERE customer_id = ?1")
            .bind(customer_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Inserts one order row inside an open transaction.
async fn insert_in(
    tx: &mut Transaction<'_, Sqlite>,
    customer_id: i64,
    item: &OrderItem,
) -> DbResult<()> {
    check_quantity(item.quantity)?;

    sqlx::query(INSERT_ORDER_ROW)
        .bind(customer_id)
        .bind(item.product_id())
        .bind(item.quantity)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;

    Ok(())
}

fn check_quantity(quantity: i64) -> DbResult<()> {
    validate_quantity(quantity).map_err(|e| DbError::ConstraintViolation {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use stationery_core::{Order, Product, StaticCatalog};

    async fn setup(mode: FlushMode) -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory().flush_mode(mode))
            .await
            .unwrap();
        let customer_id = db.customers().register("John Smith").await.unwrap();
        (db, customer_id)
    }

    fn product(id: i64) -> Product {
        StaticCatalog::seeded().get(id).unwrap().clone()
    }

    #[tokio::test]
    async fn test_notebook_summary() {
        let (db, customer_id) = setup(FlushMode::Atomic).await;

        let mut order = Order::new();
        order.add(product(2), 3).unwrap();
        order.add(product(2), 2).unwrap();
        order.remove_at(1).unwrap();

        let written = db.orders().record_items(customer_id, order.items()).await.unwrap();
        assert_eq!(written, 1);

        let lines = db.orders().fetch_summary(customer_id).await.unwrap();
        assert_eq!(
            lines,
            vec![SummaryLine {
                customer_name: "John Smith".to_string(),
                product_name: "Notebook".to_string(),
                quantity: 2,
                line_total: 100,
            }]
        );
    }

    #[tokio::test]
    async fn test_summary_total_matches_rows_in_insert_order() {
        let (db, customer_id) = setup(FlushMode::PerItem).await;
        let orders = db.orders();

        orders.record_item(customer_id, 10, 1).await.unwrap();
        orders.record_item(customer_id, 1, 4).await.unwrap();
        orders.record_item(customer_id, 8, 2).await.unwrap();

        let lines = orders.fetch_summary(customer_id).await.unwrap();
        let names: Vec<&str> = lines.iter().map(|l| l.product_name.as_str()).collect();
        assert_eq!(names, ["Scissors", "Pen", "Stapler"]);

        let total: i64 = lines.iter().map(|l| l.line_total).sum();
        assert_eq!(total, 60 + 4 * 10 + 2 * 55);
    }

    #[tokio::test]
    async fn test_summary_is_scoped_to_customer() {
        let (db, first) = setup(FlushMode::Atomic).await;
        let second = db.customers().register("Anita Rao").await.unwrap();

        db.orders().record_item(first, 1, 1).await.unwrap();
        db.orders().record_item(second, 3, 7).await.unwrap();

        let lines = db.orders().fetch_summary(second).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].customer_name, "Anita Rao");
        assert_eq!(lines[0].line_total, 35);
    }

    #[tokio::test]
    async fn test_empty_flush_writes_nothing() {
        let (db, customer_id) = setup(FlushMode::Atomic).await;

        let written = db.orders().record_items(customer_id, &[]).await.unwrap();

        assert_eq!(written, 0);
        assert!(db.orders().fetch_summary(customer_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_is_foreign_key_violation() {
        let (db, customer_id) = setup(FlushMode::PerItem).await;

        let err = db.orders().record_item(customer_id, 99, 1).await.unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    fn order_with_bad_tail() -> Order {
        let mut order = Order::new();
        order.add(product(1), 2).unwrap();
        order.add(product(3), 1).unwrap();
        // Not in the products table
        order.add(Product::new(42, "Compass", 80), 1).unwrap();
        order
    }

    #[tokio::test]
    async fn test_atomic_flush_rolls_back_on_failure() {
        let (db, customer_id) = setup(FlushMode::Atomic).await;

        let result = db
            .orders()
            .record_items(customer_id, order_with_bad_tail().items())
            .await;

        assert!(result.is_err());
        assert_eq!(db.orders().count_for_customer(customer_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_per_item_flush_keeps_earlier_rows() {
        let (db, customer_id) = setup(FlushMode::PerItem).await;

        let result = db
            .orders()
            .record_items(customer_id, order_with_bad_tail().items())
            .await;

        assert!(result.is_err());
        assert_eq!(db.orders().count_for_customer(customer_id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_oversized_quantity_is_rejected_before_insert() {
        let (db, customer_id) = setup(FlushMode::PerItem).await;

        let err = db
            .orders()
            .record_item(customer_id, 10, 200_000_000_000_000_000)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ConstraintViolation { .. }));
        assert_eq!(db.orders().count_for_customer(customer_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_largest_quantity_sums_as_integer() {
        let (db, customer_id) = setup(FlushMode::PerItem).await;

        db.orders()
            .record_item(customer_id, 10, i64::from(i32::MAX))
            .await
            .unwrap();

        let lines = db.orders().fetch_summary(customer_id).await.unwrap();
        assert_eq!(lines[0].line_total, 60 * i64::from(i32::MAX));
    }
}
