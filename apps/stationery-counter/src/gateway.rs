//! # Session Seams
//!
//! The session only talks to two traits. Production wires them to the
//! database; tests swap in recording fakes.
//!
//! ```text
//!                 ┌──────────────────┐
//!                 │     Session      │
//!                 └────┬────────┬────┘
//!                      │        │
//!          &dyn Catalog│        │&dyn OrderGateway
//!                      ▼        ▼
//!   ┌─────────────────────┐  ┌─────────────────────┐
//!   │ StaticCatalog       │  │ Database            │
//!   │ ProductRepository   │  │ (customers, orders) │
//!   └─────────────────────┘  └─────────────────────┘
//! ```

use async_trait::async_trait;

use stationery_core::{OrderItem, Product, StaticCatalog, SummaryLine};
use stationery_db::{Database, DbResult, ProductRepository};

/// Read-only product lookup for one session.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Every product, ordered by id.
    async fn list(&self) -> DbResult<Vec<Product>>;

    async fn get(&self, id: i64) -> DbResult<Option<Product>>;

    async fn exists(&self, id: i64) -> DbResult<bool>;
}

/// Customer registration and order persistence.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Inserts a customer and returns its storage id.
    async fn register_customer(&self, name: &str) -> DbResult<i64>;

    async fn record_order_item(
        &self,
        customer_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> DbResult<()>;

    /// Writes a whole order. Defaults to one `record_order_item` per item.
    async fn record_order_items(&self, customer_id: i64, items: &[OrderItem]) -> DbResult<usize> {
        for item in items {
            self.record_order_item(customer_id, item.product_id(), item.quantity)
                .await?;
        }
        Ok(items.len())
    }

    /// The customer's persisted rows, in insertion order.
    async fn fetch_summary(&self, customer_id: i64) -> DbResult<Vec<SummaryLine>>;
}

// =============================================================================
// Catalog implementations
// =============================================================================

#[async_trait]
impl Catalog for StaticCatalog {
    async fn list(&self) -> DbResult<Vec<Product>> {
        Ok(StaticCatalog::list(self).to_vec())
    }

    async fn get(&self, id: i64) -> DbResult<Option<Product>> {
        Ok(StaticCatalog::get(self, id).cloned())
    }

    async fn exists(&self, id: i64) -> DbResult<bool> {
        Ok(self.contains(id))
    }
}

#[async_trait]
impl Catalog for ProductRepository {
    async fn list(&self) -> DbResult<Vec<Product>> {
        ProductRepository::list(self).await
    }

    async fn get(&self, id: i64) -> DbResult<Option<Product>> {
        self.get_by_id(id).await
    }

    async fn exists(&self, id: i64) -> DbResult<bool> {
        ProductRepository::exists(self, id).await
    }
}

// =============================================================================
// Gateway implementation
// =============================================================================

#[async_trait]
impl OrderGateway for Database {
    async fn register_customer(&self, name: &str) -> DbResult<i64> {
        self.customers().register(name).await
    }

    async fn record_order_item(
        &self,
        customer_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> DbResult<()> {
        self.orders()
            .record_item(customer_id, product_id, quantity)
            .await
    }

    async fn record_order_items(&self, customer_id: i64, items: &[OrderItem]) -> DbResult<usize> {
        self.orders().record_items(customer_id, items).await
    }

    async fn fetch_summary(&self, customer_id: i64) -> DbResult<Vec<SummaryLine>> {
        self.orders().fetch_summary(customer_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stationery_db::{DbConfig, FlushMode};

    #[tokio::test]
    async fn test_static_and_database_catalogs_agree() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let stored = db.products();
        let seeded = StaticCatalog::seeded();

        let catalogs: [&dyn Catalog; 2] = [&seeded, &stored];
        for catalog in catalogs {
            assert_eq!(catalog.list().await.unwrap().len(), 10);
            assert!(catalog.exists(10).await.unwrap());
            assert!(!catalog.exists(11).await.unwrap());
            assert!(!catalog.exists(0).await.unwrap());
            assert_eq!(
                catalog.get(4).await.unwrap(),
                Some(Product::new(4, "Marker", 15))
            );
        }
    }

    #[tokio::test]
    async fn test_database_gateway_round_trip() {
        let db = Database::new(DbConfig::in_memory().flush_mode(FlushMode::PerItem))
            .await
            .unwrap();
        let gateway: &dyn OrderGateway = &db;

        let customer_id = gateway.register_customer("Anita Rao").await.unwrap();
        gateway.record_order_item(customer_id, 6, 12).await.unwrap();

        let lines = gateway.fetch_summary(customer_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].render("Rupees"), "Pencil (x12): Rupees 60");
    }
}
