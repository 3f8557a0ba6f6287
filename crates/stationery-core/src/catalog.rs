//! # Static Catalog
//!
//! The fixed, in-memory product table.
//!
//! The database seeds the same ten rows (`002_seed_products.sql`), so a
//! session may validate against either source and still record order rows
//! that satisfy the `orders.product_id` foreign key.
//!
//! | id | name        | price |
//! |----|-------------|-------|
//! | 1  | Pen         | 10    |
//! | 2  | Notebook    | 50    |
//! | 3  | Eraser      | 5     |
//! | 4  | Marker      | 15    |
//! | 5  | Folder      | 20    |
//! | 6  | Pencil      | 5     |
//! | 7  | Highlighter | 20    |
//! | 8  | Stapler     | 55    |
//! | 9  | Glue        | 25    |
//! | 10 | Scissors    | 60    |

use crate::types::Product;

/// Seed rows: (name, price). Ids are assigned 1..=10 in this order.
const SEED_PRODUCTS: &[(&str, i64)] = &[
    ("Pen", 10),
    ("Notebook", 50),
    ("Eraser", 5),
    ("Marker", 15),
    ("Folder", 20),
    ("Pencil", 5),
    ("Highlighter", 20),
    ("Stapler", 55),
    ("Glue", 25),
    ("Scissors", 60),
];

/// Read-only product table held in memory.
///
/// Products are kept sorted by id so `list()` needs no extra work.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// The ten seed products, ids 1..=10.
    pub fn seeded() -> Self {
        let products = SEED_PRODUCTS
            .iter()
            .zip(1_i64..)
            .map(|(&(name, price), id)| Product::new(id, name, price))
            .collect();

        StaticCatalog { products }
    }

    /// All products, ordered by id ascending.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: i64) -> Option<&Product> {
        self.products
            .binary_search_by_key(&id, |p| p.id)
            .ok()
            .map(|index| &self.products[index])
    }

    /// Checks whether an id is in the catalog.
    pub fn contains(&self, id: i64) -> bool {
        self.get(id).is_some()
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Checks if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::seeded()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_has_ten_products_in_id_order() {
        let catalog = StaticCatalog::seeded();

        assert_eq!(catalog.len(), 10);
        let ids: Vec<i64> = catalog.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(catalog.list()[0].name, "Pen");
        assert_eq!(catalog.list()[9].name, "Scissors");
    }

    #[test]
    fn test_get() {
        let catalog = StaticCatalog::seeded();

        let notebook = catalog.get(2).unwrap();
        assert_eq!(notebook.name, "Notebook");
        assert_eq!(notebook.price, 50);
        assert_eq!(catalog.get(8).unwrap().price, 55);
    }

    #[test]
    fn test_unknown_ids_are_not_found() {
        let catalog = StaticCatalog::seeded();

        for id in [0, -1, -2, 11, i64::MAX] {
            assert!(catalog.get(id).is_none());
            assert!(!catalog.contains(id));
        }
    }
}
