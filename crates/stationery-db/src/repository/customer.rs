//! # Customer Repository
//!
//! Registers the session's customer and hands back the generated id.

use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Inserts a customer and returns the storage-generated id.
    ///
    /// ## Returns
    /// * `Ok(id)` - Row inserted, id read back in the same statement
    /// * `Err(DbError::RegistrationFailed)` - Insert produced no id
    pub async fn register(&self, name: &str) -> DbResult<i64> {
        debug!(name = %name, "Registering customer");

        let id: Option<i64> =
            sqlx::query_scalar("INSERT INTO customers (name) VALUES (?1) RETURNING id")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        match id {
            Some(id) => {
                debug!(id, "Customer registered");
                Ok(id)
            }
            None => {
                warn!(name = %name, "Customer insert returned no id");
                Err(DbError::RegistrationFailed {
                    name: name.to_string(),
                })
            }
        }
    }
}
