//! # Error Types
//!
//! Domain-specific error types for stationery-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stationery-core errors (this file)                                    │
//! │  ├── CoreError        - Order / catalog rule violations                │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stationery-db errors (separate crate)                                 │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  stationery-counter errors (app)                                       │
//! │  └── SessionError     - Fatal session faults                           │
//! │                                                                         │
//! │  CoreError / ValidationError are RECOVERABLE: the session prints them  │
//! │  and re-prompts. Only DbError (wrapped in SessionError) is fatal.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Order and catalog rule violations.
///
/// Every variant is a user-input problem: the caller reports it and carries
/// on with the session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Remove/reduce was requested on an order with no line items.
    #[error("Order has no items")]
    EmptyOrder,

    /// A 1-based item position outside `[1, len]`.
    ///
    /// ## When This Occurs
    /// ```text
    /// Current items in your order:
    /// 1. Pen (x2): Rupees 20
    /// 2. Glue (x1): Rupees 25
    ///      │
    ///      ▼
    /// Select the item number to remove: 3
    ///      │
    ///      ▼
    /// ItemOutOfRange { position: 3, len: 2 }
    /// ```
    #[error("Item number {position} is out of range (order has {len} items)")]
    ItemOutOfRange { position: i64, len: usize },

    /// Reduce amount outside `(0, current quantity]`.
    #[error("Cannot reduce by {requested}: item quantity is {available}")]
    InvalidReduceAmount { requested: i64, available: i64 },

    /// `price × quantity` does not fit in the money type.
    #[error("Line total overflows for {quantity} x {price}")]
    AmountOverflow { price: i64, quantity: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. digits in a customer name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemOutOfRange { position: 3, len: 2 };
        assert_eq!(
            err.to_string(),
            "Item number 3 is out of range (order has 2 items)"
        );

        let err = CoreError::InvalidReduceAmount {
            requested: 5,
            available: 2,
        };
        assert_eq!(err.to_string(), "Cannot reduce by 5: item quantity is 2");

        let err = CoreError::AmountOverflow {
            price: 60,
            quantity: i64::MAX,
        };
        assert_eq!(
            err.to_string(),
            "Line total overflows for 9223372036854775807 x 60"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer name".to_string(),
        };
        assert_eq!(err.to_string(), "customer name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
