//! # Validation Module
//!
//! Input validation for the counter session.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console session                                              │
//! │  ├── Token parsing (is it an integer at all?)                          │
//! │  └── Re-prompt on bad input                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Customer name format                                              │
//! │  └── Quantity > 0                                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stationery_core::validation::{validate_customer_name, validate_quantity};
//!
//! assert!(validate_customer_name("John Smith").is_ok());
//! assert!(validate_customer_name("John123").is_err());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length accepted for a customer name.
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;

/// Largest quantity a single line item may carry.
pub const MAX_QUANTITY: i64 = i32::MAX as i64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name.
///
/// ## Rules
/// - Must not be empty
/// - Letters and whitespace only, the `^[A-Za-z\s]+$` rule
/// - At most [`MAX_CUSTOMER_NAME_LEN`] characters
///
/// ## Example
/// ```rust
/// use stationery_core::validation::validate_customer_name;
///
/// assert!(validate_customer_name("Anita Rao").is_ok());
/// assert!(validate_customer_name("").is_err());
/// assert!(validate_customer_name("R2-D2").is_err());
/// ```
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer name".to_string(),
        });
    }

    if name.chars().count() > MAX_CUSTOMER_NAME_LEN {
        return Err(ValidationError::OutOfRange {
            field: "customer name length".to_string(),
            min: 1,
            max: MAX_CUSTOMER_NAME_LEN as i64,
        });
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        return Err(ValidationError::InvalidFormat {
            field: "customer name".to_string(),
            reason: "must contain only letters and spaces".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - At most [`MAX_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("John Smith").is_ok());
        assert!(validate_customer_name("anita").is_ok());
        assert!(validate_customer_name("Mary  Ann\tLee").is_ok());

        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("John123").is_err());
        assert!(validate_customer_name("O'Brien").is_err());
        assert!(validate_customer_name("Jane-Doe").is_err());
        assert!(validate_customer_name("José").is_err());
        assert!(validate_customer_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_name_error_kinds() {
        assert!(matches!(
            validate_customer_name(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_customer_name("John123"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(500).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_quantity_upper_bound() {
        assert_eq!(
            validate_quantity(MAX_QUANTITY + 1),
            Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_QUANTITY,
            })
        );
        assert!(matches!(
            validate_quantity(200_000_000_000_000_000),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
