//! # Domain Errors
//!
//! `CoreError` is a refused business rule; `ValidationError` is a malformed
//! payload caught before any lookup. The storage crate wraps both in
//! `FulfillmentError`, and the API maps them to HTTP statuses:
//!
//! ```text
//! NotFound                               404
//! IdentityChanged / NoQuantityChange     400
//! DiscountNotApplicable                  400  (body carries the discount)
//! InsufficientStock                      409
//! Validation                             400
//! ```
//!
//! Short stock on create is not an error: it is `OrderOutcome::Deferred`.

use thiserror::Error;

use crate::money::Money;
use crate::types::Discount;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced resource does not exist.
    ///
    /// Carries resource name, field and value so the message reads
    /// `"Order not found with Id : 42"`.
    #[error("{resource} not found with {field} : {value}")]
    NotFound {
        resource: String,
        field: String,
        value: String,
    },

    /// An order update tried to change its customer or product.
    ///
    /// ## User Workflow
    /// ```text
    /// PUT /orders/{id} { productId: OTHER, ... }
    ///      │
    ///      ▼
    /// stored.product_id != request.product_id
    ///      │
    ///      ▼
    /// IdentityChanged → 400
    /// ```
    #[error("Can't update : Customer or Product is not same : Only Quantity can be updated")]
    IdentityChanged,

    /// An order update requested the quantity the order already has.
    #[error("No change in previous and current quantity")]
    NoQuantityChange,

    /// Not enough stock to increase an existing order.
    #[error(
        "Can't update the order : insufficient stock for product {product_id}: \
         available {available}, requested {requested}"
    )]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// The order subtotal is below the discount's minimum price.
    ///
    /// Aborts the whole order operation; the rejected discount travels
    /// with the error so the API can return it as the response body.
    #[error(
        "This Discount can not be applied : amount {subtotal} is less than minimum price {min_price}"
    )]
    DiscountNotApplicable {
        discount: Box<Discount>,
        subtotal: Money,
        min_price: Money,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a NotFound error keyed by the resource's `Id` field.
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            resource: resource.into(),
            field: "Id".to_string(),
            value: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements and are checked
/// before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format or inconsistent combination of values.
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
    fn test_not_found_message() {
        let err = CoreError::not_found("Order", "42");
        assert_eq!(err.to_string(), "Order not found with Id : 42");
    }

    #[test]
    fn test_insufficient_stock_message() {
        let err = CoreError::InsufficientStock {
            product_id: "p-1".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Can't update the order : insufficient stock for product p-1: available 3, requested 5"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
