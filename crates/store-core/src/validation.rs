//! # Validation Module
//!
//! Input validation for everything that reaches the store backend.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: axum extractors                                              │
//! │  └── Type validation (JSON deserialization)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation (positive quantity, sane prices...)      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (count >= 0)                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use store_core::validation::validate_quantity;
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::DiscountRate;
use crate::types::{NewBackorder, NewCustomer, NewDiscount, NewProduct, OrderRequest};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted name (products, customers, discounts).
pub const MAX_NAME_LENGTH: usize = 200;

/// Largest order or backorder quantity.
pub const MAX_QUANTITY: i64 = 1_000_000_000;

/// Largest stock count a product may be given. Returned stock can push a
/// count past this, never past `i64`.
pub const MAX_STOCK_COUNT: i64 = 1_000_000_000_000;

/// Largest unit price or minimum price, in cents.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000_000;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a required, bounded text field.
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates an id reference (product, customer...) is present.
pub fn validate_reference(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an order or backorder quantity.
///
/// ## Rules
/// - Must be greater than zero
/// - At most [`MAX_QUANTITY`]
///
/// ```rust
/// use store_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(-3).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    if quantity > MAX_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_QUANTITY,
        });
    }
    Ok(())
}

/// Validates a price or minimum price in cents (zero allowed).
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates a stock count (zero allowed).
pub fn validate_stock_count(count: i64) -> ValidationResult<()> {
    if !(0..=MAX_STOCK_COUNT).contains(&count) {
        return Err(ValidationError::OutOfRange {
            field: "count".to_string(),
            min: 0,
            max: MAX_STOCK_COUNT,
        });
    }
    Ok(())
}

/// Validates a discount value in basis points (0..=10000).
pub fn validate_discount_bps(bps: i64) -> ValidationResult<()> {
    let max = DiscountRate::MAX_BPS as i64;
    if !(0..=max).contains(&bps) {
        return Err(ValidationError::OutOfRange {
            field: "valueBps".to_string(),
            min: 0,
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

pub fn validate_order_request(req: &OrderRequest) -> ValidationResult<()> {
    validate_reference("productId", &req.product_id)?;
    validate_reference("customerId", &req.customer_id)?;
    validate_quantity(req.quantity)
}

pub fn validate_new_backorder(req: &NewBackorder) -> ValidationResult<()> {
    validate_reference("productId", &req.product_id)?;
    validate_reference("customerId", &req.customer_id)?;
    validate_quantity(req.quantity)
}

pub fn validate_new_product(p: &NewProduct) -> ValidationResult<()> {
    validate_name("name", &p.name)?;
    validate_price_cents("priceCents", p.price_cents)?;
    validate_stock_count(p.count)
}

pub fn validate_new_customer(c: &NewCustomer) -> ValidationResult<()> {
    validate_name("fullName", &c.full_name)
}

/// Validates a discount payload.
///
/// ## Rules
/// - Name required
/// - `valueBps` within 0..=10000
/// - `minPriceCents` not negative
/// - Window not inverted (`start <= end`)
pub fn validate_new_discount(d: &NewDiscount) -> ValidationResult<()> {
    validate_name("name", &d.name)?;
    validate_discount_bps(d.value_bps)?;
    validate_price_cents("minPriceCents", d.min_price_cents)?;

    if d.start_date_time > d.end_date_time {
        return Err(ValidationError::InvalidFormat {
            field: "endDateTime".to_string(),
            reason: "must not be before startDateTime".to_string(),
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
    use chrono::{Duration, Utc};

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(1_000_000).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(matches!(
            validate_quantity(MAX_QUANTITY + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_numeric_upper_bounds() {
        assert!(validate_stock_count(MAX_STOCK_COUNT).is_ok());
        assert!(validate_stock_count(MAX_STOCK_COUNT + 1).is_err());
        assert!(validate_price_cents("priceCents", MAX_PRICE_CENTS).is_ok());
        assert!(validate_price_cents("priceCents", i64::MAX).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Milk").is_ok());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_order_request() {
        let mut req = OrderRequest {
            product_id: "p-1".to_string(),
            customer_id: "c-1".to_string(),
            quantity: 2,
            discount_id: None,
        };
        assert!(validate_order_request(&req).is_ok());

        req.customer_id = String::new();
        assert!(matches!(
            validate_order_request(&req),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_new_product_rejects_negative_stock() {
        let p = NewProduct {
            name: "Bread".to_string(),
            description: None,
            price_cents: 120,
            count: -1,
            availability: true,
            expiry: None,
        };
        assert!(validate_new_product(&p).is_err());
    }

    #[test]
    fn test_validate_new_discount() {
        let now = Utc::now();
        let mut d = NewDiscount {
            name: "Weekend".to_string(),
            description: None,
            value_bps: 1500,
            start_date_time: now,
            end_date_time: now + Duration::days(2),
            min_price_cents: 1000,
            coupon_code: Some("WKND".to_string()),
        };
        assert!(validate_new_discount(&d).is_ok());

        d.value_bps = 10_001;
        assert!(validate_new_discount(&d).is_err());

        d.value_bps = 1500;
        d.end_date_time = now - Duration::days(1);
        assert!(matches!(
            validate_new_discount(&d),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
