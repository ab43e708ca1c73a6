//! # Discount Evaluator
//!
//! Decides whether a discount applies to an order and computes the amount
//! to charge.
//!
//! ## Amount Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   unit_price × quantity = subtotal                                     │
//! │                              │                                          │
//! │            ┌─────────────────┴──────────────────┐                       │
//! │            ▼                                    ▼                       │
//! │      no discount                        discount present                │
//! │      amount = subtotal                         │                        │
//! │                            ┌───────────────────┴─────────────┐          │
//! │                            ▼                                 ▼          │
//! │                 min_price <= subtotal             min_price > subtotal │
//! │                 amount = subtotal - pct           DiscountNotApplicable │
//! │                          (half up)                (whole op aborts)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The activity window is NOT consulted here. An expired discount still
//! applies to an order if the subtotal clears its minimum price.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::resource;
use crate::types::Discount;

// =============================================================================
// Discount Lookup
// =============================================================================

/// How a missing discount reference is treated.
///
/// | Entry point   | Missing id             |
/// |---------------|------------------------|
/// | order create  | `Lenient`: no discount |
/// | order update  | `Strict`: NotFound     |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountLookup {
    Strict,
    Lenient,
}

impl DiscountLookup {
    /// Resolves the result of fetching discount `id`.
    pub fn resolve(self, id: &str, found: Option<Discount>) -> CoreResult<Option<Discount>> {
        match (found, self) {
            (Some(discount), _) => Ok(Some(discount)),
            (None, DiscountLookup::Lenient) => Ok(None),
            (None, DiscountLookup::Strict) => Err(CoreError::not_found(resource::DISCOUNT, id)),
        }
    }
}

// =============================================================================
// Amount Computation
// =============================================================================

/// Computes the amount charged for `quantity` units at `unit_price`.
///
/// ```rust
/// use chrono::Utc;
/// use store_core::discount::compute_amount;
/// use store_core::money::Money;
/// use store_core::Discount;
///
/// let discount = Discount {
///     id: "d-1".into(),
///     name: "Ten off".into(),
///     description: None,
///     value_bps: 1000,
///     start_date_time: Utc::now(),
///     end_date_time: Utc::now(),
///     min_price_cents: 5000,
///     coupon_code: None,
/// };
///
/// // 3 × $20 = $60 clears the $50 minimum: 10% off
/// let amount = compute_amount(Money::from_cents(2000), 3, Some(&discount)).unwrap();
/// assert_eq!(amount.cents(), 5400);
///
/// // 2 × $20 = $40 does not
/// assert!(compute_amount(Money::from_cents(2000), 2, Some(&discount)).is_err());
/// ```
pub fn compute_amount(
    unit_price: Money,
    quantity: i64,
    discount: Option<&Discount>,
) -> CoreResult<Money> {
    let subtotal = unit_price
        .checked_multiply_quantity(quantity)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::MAX / unit_price.cents().max(1),
        })?;

    let Some(discount) = discount else {
        return Ok(subtotal);
    };

    let min_price = discount.min_price();
    if min_price > subtotal {
        return Err(CoreError::DiscountNotApplicable {
            discount: Box::new(discount.clone()),
            subtotal,
            min_price,
        });
    }

    Ok(subtotal.apply_discount(discount.rate()))
}

/// Keeps only discounts whose window contains `now`.
pub fn active_discounts(discounts: Vec<Discount>, now: DateTime<Utc>) -> Vec<Discount> {
    discounts.into_iter().filter(|d| d.is_active(now)).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
