//! # Fulfillment Rules
//!
//! The stock and quantity decisions behind order create, update and delete.
//! The engine in store-db calls these with rows it loaded inside a
//! transaction and then persists whatever they decide.
//!
//! ## Order Update Decision Table
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────────────────┐
//! │ delta = existing - requested │ effect                                   │
//! ├──────────────────────────────┼──────────────────────────────────────────┤
//! │ delta == 0                   │ NoQuantityChange (400)                   │
//! │ delta <  0  (increase)       │ need -delta more units in stock, else    │
//! │                              │ InsufficientStock (409); stock -= -delta │
//! │ delta >  0  (decrease)       │ stock += delta, then drain backorders    │
//! └──────────────────────────────┴──────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::types::{Order, OrderRequest, Product};

/// How an update changes an order's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Unchanged,
    /// Needs this many more units from stock.
    Increase(i64),
    /// Returns this many units to stock.
    Decrease(i64),
}

impl QuantityChange {
    /// Classifies moving from `existing` to `requested` units.
    pub fn between(existing: i64, requested: i64) -> Self {
        let delta = existing - requested;
        match delta {
            0 => QuantityChange::Unchanged,
            d if d < 0 => QuantityChange::Increase(-d),
            d => QuantityChange::Decrease(d),
        }
    }
}

/// Rejects updates that try to move an order to another customer or product.
pub fn ensure_same_parties(existing: &Order, request: &OrderRequest) -> CoreResult<()> {
    if existing.customer_id != request.customer_id || existing.product_id != request.product_id {
        return Err(CoreError::IdentityChanged);
    }
    Ok(())
}

/// Checks that `extra` more units can be taken for an existing order.
pub fn ensure_can_increase(product: &Product, extra: i64) -> CoreResult<()> {
    if !product.can_supply(extra) {
        return Err(CoreError::InsufficientStock {
            product_id: product.id.clone(),
            available: if product.availability { product.count } else { 0 },
            requested: extra,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order() -> Order {
        Order {
            id: "o-1".to_string(),
            product_id: "p-1".to_string(),
            customer_id: "c-1".to_string(),
            quantity: 5,
            discount_id: None,
            timestamp: Utc::now(),
            amount_cents: 500,
        }
    }

    fn request(product_id: &str, customer_id: &str, quantity: i64) -> OrderRequest {
        OrderRequest {
            product_id: product_id.to_string(),
            customer_id: customer_id.to_string(),
            quantity,
            discount_id: None,
        }
    }

    fn product(count: i64, availability: bool) -> Product {
        let now = Utc::now();
        Product {
            id: "p-1".to_string(),
            name: "Eggs".to_string(),
            description: None,
            price_cents: 100,
            count,
            availability,
            expiry: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_quantity_change_classification() {
        assert_eq!(QuantityChange::between(5, 5), QuantityChange::Unchanged);
        assert_eq!(QuantityChange::between(5, 8), QuantityChange::Increase(3));
        assert_eq!(QuantityChange::between(5, 2), QuantityChange::Decrease(3));
    }

    #[test]
    fn test_same_parties() {
        let existing = order();
        assert!(ensure_same_parties(&existing, &request("p-1", "c-1", 9)).is_ok());
        assert!(matches!(
            ensure_same_parties(&existing, &request("p-2", "c-1", 5)),
            Err(CoreError::IdentityChanged)
        ));
        assert!(matches!(
            ensure_same_parties(&existing, &request("p-1", "c-2", 5)),
            Err(CoreError::IdentityChanged)
        ));
    }

    #[test]
    fn test_increase_needs_stock_and_availability() {
        assert!(ensure_can_increase(&product(3, true), 3).is_ok());

        match ensure_can_increase(&product(2, true), 3) {
            Err(CoreError::InsufficientStock {
                available,
                requested,
                ..
            }) => {
                assert_eq!(available, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("unexpected: {other:?}"),
        }

        assert!(ensure_can_increase(&product(50, false), 1).is_err());
    }
}
