//! # Domain Types
//!
//! Core domain types used throughout the store backend.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │   Backorder     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │◄──│  product_id     │   │  product_id ───►│ Product│
//! │  │  price_cents    │   │  customer_id ──►│   │  customer_id    │       │
//! │  │  count          │   │  quantity       │   │  quantity       │       │
//! │  │  availability   │   │  discount_id? ─►│   │  timestamp      │       │
//! │  └─────────────────┘   │  amount_cents   │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Customer     │   │    Discount     │                              │
//! │  │  full_name      │   │  value_bps      │                              │
//! │  │  address        │   │  start / end    │                              │
//! │  │  contact_number │   │  min_price_cents│                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! References between entities are plain ID strings fetched on demand; no
//! entity embeds another.
//!
//! ## Inputs vs Entities
//! `New*` structs are what callers send. The server assigns `id` and
//! timestamps when turning them into entities.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::generate_id;
use crate::money::{DiscountRate, Money};

// =============================================================================
// Product
// =============================================================================

/// A product held in stock.
///
/// `count` and `availability` are independent: a sale needs both
/// `availability == true` and enough `count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    pub description: Option<String>,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Units in stock. Never negative.
    pub count: i64,

    /// Manual on/off switch for selling this product.
    pub availability: bool,

    /// Informational only; expired products are still sellable.
    #[ts(as = "Option<String>")]
    pub expiry: Option<NaiveDate>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks if `quantity` units can be taken from stock right now.
    pub fn can_supply(&self, quantity: i64) -> bool {
        self.availability && self.count >= quantity
    }

    /// Replaces every mutable field with the values in `changes`.
    pub fn apply(&mut self, changes: NewProduct, now: DateTime<Utc>) {
        self.name = changes.name;
        self.description = changes.description;
        self.price_cents = changes.price_cents;
        self.count = changes.count;
        self.availability = changes.availability;
        self.expiry = changes.expiry;
        self.updated_at = now;
    }
}

/// Product fields supplied on create and on full update.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    pub count: i64,
    #[serde(default = "default_availability")]
    pub availability: bool,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub expiry: Option<NaiveDate>,
}

fn default_availability() -> bool {
    true
}

impl NewProduct {
    /// Builds a product with a fresh id.
    pub fn into_product(self, now: DateTime<Utc>) -> Product {
        Product {
            id: generate_id(),
            name: self.name,
            description: self.description,
            price_cents: self.price_cents,
            count: self.count,
            availability: self.availability,
            expiry: self.expiry,
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer who places orders. Read-only from the engine's point of view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub full_name: String,
    pub address: Option<String>,
    pub contact_number: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn apply(&mut self, changes: NewCustomer) {
        self.full_name = changes.full_name;
        self.address = changes.address;
        self.contact_number = changes.contact_number;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewCustomer {
    pub full_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
}

impl NewCustomer {
    pub fn into_customer(self, now: DateTime<Utc>) -> Customer {
        Customer {
            id: generate_id(),
            full_name: self.full_name,
            address: self.address,
            contact_number: self.contact_number,
            created_at: now,
        }
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A percentage discount with a minimum order price.
///
/// ## Eligibility vs Activity
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Eligible (orders):   min_price_cents <= subtotal                      │
/// │  Active   (listing):  start_date_time <= now <= end_date_time          │
/// │                                                                         │
/// │  Orders never look at the window. Only GET /discounts/active does.     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Discount {
    pub id: String,
    pub name: String,
    pub description: Option<String>,

    /// Percentage off in basis points (1000 = 10%).
    pub value_bps: i64,

    #[ts(as = "String")]
    pub start_date_time: DateTime<Utc>,

    #[ts(as = "String")]
    pub end_date_time: DateTime<Utc>,

    /// Smallest subtotal the discount applies to.
    pub min_price_cents: i64,

    pub coupon_code: Option<String>,
}

impl Discount {
    /// Returns the percentage as a rate, clamped to 0..=100%.
    pub fn rate(&self) -> DiscountRate {
        DiscountRate::clamped(self.value_bps)
    }

    #[inline]
    pub fn min_price(&self) -> Money {
        Money::from_cents(self.min_price_cents)
    }

    /// True when `now` falls inside the window, both bounds inclusive.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.start_date_time <= now && now <= self.end_date_time
    }

    pub fn apply(&mut self, changes: NewDiscount) {
        self.name = changes.name;
        self.description = changes.description;
        self.value_bps = changes.value_bps;
        self.start_date_time = changes.start_date_time;
        self.end_date_time = changes.end_date_time;
        self.min_price_cents = changes.min_price_cents;
        self.coupon_code = changes.coupon_code;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewDiscount {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub value_bps: i64,
    #[ts(as = "String")]
    pub start_date_time: DateTime<Utc>,
    #[ts(as = "String")]
    pub end_date_time: DateTime<Utc>,
    #[serde(default)]
    pub min_price_cents: i64,
    #[serde(default)]
    pub coupon_code: Option<String>,
}

impl NewDiscount {
    pub fn into_discount(self) -> Discount {
        Discount {
            id: generate_id(),
            name: self.name,
            description: self.description,
            value_bps: self.value_bps,
            start_date_time: self.start_date_time,
            end_date_time: self.end_date_time,
            min_price_cents: self.min_price_cents,
            coupon_code: self.coupon_code,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A fulfilled order. Stock for `quantity` has already been taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub product_id: String,
    pub customer_id: String,
    pub quantity: i64,
    pub discount_id: Option<String>,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,

    /// Price charged, computed when the order was created or last updated.
    pub amount_cents: i64,
}

impl Order {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Body of `POST /orders` and `PUT /orders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderRequest {
    pub product_id: String,
    pub customer_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub discount_id: Option<String>,
}

// =============================================================================
// Backorder
// =============================================================================

/// Demand that could not be met from stock when it was placed.
///
/// Satisfied all at once by a drain or not at all; there is no partial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Backorder {
    pub id: String,
    pub product_id: String,
    pub customer_id: String,
    pub quantity: i64,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl Backorder {
    pub fn new(
        product_id: impl Into<String>,
        customer_id: impl Into<String>,
        quantity: i64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Backorder {
            id: generate_id(),
            product_id: product_id.into(),
            customer_id: customer_id.into(),
            quantity,
            timestamp,
        }
    }
}

/// Body of `POST /backorders`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewBackorder {
    pub product_id: String,
    pub customer_id: String,
    pub quantity: i64,
}

// =============================================================================
// Order Outcome
// =============================================================================

/// Result of placing an order.
///
/// Both variants are successes. `Deferred` means stock was short (or the
/// product unavailable) and the full quantity was queued as a backorder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
#[ts(export)]
pub enum OrderOutcome {
    Created(Order),
    Deferred(Backorder),
}

impl OrderOutcome {
    pub fn is_deferred(&self) -> bool {
        matches!(self, OrderOutcome::Deferred(_))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn product(count: i64, availability: bool) -> Product {
        let now = Utc::now();
        Product {
            id: "p-1".to_string(),
            name: "Milk".to_string(),
            description: None,
            price_cents: 250,
            count,
            availability,
            expiry: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn discount_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Discount {
        Discount {
            id: "d-1".to_string(),
            name: "Spring".to_string(),
            description: None,
            value_bps: 1000,
            start_date_time: start,
            end_date_time: end,
            min_price_cents: 0,
            coupon_code: None,
        }
    }

    #[test]
    fn test_can_supply_needs_count_and_availability() {
        assert!(product(5, true).can_supply(5));
        assert!(!product(4, true).can_supply(5));
        assert!(!product(100, false).can_supply(1));
    }

    #[test]
    fn test_discount_active_bounds_are_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = start + Duration::days(7);
        let d = discount_window(start, end);

        assert!(d.is_active(start));
        assert!(d.is_active(end));
        assert!(d.is_active(start + Duration::days(3)));
        assert!(!d.is_active(start - Duration::seconds(1)));
        assert!(!d.is_active(end + Duration::seconds(1)));
    }

    #[test]
    fn test_discount_rate_is_clamped() {
        let now = Utc::now();
        let mut d = discount_window(now, now);
        d.value_bps = 25_000;
        assert_eq!(d.rate().bps(), DiscountRate::MAX_BPS);
        d.value_bps = -5;
        assert_eq!(d.rate().bps(), 0);
    }

    #[test]
    fn test_order_request_accepts_camel_case_without_discount() {
        let json = r#"{"productId":"p-1","customerId":"c-1","quantity":3}"#;
        let req: OrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.product_id, "p-1");
        assert_eq!(req.quantity, 3);
        assert!(req.discount_id.is_none());
    }

    #[test]
    fn test_product_apply_replaces_fields() {
        let mut p = product(5, true);
        let later = p.updated_at + Duration::minutes(1);
        p.apply(
            NewProduct {
                name: "Oat Milk".to_string(),
                description: Some("1L".to_string()),
                price_cents: 399,
                count: 12,
                availability: false,
                expiry: None,
            },
            later,
        );
        assert_eq!(p.id, "p-1");
        assert_eq!(p.name, "Oat Milk");
        assert_eq!(p.count, 12);
        assert!(!p.availability);
        assert_eq!(p.updated_at, later);
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let b = Backorder::new("p-1", "c-1", 4, Utc::now());
        let json = serde_json::to_value(OrderOutcome::Deferred(b)).unwrap();
        assert_eq!(json["outcome"], "deferred");
        assert_eq!(json["data"]["quantity"], 4);
    }
}
