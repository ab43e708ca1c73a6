//! # store-core: Pure Business Logic for the Store Backend
//!
//! This crate holds every rule of order fulfillment as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Backend Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    store-api (axum)                             │   │
//! │  │    POST /orders ──► PUT /orders/{id} ──► DELETE /orders/{id}    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │         store-db services (OrderService, ProductLedger)         │   │
//! │  │         transactions, per-product locks, repositories           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ asks for decisions                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ store-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  types   │ │ discount │ │  drain   │ │   fulfillment    │  │   │
//! │  │   │ Product  │ │ amount + │ │ greedy   │ │ supply checks,   │  │   │
//! │  │   │ Order    │ │ min price│ │ single   │ │ quantity change, │  │   │
//! │  │   │ Backorder│ │ gating   │ │ pass     │ │ identity guard   │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Discount, Order, Backorder)
//! - [`money`] - Money type with integer arithmetic and [`DiscountRate`]
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`discount`] - Discount eligibility and amount computation
//! - [`drain`] - Backorder drain planning
//! - [`fulfillment`] - Stock and quantity-change decisions
//!
//! ## Example Usage
//!
//! ```rust
//! use store_core::discount::compute_amount;
//! use store_core::money::Money;
//!
//! // No discount: amount is just price × quantity
//! let amount = compute_amount(Money::from_cents(250), 4, None).unwrap();
//! assert_eq!(amount.cents(), 1000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod drain;
pub mod error;
pub mod fulfillment;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use discount::DiscountLookup;
pub use drain::{DrainPlan, DrainReport};
pub use error::{CoreError, CoreResult, ValidationError};
pub use fulfillment::QuantityChange;
pub use money::{DiscountRate, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Resource names used in NotFound errors and log lines.
pub mod resource {
    pub const PRODUCT: &str = "Product";
    pub const CUSTOMER: &str = "Customer";
    pub const DISCOUNT: &str = "Discount";
    pub const ORDER: &str = "Order";
    pub const BACKORDER: &str = "Backorder";
}

/// Generates a new entity ID (UUID v4).
///
/// Globally unique without coordination, so IDs can be assigned before the
/// row is written.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
