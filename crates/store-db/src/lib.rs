//! # store-db: Database Layer and Fulfillment Engine
//!
//! SQLite storage for products, customers, discounts, orders and backorders,
//! plus the services that mutate several of them atomically.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Backend Data Flow                          │
//! │                                                                         │
//! │  HTTP handler (POST /orders)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     store-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   service     │    │  repository   │    │  Migrations  │  │   │
//! │  │   │               │    │               │    │  (embedded)  │  │   │
//! │  │   │ OrderService  │───►│ product.rs    │    │              │  │   │
//! │  │   │ ProductLedger │    │ order.rs      │    │ 001_initial_ │  │   │
//! │  │   │ BackorderQueue│    │ backorder.rs  │    │   schema.sql │  │   │
//! │  │   │ ProductLocks  │    │ ...           │    │              │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │ BEGIN ... COMMIT                                    │   │
//! │  │   ┌───────▼───────┐                                             │   │
//! │  │   │   Database    │  SqlitePool, WAL, busy timeout             │   │
//! │  │   │   (pool.rs)   │                                             │   │
//! │  │   └───────────────┘                                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (store.db)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and fulfillment error types
//! - [`repository`] - Per-table queries
//! - [`service`] - Order fulfillment, stock ledger, backorder queue
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use store_db::{Database, DbConfig, LogNotifier, OrderService, ProductLocks};
//!
//! let db = Database::new(DbConfig::new("store.db")).await?;
//! let orders = OrderService::new(db.clone(), Arc::new(LogNotifier), ProductLocks::new());
//!
//! let outcome = orders.create_order(request, chrono::Utc::now()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult, FulfillmentError, FulfillmentResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::backorder::BackorderRepository;
pub use repository::customer::CustomerRepository;
pub use repository::discount::DiscountRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;

pub use service::{
    BackorderNotifier, BackorderQueue, LogNotifier, OrderService, ProductLedger, ProductLocks,
    SharedNotifier,
};
