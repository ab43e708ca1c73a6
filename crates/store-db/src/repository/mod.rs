//! # Repository Module
//!
//! Database repository implementations for the store backend.
//!
//! ## Two Ways In
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CRUD handler                        Fulfillment service               │
//! │       │                                    │                            │
//! │       │ db.products().get(id)              │ let mut tx = db.begin()    │
//! │       ▼                                    ▼                            │
//! │  ProductRepository ───────────┐     product::find(&mut *tx, id)        │
//! │  (holds the pool)             │     product::take_stock(&mut *tx, ..)  │
//! │                               ▼            │                            │
//! │                   same free functions ◄────┘                            │
//! │                   generic over sqlx::Executor                          │
//! │                               │                                         │
//! │                               ▼                                         │
//! │                        SQLite Database                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One SQL statement per operation lives in one place and runs either
//! standalone on the pool or as part of a larger transaction.
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Products and stock counters
//! - [`customer::CustomerRepository`] - Customers
//! - [`discount::DiscountRepository`] - Discounts and the active listing
//! - [`order::OrderRepository`] - Orders (read side)
//! - [`backorder::BackorderRepository`] - Backorders (read side)

pub mod backorder;
pub mod customer;
pub mod discount;
pub mod order;
pub mod product;
