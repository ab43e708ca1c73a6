//! # Store API
//!
//! axum REST layer over the store-db fulfillment services.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  /orders       GET POST        /orders/{id}      GET PUT DELETE         │
//! │  /products     GET POST        /products/{id}    GET PUT DELETE         │
//! │  /customers    GET POST        /customers/{id}   GET PUT DELETE         │
//! │  /discounts    GET POST        /discounts/{id}   GET PUT DELETE         │
//! │  /discounts/active GET                                                  │
//! │  /backorders   GET POST        /backorders/{id}  GET PUT DELETE         │
//! │  /health       GET                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - HTTP server port (default: 8080)
//! - `DATABASE_PATH` - SQLite file (default: ./store.db)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_RUN_MIGRATIONS` - Apply migrations on startup (default: true)
//! - `RUST_LOG` - Log filter (default: info)

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
