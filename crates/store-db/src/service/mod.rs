//! # Fulfillment Services
//!
//! Stateful operations that span several tables. Each one locks the product
//! it touches, runs inside one transaction, and notifies after commit.
//!
//! ```text
//! ┌────────────────┐  ┌────────────────┐  ┌────────────────┐
//! │  OrderService  │  │ ProductLedger  │  │ BackorderQueue │
//! │ create/update/ │  │ stock updates  │  │ enqueue/drain  │
//! │ delete orders  │  │ (drain on +)   │  │                │
//! └───────┬────────┘  └───────┬────────┘  └───────┬────────┘
//!         └──────────┬────────┴───────────────────┘
//!                    ▼
//!     ProductLocks (shared)  +  BackorderNotifier (shared)
//! ```
//!
//! All three services must be built with clones of the SAME [`ProductLocks`],
//! otherwise their critical sections don't exclude each other.

pub mod backorder;
pub mod ledger;
pub mod locks;
pub mod notifier;
pub mod order;

pub use backorder::BackorderQueue;
pub use ledger::ProductLedger;
pub use locks::ProductLocks;
pub use notifier::{BackorderNotifier, LogNotifier, SharedNotifier};
pub use order::OrderService;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, Utc};
    use store_core::{Customer, Discount, NewCustomer, NewDiscount, NewProduct, Product};

    use crate::pool::{Database, DbConfig};

    pub(crate) async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// File-backed database with a real multi-connection pool. Keep the
    /// `TempDir` alive for the whole test.
    pub(crate) async fn file_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("store.db")).max_connections(8);
        let db = Database::new(config).await.unwrap();
        (dir, db)
    }

    pub(crate) async fn seed_product(db: &Database, count: i64, price_cents: i64) -> Product {
        let product = NewProduct {
            name: "Widget".to_string(),
            description: None,
            price_cents,
            count,
            availability: true,
            expiry: None,
        }
        .into_product(Utc::now());
        db.products().insert(&product).await.unwrap()
    }

    pub(crate) async fn seed_customer(db: &Database) -> Customer {
        let customer = NewCustomer {
            full_name: "Ada Buyer".to_string(),
            address: None,
            contact_number: None,
        }
        .into_customer(Utc::now());
        db.customers().insert(&customer).await.unwrap()
    }

    /// Discount active from yesterday until tomorrow.
    pub(crate) async fn seed_discount(db: &Database, value_bps: i64, min_price_cents: i64) -> Discount {
        let now = Utc::now();
        let discount = NewDiscount {
            name: "Seasonal".to_string(),
            description: None,
            value_bps,
            start_date_time: now - Duration::days(1),
            end_date_time: now + Duration::days(1),
            min_price_cents,
            coupon_code: None,
        }
        .into_discount();
        db.discounts().insert(&discount).await.unwrap()
    }
}
