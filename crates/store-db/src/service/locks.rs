//! # Per-Product Locks
//!
//! Serializes every read-modify-write on one product's stock.
//!
//! ## Lock Registry
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductLocks (cloned into every service, one shared registry)         │
//! │                                                                         │
//! │   std::sync::Mutex<HashMap>       held only while looking up the entry │
//! │   ├── "p-milk"  → Arc<tokio::Mutex<()>>                                │
//! │   ├── "p-bread" → Arc<tokio::Mutex<()>>                                │
//! │   └── ...                                                               │
//! │                                                                         │
//! │  POST /orders (milk)  ──► acquire("p-milk") ──► BEGIN ... COMMIT ──┐    │
//! │  DELETE /orders (milk) ─► acquire("p-milk") ── waits ─────────────┘    │
//! │  PUT /products (bread) ─► acquire("p-bread") ── runs concurrently      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Always take the product lock BEFORE beginning the transaction, so a task
//! never holds a pooled connection while waiting on another task's lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of async mutexes keyed by product id.
#[derive(Debug, Clone, Default)]
pub struct ProductLocks {
    inner: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl ProductLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `product_id`'s stock.
    ///
    /// The lock is released when the returned guard is dropped.
    pub async fn acquire(&self, product_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            map.entry(product_id.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drops the registry entry for a deleted product.
    pub fn forget(&self, product_id: &str) {
        let mut map = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        map.remove(product_id);
    }

    /// Number of products with a registered lock.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
