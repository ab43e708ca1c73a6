//! # Backorder Queue
//!
//! Per-product list of unmet demand: enqueue, dequeue by id, and drain.
//!
//! ## Drain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  triggered by:  product count raised │ order quantity lowered │        │
//! │                 order deleted                                          │
//! │                                                                         │
//! │  inside the caller's transaction:                                      │
//! │    queue   = backorders WHERE product_id = ? ORDER BY timestamp, rowid │
//! │    plan    = store_core::drain::plan_drain(queue, available)           │
//! │    DELETE each plan.satisfied                                          │
//! │                                                                         │
//! │  after COMMIT:                                                         │
//! │    notifier.notify(b) for each satisfied backorder                     │
//! │                                                                         │
//! │  Product.count is NOT changed by a drain.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use tracing::{debug, info};

use crate::error::{DbError, FulfillmentResult};
use crate::pool::Database;
use crate::repository::{backorder, customer, product};
use crate::service::locks::ProductLocks;
use crate::service::notifier::{dispatch, SharedNotifier};
use store_core::drain::{plan_drain, DrainPlan, DrainReport};
use store_core::validation::validate_new_backorder;
use store_core::{resource, Backorder, CoreError, NewBackorder};

/// Drains `product_id`'s queue against `available` units on `conn`.
///
/// Deletes the satisfied rows and returns the plan; the caller commits and
/// then dispatches notifications for `plan.satisfied`.
pub(crate) async fn drain_within(
    conn: &mut SqliteConnection,
    product_id: &str,
    available: i64,
) -> Result<DrainPlan, DbError> {
    let queue = backorder::queue_for_product(&mut *conn, product_id).await?;
    debug!(product_id = %product_id, pending = queue.len(), available, "Draining backorders");

    let plan = plan_drain(queue, available);
    for satisfied in &plan.satisfied {
        backorder::delete(&mut *conn, &satisfied.id).await?;
    }

    if !plan.satisfied.is_empty() {
        info!(
            product_id = %product_id,
            satisfied = plan.satisfied.len(),
            still_pending = plan.skipped.len(),
            "Backorders satisfied"
        );
    }

    Ok(plan)
}

/// Service for the backorder queue.
#[derive(Clone)]
pub struct BackorderQueue {
    db: Database,
    notifier: SharedNotifier,
    locks: ProductLocks,
}

impl BackorderQueue {
    pub fn new(db: Database, notifier: SharedNotifier, locks: ProductLocks) -> Self {
        BackorderQueue {
            db,
            notifier,
            locks,
        }
    }

    pub async fn list(&self) -> FulfillmentResult<Vec<Backorder>> {
        Ok(self.db.backorders().list().await?)
    }

    pub async fn get(&self, id: &str) -> FulfillmentResult<Backorder> {
        self.db
            .backorders()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(resource::BACKORDER, id).into())
    }

    /// Appends a backorder unconditionally. Stock is not looked at.
    pub async fn enqueue(
        &self,
        request: NewBackorder,
        timestamp: DateTime<Utc>,
    ) -> FulfillmentResult<Backorder> {
        validate_new_backorder(&request)?;

        if !customer::exists(self.db.pool(), &request.customer_id).await? {
            return Err(CoreError::not_found(resource::CUSTOMER, &request.customer_id).into());
        }
        if !product::exists(self.db.pool(), &request.product_id).await? {
            return Err(CoreError::not_found(resource::PRODUCT, &request.product_id).into());
        }

        let backorder = Backorder::new(
            request.product_id,
            request.customer_id,
            request.quantity,
            timestamp,
        );
        backorder::insert(self.db.pool(), &backorder).await?;

        info!(backorder_id = %backorder.id, product_id = %backorder.product_id, "Backorder enqueued");
        Ok(backorder)
    }

    /// Replaces a backorder's product, customer and quantity.
    ///
    /// Both parties must exist, then the backorder itself. It keeps its
    /// timestamp, so its place in the queue does not change, and no drain
    /// is run.
    pub async fn update(&self, id: &str, changes: NewBackorder) -> FulfillmentResult<Backorder> {
        validate_new_backorder(&changes)?;

        if !customer::exists(self.db.pool(), &changes.customer_id).await? {
            return Err(CoreError::not_found(resource::CUSTOMER, &changes.customer_id).into());
        }
        if !product::exists(self.db.pool(), &changes.product_id).await? {
            return Err(CoreError::not_found(resource::PRODUCT, &changes.product_id).into());
        }

        let updated = match backorder::update(self.db.pool(), id, &changes).await {
            Ok(updated) => updated,
            Err(DbError::NotFound { .. }) => {
                return Err(CoreError::not_found(resource::BACKORDER, id).into())
            }
            Err(e) => return Err(e.into()),
        };

        info!(backorder_id = %id, quantity = updated.quantity, "Backorder updated");
        Ok(updated)
    }

    /// Removes a backorder without notifying anyone. NotFound if missing.
    pub async fn dequeue(&self, id: &str) -> FulfillmentResult<()> {
        backorder::delete(self.db.pool(), id).await?;

        info!(backorder_id = %id, "Backorder removed");
        Ok(())
    }

    /// Drains `product_id`'s queue against `available` units in its own
    /// transaction.
    pub async fn drain(&self, product_id: &str, available: i64) -> FulfillmentResult<DrainReport> {
        let _guard = self.locks.acquire(product_id).await;
        let mut tx = self.db.begin().await?;

        let plan = drain_within(&mut tx, product_id, available).await?;
        tx.commit().await?;

        dispatch(self.notifier.as_ref(), &plan.satisfied);
        Ok(DrainReport::from_plan(product_id, &plan))
    }
}
