//! # Product Ledger
//!
//! Owns product stock (`count`) and the `availability` flag.
//!
//! A product update that raises `count` above the stored value drains the
//! product's backorder queue against the NEW count, in the same
//! transaction and under the product lock:
//!
//! ```text
//! stored count = 2, PUT /products/{id} { count: 8, ... }
//!      │
//!      ▼
//! UPDATE products SET count = 8 ...
//!      │  8 > 2
//!      ▼
//! drain(product, available = 8)   → satisfied backorders deleted
//!      │
//!      ▼
//! COMMIT → notify customers
//! ```
//!
//! The drain does not subtract the satisfied quantities from the count.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::FulfillmentResult;
use crate::pool::Database;
use crate::repository::product;
use crate::service::backorder::drain_within;
use crate::service::locks::ProductLocks;
use crate::service::notifier::{dispatch, SharedNotifier};
use store_core::drain::DrainReport;
use store_core::validation::validate_new_product;
use store_core::{resource, CoreError, NewProduct, Product};

#[derive(Clone)]
pub struct ProductLedger {
    db: Database,
    notifier: SharedNotifier,
    locks: ProductLocks,
}

impl ProductLedger {
    pub fn new(db: Database, notifier: SharedNotifier, locks: ProductLocks) -> Self {
        ProductLedger {
            db,
            notifier,
            locks,
        }
    }

    pub async fn get(&self, id: &str) -> FulfillmentResult<Product> {
        self.db
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(resource::PRODUCT, id).into())
    }

    pub async fn list(&self) -> FulfillmentResult<Vec<Product>> {
        Ok(self.db.products().list().await?)
    }

    pub async fn create(&self, input: NewProduct, now: DateTime<Utc>) -> FulfillmentResult<Product> {
        validate_new_product(&input)?;

        let product = input.into_product(now);
        self.db.products().insert(&product).await?;

        info!(product_id = %product.id, count = product.count, "Product created");
        Ok(product)
    }

    /// Replaces a product's fields, draining backorders if stock went up.
    pub async fn update(
        &self,
        id: &str,
        changes: NewProduct,
        now: DateTime<Utc>,
    ) -> FulfillmentResult<(Product, DrainReport)> {
        validate_new_product(&changes)?;

        if !self.db.products().exists(id).await? {
            return Err(CoreError::not_found(resource::PRODUCT, id).into());
        }

        let _guard = self.locks.acquire(id).await;
        let mut tx = self.db.begin().await?;

        let mut stored = product::find(&mut *tx, id)
            .await?
            .ok_or_else(|| CoreError::not_found(resource::PRODUCT, id))?;
        let previous_count = stored.count;

        stored.apply(changes, now);
        product::update(&mut *tx, &stored).await?;

        let report = if stored.count > previous_count {
            let plan = drain_within(&mut tx, id, stored.count).await?;
            DrainReport::from_plan(id, &plan)
        } else {
            DrainReport::untouched(id)
        };

        tx.commit().await?;
        dispatch(self.notifier.as_ref(), &report.satisfied);

        info!(
            product_id = %id,
            previous_count,
            count = stored.count,
            satisfied = report.satisfied.len(),
            "Product updated"
        );
        Ok((stored, report))
    }

    /// Deletes a product. Orders and backorders referencing it are kept.
    pub async fn delete(&self, id: &str) -> FulfillmentResult<()> {
        {
            let _guard = self.locks.acquire(id).await;
            self.db.products().delete(id).await?;
        }
        self.locks.forget(id);

        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::backorder::BackorderQueue;
    use crate::service::notifier::RecordingNotifier;
    use crate::service::test_support::{seed_customer, seed_product, test_db};
    use std::sync::Arc;
    use store_core::NewBackorder;

    fn changes_from(product: &Product, count: i64) -> NewProduct {
        NewProduct {
            name: product.name.clone(),
            description: product.description.clone(),
            price_cents: product.price_cents,
            count,
            availability: product.availability,
            expiry: product.expiry,
        }
    }

    #[tokio::test]
    async fn test_restock_drains_with_new_count() {
        let db = test_db().await;
        let product = seed_product(&db, 2, 100).await;
        let customer = seed_customer(&db).await;
        let notifier = Arc::new(RecordingNotifier::default());
        let locks = ProductLocks::new();
        let queue = BackorderQueue::new(db.clone(), notifier.clone(), locks.clone());
        let ledger = ProductLedger::new(db.clone(), notifier.clone(), locks);

        for quantity in [3, 5] {
            queue
                .enqueue(
                    NewBackorder {
                        product_id: product.id.clone(),
                        customer_id: customer.id.clone(),
                        quantity,
                    },
                    Utc::now(),
                )
                .await
                .unwrap();
        }

        let (updated, report) = ledger
            .update(&product.id, changes_from(&product, 4), Utc::now())
            .await
            .unwrap();

        // budget is the new count (4), not the increase (2)
        assert_eq!(updated.count, 4);
        assert_eq!(report.satisfied.len(), 1);
        assert_eq!(report.satisfied[0].quantity, 3);
        assert_eq!(report.still_pending, 1);
        assert_eq!(notifier.seen().len(), 1);

        // count is left as written
        assert_eq!(ledger.get(&product.id).await.unwrap().count, 4);
    }

    #[tokio::test]
    async fn test_lowering_stock_does_not_drain() {
        let db = test_db().await;
        let product = seed_product(&db, 10, 100).await;
        let customer = seed_customer(&db).await;
        let notifier = Arc::new(RecordingNotifier::default());
        let locks = ProductLocks::new();
        let queue = BackorderQueue::new(db.clone(), notifier.clone(), locks.clone());
        let ledger = ProductLedger::new(db.clone(), notifier.clone(), locks);

        queue
            .enqueue(
                NewBackorder {
                    product_id: product.id.clone(),
                    customer_id: customer.id.clone(),
                    quantity: 1,
                },
                Utc::now(),
            )
            .await
            .unwrap();

        let (_, report) = ledger
            .update(&product.id, changes_from(&product, 6), Utc::now())
            .await
            .unwrap();

        assert!(report.satisfied.is_empty());
        assert_eq!(db.backorders().list().await.unwrap().len(), 1);
        assert!(notifier.seen().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let db = test_db().await;
        let template = seed_product(&db, 1, 100).await;
        let ledger = ProductLedger::new(
            db.clone(),
            Arc::new(RecordingNotifier::default()),
            ProductLocks::new(),
        );

        let err = ledger
            .update("ghost", changes_from(&template, 3), Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Product not found with Id : ghost");
    }

    #[tokio::test]
    async fn test_create_validates_input() {
        let db = test_db().await;
        let ledger = ProductLedger::new(
            db,
            Arc::new(RecordingNotifier::default()),
            ProductLocks::new(),
        );

        let err = ledger
            .create(
                NewProduct {
                    name: "  ".to_string(),
                    description: None,
                    price_cents: 100,
                    count: 1,
                    availability: true,
                    expiry: None,
                },
                Utc::now(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::FulfillmentError::Core(CoreError::Validation(_))
        ));
    }
}
