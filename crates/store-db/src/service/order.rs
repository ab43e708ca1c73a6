//! # Order Fulfillment Engine
//!
//! Creates, updates and deletes orders while keeping product stock, pending
//! backorders and discount eligibility consistent.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   (nothing) ──create──┬── stock ok, discount ok ──► Order (201)        │
//! │                       ├── stock short / unavailable ─► Backorder (202) │
//! │                       └── discount below minimum ──► rejected (400)    │
//! │                                                                         │
//! │   Order ──update──┬── more units, in stock ──► Order' (stock -= Δ)     │
//! │                   ├── more units, short ─────► rejected (409)          │
//! │                   ├── fewer units ───────────► Order' (stock += Δ,     │
//! │                   │                            then drain)             │
//! │                   └── same / other parties ──► rejected (400)          │
//! │                                                                         │
//! │   Order ──delete──► (nothing)  stock += quantity, then drain           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Operation = One Transaction
//! Each operation takes the product's lock, then runs every read and write
//! inside a single SQLite transaction. Any error drops the transaction, which
//! rolls back the stock change, the order row and any deleted backorders
//! together. Customers of satisfied backorders are notified only after
//! COMMIT.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use tracing::{info, warn};

use crate::error::{DbError, FulfillmentResult};
use crate::pool::Database;
use crate::repository::{backorder, customer, discount, order, product};
use crate::service::backorder::drain_within;
use crate::service::locks::ProductLocks;
use crate::service::notifier::{dispatch, SharedNotifier};
use store_core::discount::compute_amount;
use store_core::drain::DrainReport;
use store_core::fulfillment::{ensure_can_increase, ensure_same_parties};
use store_core::validation::{validate_order_request, validate_quantity};
use store_core::{
    generate_id, resource, Backorder, CoreError, Discount, DiscountLookup, Order, OrderOutcome,
    OrderRequest, QuantityChange,
};

/// Loads a referenced discount and resolves it with `lookup`.
async fn resolve_discount(
    conn: &mut SqliteConnection,
    discount_id: Option<&str>,
    lookup: DiscountLookup,
) -> FulfillmentResult<Option<Discount>> {
    let Some(id) = discount_id else {
        return Ok(None);
    };
    let found = discount::find(&mut *conn, id).await?;
    Ok(lookup.resolve(id, found)?)
}

/// The order fulfillment engine.
///
/// ## Example
/// ```rust,ignore
/// let locks = ProductLocks::new();
/// let orders = OrderService::new(db.clone(), Arc::new(LogNotifier), locks);
///
/// match orders.create_order(request, Utc::now()).await? {
///     OrderOutcome::Created(order) => { /* 201 */ }
///     OrderOutcome::Deferred(backorder) => { /* 202 */ }
/// }
/// ```
#[derive(Clone)]
pub struct OrderService {
    db: Database,
    notifier: SharedNotifier,
    locks: ProductLocks,
}

impl OrderService {
    pub fn new(db: Database, notifier: SharedNotifier, locks: ProductLocks) -> Self {
        OrderService {
            db,
            notifier,
            locks,
        }
    }

    pub async fn get(&self, id: &str) -> FulfillmentResult<Order> {
        self.db
            .orders()
            .get_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found(resource::ORDER, id).into())
    }

    pub async fn list(&self) -> FulfillmentResult<Vec<Order>> {
        Ok(self.db.orders().list().await?)
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Places an order, or queues a backorder when stock can't cover it.
    ///
    /// ## Steps
    /// 1. Validate; customer and product must exist (NotFound otherwise)
    /// 2. Under the product lock, re-read the product in the transaction
    /// 3. Unavailable or `count < quantity` → backorder for the full
    ///    quantity, stock untouched, `Deferred`
    /// 4. Otherwise compute the amount (missing discount id = no discount),
    ///    take the stock, insert the order, `Created`
    pub async fn create_order(
        &self,
        request: OrderRequest,
        timestamp: DateTime<Utc>,
    ) -> FulfillmentResult<OrderOutcome> {
        validate_order_request(&request)?;

        if !customer::exists(self.db.pool(), &request.customer_id).await? {
            return Err(CoreError::not_found(resource::CUSTOMER, &request.customer_id).into());
        }
        if !product::exists(self.db.pool(), &request.product_id).await? {
            return Err(CoreError::not_found(resource::PRODUCT, &request.product_id).into());
        }

        let _guard = self.locks.acquire(&request.product_id).await;
        let mut tx = self.db.begin().await?;

        let product = product::find(&mut *tx, &request.product_id)
            .await?
            .ok_or_else(|| CoreError::not_found(resource::PRODUCT, &request.product_id))?;

        if !product.can_supply(request.quantity) {
            let deferred = Backorder::new(
                &request.product_id,
                &request.customer_id,
                request.quantity,
                timestamp,
            );
            backorder::insert(&mut *tx, &deferred).await?;
            tx.commit().await?;

            warn!(
                backorder_id = %deferred.id,
                product_id = %product.id,
                requested = request.quantity,
                count = product.count,
                availability = product.availability,
                "Insufficient stock, backorder created"
            );
            return Ok(OrderOutcome::Deferred(deferred));
        }

        let discount = resolve_discount(
            &mut tx,
            request.discount_id.as_deref(),
            DiscountLookup::Lenient,
        )
        .await?;
        let amount = compute_amount(product.price(), request.quantity, discount.as_ref())?;

        if !product::take_stock(&mut *tx, &product.id, request.quantity).await? {
            return Err(CoreError::InsufficientStock {
                product_id: product.id.clone(),
                available: product.count,
                requested: request.quantity,
            }
            .into());
        }

        let created = Order {
            id: generate_id(),
            product_id: request.product_id,
            customer_id: request.customer_id,
            quantity: request.quantity,
            discount_id: discount.map(|d| d.id),
            timestamp,
            amount_cents: amount.cents(),
        };
        order::insert(&mut *tx, &created).await?;
        tx.commit().await?;

        info!(
            order_id = %created.id,
            product_id = %created.product_id,
            quantity = created.quantity,
            amount = %amount,
            "Order created"
        );
        Ok(OrderOutcome::Created(created))
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Changes an order's quantity. Nothing else about an order can change.
    ///
    /// The amount is recomputed for the new quantity with the order's stored
    /// discount; a stored discount that no longer exists is NotFound.
    pub async fn update_order(
        &self,
        order_id: &str,
        request: OrderRequest,
    ) -> FulfillmentResult<Order> {
        validate_quantity(request.quantity)?;

        let existing = self.get(order_id).await?;
        ensure_same_parties(&existing, &request)?;

        let _guard = self.locks.acquire(&existing.product_id).await;
        let mut tx = self.db.begin().await?;

        let mut current = order::find(&mut *tx, order_id)
            .await?
            .ok_or_else(|| CoreError::not_found(resource::ORDER, order_id))?;

        let change = QuantityChange::between(current.quantity, request.quantity);
        if change == QuantityChange::Unchanged {
            return Err(CoreError::NoQuantityChange.into());
        }

        let stock = product::find(&mut *tx, &current.product_id)
            .await?
            .ok_or_else(|| CoreError::not_found(resource::PRODUCT, &current.product_id))?;

        let mut satisfied = Vec::new();
        match change {
            QuantityChange::Increase(extra) => {
                ensure_can_increase(&stock, extra)?;
                if !product::take_stock(&mut *tx, &stock.id, extra).await? {
                    return Err(CoreError::InsufficientStock {
                        product_id: stock.id.clone(),
                        available: stock.count,
                        requested: extra,
                    }
                    .into());
                }
            }
            QuantityChange::Decrease(freed) => {
                let new_count = product::return_stock(&mut *tx, &stock.id, freed).await?;
                satisfied = drain_within(&mut tx, &stock.id, new_count).await?.satisfied;
            }
            QuantityChange::Unchanged => {}
        }

        let discount = resolve_discount(
            &mut tx,
            current.discount_id.as_deref(),
            DiscountLookup::Strict,
        )
        .await?;
        let amount = compute_amount(stock.price(), request.quantity, discount.as_ref())?;

        let previous_quantity = current.quantity;
        current.quantity = request.quantity;
        current.amount_cents = amount.cents();
        order::update_quantity(&mut *tx, &current).await?;

        tx.commit().await?;
        dispatch(self.notifier.as_ref(), &satisfied);

        info!(
            order_id = %current.id,
            previous_quantity,
            quantity = current.quantity,
            amount = %amount,
            backorders_satisfied = satisfied.len(),
            "Order updated"
        );
        Ok(current)
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Deletes an order, returns its units to stock and drains backorders
    /// against the product's new total count.
    pub async fn delete_order(&self, order_id: &str) -> FulfillmentResult<DrainReport> {
        let existing = self.get(order_id).await?;

        let _guard = self.locks.acquire(&existing.product_id).await;
        let mut tx = self.db.begin().await?;

        let doomed = order::find(&mut *tx, order_id)
            .await?
            .ok_or_else(|| CoreError::not_found(resource::ORDER, order_id))?;

        let returned = product::return_stock(&mut *tx, &doomed.product_id, doomed.quantity).await;
        let report = match returned {
            Ok(new_count) => {
                let plan = drain_within(&mut tx, &doomed.product_id, new_count).await?;
                DrainReport::from_plan(&doomed.product_id, &plan)
            }
            Err(DbError::NotFound { .. }) => {
                // Product was deleted after the order was placed.
                warn!(
                    order_id = %order_id,
                    product_id = %doomed.product_id,
                    "Product gone, nothing to restock"
                );
                DrainReport::untouched(&doomed.product_id)
            }
            Err(e) => return Err(e.into()),
        };

        order::delete(&mut *tx, order_id).await?;
        tx.commit().await?;
        dispatch(self.notifier.as_ref(), &report.satisfied);

        info!(
            order_id = %order_id,
            product_id = %doomed.product_id,
            restocked = doomed.quantity,
            backorders_satisfied = report.satisfied.len(),
            "Order deleted"
        );
        Ok(report)
    }
}
