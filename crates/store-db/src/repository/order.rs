//! # Order Repository
//!
//! Reads and writes order rows. Orders are only created, changed and removed
//! by `OrderService`, which calls the free functions here inside its
//! transaction; the repository struct exposes the read side.

use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use store_core::{resource, Order};

pub async fn find(conn: impl Executor<'_, Database = Sqlite>, id: &str) -> DbResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        r#"
        SELECT id, product_id, customer_id, quantity, discount_id, timestamp, amount_cents
        FROM orders
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(order)
}

pub async fn insert(conn: impl Executor<'_, Database = Sqlite>, order: &Order) -> DbResult<()> {
    debug!(order_id = %order.id, product_id = %order.product_id, "Inserting order");

    sqlx::query(
        r#"
        INSERT INTO orders (
            id, product_id, customer_id, quantity, discount_id, timestamp, amount_cents
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(&order.id)
    .bind(&order.product_id)
    .bind(&order.customer_id)
    .bind(order.quantity)
    .bind(&order.discount_id)
    .bind(order.timestamp)
    .bind(order.amount_cents)
    .execute(conn)
    .await?;

    Ok(())
}

/// Persists a new quantity and amount. Parties and discount never change.
pub async fn update_quantity(
    conn: impl Executor<'_, Database = Sqlite>,
    order: &Order,
) -> DbResult<()> {
    debug!(order_id = %order.id, quantity = order.quantity, "Updating order quantity");

    let result = sqlx::query("UPDATE orders SET quantity = ?2, amount_cents = ?3 WHERE id = ?1")
        .bind(&order.id)
        .bind(order.quantity)
        .bind(order.amount_cents)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(resource::ORDER, &order.id));
    }
    Ok(())
}

pub async fn delete(conn: impl Executor<'_, Database = Sqlite>, id: &str) -> DbResult<()> {
    let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
        .bind(id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(resource::ORDER, id));
    }
    Ok(())
}

/// Read access to orders.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        find(&self.pool, id).await
    }

    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, product_id, customer_id, quantity, discount_id, timestamp, amount_cents
            FROM orders
            ORDER BY timestamp, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }
}
