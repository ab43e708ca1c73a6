//! # Backorder Repository
//!
//! Storage for unmet demand. Queue order for a product is oldest first, ties
//! broken by insertion order (`ORDER BY timestamp, rowid`).

use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use store_core::{resource, Backorder, NewBackorder};

pub async fn find(
    conn: impl Executor<'_, Database = Sqlite>,
    id: &str,
) -> DbResult<Option<Backorder>> {
    let backorder = sqlx::query_as::<_, Backorder>(
        "SELECT id, product_id, customer_id, quantity, timestamp FROM backorders WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(backorder)
}

/// The pending queue for one product, in drain order.
pub async fn queue_for_product(
    conn: impl Executor<'_, Database = Sqlite>,
    product_id: &str,
) -> DbResult<Vec<Backorder>> {
    let queue = sqlx::query_as::<_, Backorder>(
        r#"
        SELECT id, product_id, customer_id, quantity, timestamp
        FROM backorders
        WHERE product_id = ?1
        ORDER BY timestamp, rowid
        "#,
    )
    .bind(product_id)
    .fetch_all(conn)
    .await?;

    Ok(queue)
}

pub async fn insert(conn: impl Executor<'_, Database = Sqlite>, backorder: &Backorder) -> DbResult<()> {
    debug!(
        backorder_id = %backorder.id,
        product_id = %backorder.product_id,
        quantity = backorder.quantity,
        "Inserting backorder"
    );

    sqlx::query(
        r#"
        INSERT INTO backorders (id, product_id, customer_id, quantity, timestamp)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&backorder.id)
    .bind(&backorder.product_id)
    .bind(&backorder.customer_id)
    .bind(backorder.quantity)
    .bind(backorder.timestamp)
    .execute(conn)
    .await?;

    Ok(())
}

/// Rewrites a backorder's product, customer and quantity. The timestamp,
/// and with it the queue position, is kept.
pub async fn update(
    conn: impl Executor<'_, Database = Sqlite>,
    id: &str,
    changes: &NewBackorder,
) -> DbResult<Backorder> {
    debug!(backorder_id = %id, quantity = changes.quantity, "Updating backorder");

    sqlx::query_as::<_, Backorder>(
        r#"
        UPDATE backorders
        SET product_id = ?2, customer_id = ?3, quantity = ?4
        WHERE id = ?1
        RETURNING id, product_id, customer_id, quantity, timestamp
        "#,
    )
    .bind(id)
    .bind(&changes.product_id)
    .bind(&changes.customer_id)
    .bind(changes.quantity)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| DbError::not_found(resource::BACKORDER, id))
}

pub async fn delete(conn: impl Executor<'_, Database = Sqlite>, id: &str) -> DbResult<()> {
    let result = sqlx::query("DELETE FROM backorders WHERE id = ?1")
        .bind(id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(resource::BACKORDER, id));
    }
    Ok(())
}

/// Read access to backorders. Writes go through `BackorderQueue`.
#[derive(Debug, Clone)]
pub struct BackorderRepository {
    pool: SqlitePool,
}

impl BackorderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        BackorderRepository { pool }
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Backorder>> {
        find(&self.pool, id).await
    }

    pub async fn list(&self) -> DbResult<Vec<Backorder>> {
        let backorders = sqlx::query_as::<_, Backorder>(
            r#"
            SELECT id, product_id, customer_id, quantity, timestamp
            FROM backorders
            ORDER BY timestamp, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(backorders)
    }

    pub async fn list_for_product(&self, product_id: &str) -> DbResult<Vec<Backorder>> {
        queue_for_product(&self.pool, product_id).await
    }
}
