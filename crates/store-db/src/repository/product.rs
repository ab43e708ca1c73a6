//! # Product Repository
//!
//! Database operations for products, including the stock counter.
//!
//! ## Stock Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Update Strategy                                │
//! │                                                                         │
//! │  ❌ WRONG: read count, compute in Rust, write absolute value           │
//! │     UPDATE products SET count = 7 WHERE id = ?                          │
//! │                                                                         │
//! │  ✅ CORRECT: relative update, guarded in SQL                           │
//! │     UPDATE products SET count = count - 3                               │
//! │     WHERE id = ? AND count >= 3 AND availability = 1                    │
//! │                                                                         │
//! │  rows_affected == 0 means the stock was not there: nothing changed     │
//! │  and the count can never go negative.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The free functions take any executor so the fulfillment services can run
//! them inside a transaction (`&mut *tx`); [`ProductRepository`] runs the same
//! functions on the pool for plain CRUD.

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use store_core::{resource, Product};

// =============================================================================
// Queries
// =============================================================================

pub async fn find(
    conn: impl Executor<'_, Database = Sqlite>,
    id: &str,
) -> DbResult<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, description, price_cents, count, availability,
               expiry, created_at, updated_at
        FROM products
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(product)
}

pub async fn list(conn: impl Executor<'_, Database = Sqlite>) -> DbResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, description, price_cents, count, availability,
               expiry, created_at, updated_at
        FROM products
        ORDER BY name, rowid
        "#,
    )
    .fetch_all(conn)
    .await?;

    Ok(products)
}

pub async fn insert(conn: impl Executor<'_, Database = Sqlite>, product: &Product) -> DbResult<()> {
    debug!(product_id = %product.id, name = %product.name, "Inserting product");

    sqlx::query(
        r#"
        INSERT INTO products (
            id, name, description, price_cents, count, availability,
            expiry, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(&product.id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price_cents)
    .bind(product.count)
    .bind(product.availability)
    .bind(product.expiry)
    .bind(product.created_at)
    .bind(product.updated_at)
    .execute(conn)
    .await?;

    Ok(())
}

/// Writes every mutable column of `product`.
pub async fn update(conn: impl Executor<'_, Database = Sqlite>, product: &Product) -> DbResult<()> {
    debug!(product_id = %product.id, count = product.count, "Updating product");

    let result = sqlx::query(
        r#"
        UPDATE products SET
            name = ?2,
            description = ?3,
            price_cents = ?4,
            count = ?5,
            availability = ?6,
            expiry = ?7,
            updated_at = ?8
        WHERE id = ?1
        "#,
    )
    .bind(&product.id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price_cents)
    .bind(product.count)
    .bind(product.availability)
    .bind(product.expiry)
    .bind(product.updated_at)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(resource::PRODUCT, &product.id));
    }

    Ok(())
}

/// Takes `quantity` units if the product is available and has them.
///
/// Returns `false` (and changes nothing) when the guard fails.
pub async fn take_stock(
    conn: impl Executor<'_, Database = Sqlite>,
    id: &str,
    quantity: i64,
) -> DbResult<bool> {
    debug!(product_id = %id, quantity, "Taking stock");

    let result = sqlx::query(
        r#"
        UPDATE products
        SET count = count - ?2, updated_at = ?3
        WHERE id = ?1 AND count >= ?2 AND availability = 1
        "#,
    )
    .bind(id)
    .bind(quantity)
    .bind(Utc::now())
    .execute(conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Puts `quantity` units back and returns the new count.
pub async fn return_stock(
    conn: impl Executor<'_, Database = Sqlite>,
    id: &str,
    quantity: i64,
) -> DbResult<i64> {
    debug!(product_id = %id, quantity, "Returning stock");

    let count: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE products
        SET count = count + ?2, updated_at = ?3
        WHERE id = ?1
        RETURNING count
        "#,
    )
    .bind(id)
    .bind(quantity)
    .bind(Utc::now())
    .fetch_optional(conn)
    .await?;

    count.ok_or_else(|| DbError::not_found(resource::PRODUCT, id))
}

pub async fn exists(conn: impl Executor<'_, Database = Sqlite>, id: &str) -> DbResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM products WHERE id = ?1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

pub async fn delete(conn: impl Executor<'_, Database = Sqlite>, id: &str) -> DbResult<()> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?1")
        .bind(id)
        .execute(conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(resource::PRODUCT, id));
    }
    Ok(())
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let all = repo.list().await?;
/// let milk = repo.get("uuid-here").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        find(&self.pool, id).await
    }

    /// Gets a product, failing with `DbError::NotFound` when missing.
    pub async fn get(&self, id: &str) -> DbResult<Product> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found(resource::PRODUCT, id))
    }

    pub async fn list(&self) -> DbResult<Vec<Product>> {
        list(&self.pool).await
    }

    /// Inserts a new product (id generated beforehand).
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        insert(&self.pool, product).await?;
        Ok(product.clone())
    }

    /// Updates an existing product.
    ///
    /// Writes outside the ledger do not drain backorders; stock changes
    /// should go through `ProductLedger::update`.
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        update(&self.pool, product).await
    }

    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        exists(&self.pool, id).await
    }

    pub async fn delete(&self, id: &str) -> DbResult<()> {
        delete(&self.pool, id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use store_core::NewProduct;

    async fn setup() -> (Database, Product) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = NewProduct {
            name: "Milk".to_string(),
            description: Some("1L carton".to_string()),
            price_cents: 250,
            count: 10,
            availability: true,
            expiry: None,
        }
        .into_product(Utc::now());
        db.products().insert(&product).await.unwrap();
        (db, product)
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let (db, product) = setup().await;

        let loaded = db.products().get(&product.id).await.unwrap();
        assert_eq!(loaded.name, "Milk");
        assert_eq!(loaded.count, 10);
        assert!(loaded.availability);
        assert!(db.products().exists(&product.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (db, _) = setup().await;
        let err = db.products().get("nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Product not found with Id : nope");
    }

    #[tokio::test]
    async fn test_take_stock_is_guarded() {
        let (db, product) = setup().await;

        assert!(take_stock(db.pool(), &product.id, 4).await.unwrap());
        assert!(!take_stock(db.pool(), &product.id, 7).await.unwrap());

        let loaded = db.products().get(&product.id).await.unwrap();
        assert_eq!(loaded.count, 6);
    }

    #[tokio::test]
    async fn test_take_stock_refuses_unavailable_product() {
        let (db, mut product) = setup().await;
        product.availability = false;
        db.products().update(&product).await.unwrap();

        assert!(!take_stock(db.pool(), &product.id, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_return_stock_reports_new_count() {
        let (db, product) = setup().await;
        let count = return_stock(db.pool(), &product.id, 5).await.unwrap();
        assert_eq!(count, 15);

        assert!(return_stock(db.pool(), "nope", 1).await.is_err());
    }

    #[tokio::test]
    async fn test_delete() {
        let (db, product) = setup().await;
        db.products().delete(&product.id).await.unwrap();
        assert!(!db.products().exists(&product.id).await.unwrap());
        assert!(matches!(
            db.products().delete(&product.id).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
