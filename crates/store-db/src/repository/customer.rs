//! # Customer Repository
//!
//! Plain CRUD. The fulfillment engine only ever asks whether a customer
//! exists.

use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use store_core::{resource, Customer};

pub async fn find(
    conn: impl Executor<'_, Database = Sqlite>,
    id: &str,
) -> DbResult<Option<Customer>> {
    let customer = sqlx::query_as::<_, Customer>(
        "SELECT id, full_name, address, contact_number, created_at FROM customers WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(customer)
}

pub async fn exists(conn: impl Executor<'_, Database = Sqlite>, id: &str) -> DbResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM customers WHERE id = ?1")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        find(&self.pool, id).await
    }

    pub async fn get(&self, id: &str) -> DbResult<Customer> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found(resource::CUSTOMER, id))
    }

    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, full_name, address, contact_number, created_at
            FROM customers
            ORDER BY full_name, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn insert(&self, customer: &Customer) -> DbResult<Customer> {
        debug!(customer_id = %customer.id, "Inserting customer");

        sqlx::query(
            r#"
            INSERT INTO customers (id, full_name, address, contact_number, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.full_name)
        .bind(&customer.address)
        .bind(&customer.contact_number)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await?;

        Ok(customer.clone())
    }

    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(customer_id = %customer.id, "Updating customer");

        let result = sqlx::query(
            r#"
            UPDATE customers SET full_name = ?2, address = ?3, contact_number = ?4
            WHERE id = ?1
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.full_name)
        .bind(&customer.address)
        .bind(&customer.contact_number)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(resource::CUSTOMER, &customer.id));
        }
        Ok(())
    }

    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        exists(&self.pool, id).await
    }

    /// Deletes a customer. Orders and backorders pointing at it are kept.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(resource::CUSTOMER, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use store_core::NewCustomer;

    #[tokio::test]
    async fn test_customer_crud() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.customers();

        let mut customer = NewCustomer {
            full_name: "Ada Lovelace".to_string(),
            address: Some("12 St James's Square".to_string()),
            contact_number: None,
        }
        .into_customer(Utc::now());
        repo.insert(&customer).await.unwrap();
        assert!(repo.exists(&customer.id).await.unwrap());

        customer.contact_number = Some("555-0100".to_string());
        repo.update(&customer).await.unwrap();
        let loaded = repo.get(&customer.id).await.unwrap();
        assert_eq!(loaded.contact_number.as_deref(), Some("555-0100"));

        assert_eq!(repo.list().await.unwrap().len(), 1);

        repo.delete(&customer.id).await.unwrap();
        assert!(repo.get_by_id(&customer.id).await.unwrap().is_none());
    }
}
