//! # Discount Repository
//!
//! CRUD plus the "active discounts" read path. Which discounts are active is
//! decided in store-core; this module only loads rows.

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use store_core::discount::active_discounts;
use store_core::{resource, Discount};

pub async fn find(
    conn: impl Executor<'_, Database = Sqlite>,
    id: &str,
) -> DbResult<Option<Discount>> {
    let discount = sqlx::query_as::<_, Discount>(
        r#"
        SELECT id, name, description, value_bps, start_date_time, end_date_time,
               min_price_cents, coupon_code
        FROM discounts
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(discount)
}

/// Repository for discount database operations.
#[derive(Debug, Clone)]
pub struct DiscountRepository {
    pool: SqlitePool,
}

impl DiscountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        DiscountRepository { pool }
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Discount>> {
        find(&self.pool, id).await
    }

    pub async fn get(&self, id: &str) -> DbResult<Discount> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found(resource::DISCOUNT, id))
    }

    pub async fn list(&self) -> DbResult<Vec<Discount>> {
        let discounts = sqlx::query_as::<_, Discount>(
            r#"
            SELECT id, name, description, value_bps, start_date_time, end_date_time,
                   min_price_cents, coupon_code
            FROM discounts
            ORDER BY start_date_time, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(discounts)
    }

    /// Discounts whose window contains `now` (both bounds inclusive).
    pub async fn list_active(&self, now: DateTime<Utc>) -> DbResult<Vec<Discount>> {
        let all = self.list().await?;
        let active = active_discounts(all, now);
        debug!(count = active.len(), "Active discounts");
        Ok(active)
    }

    pub async fn insert(&self, discount: &Discount) -> DbResult<Discount> {
        debug!(discount_id = %discount.id, "Inserting discount");

        sqlx::query(
            r#"
            INSERT INTO discounts (
                id, name, description, value_bps, start_date_time, end_date_time,
                min_price_cents, coupon_code
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&discount.id)
        .bind(&discount.name)
        .bind(&discount.description)
        .bind(discount.value_bps)
        .bind(discount.start_date_time)
        .bind(discount.end_date_time)
        .bind(discount.min_price_cents)
        .bind(&discount.coupon_code)
        .execute(&self.pool)
        .await?;

        Ok(discount.clone())
    }

    /// Updates a discount. Amounts already cached on orders are not touched.
    pub async fn update(&self, discount: &Discount) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE discounts SET
                name = ?2, description = ?3, value_bps = ?4,
                start_date_time = ?5, end_date_time = ?6,
                min_price_cents = ?7, coupon_code = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&discount.id)
        .bind(&discount.name)
        .bind(&discount.description)
        .bind(discount.value_bps)
        .bind(discount.start_date_time)
        .bind(discount.end_date_time)
        .bind(discount.min_price_cents)
        .bind(&discount.coupon_code)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(resource::DISCOUNT, &discount.id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM discounts WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(resource::DISCOUNT, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::Duration;
    use store_core::NewDiscount;

    fn new_discount(name: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Discount {
        NewDiscount {
            name: name.to_string(),
            description: None,
            value_bps: 1000,
            start_date_time: start,
            end_date_time: end,
            min_price_cents: 500,
            coupon_code: Some(name.to_uppercase()),
        }
        .into_discount()
    }

    #[tokio::test]
    async fn test_list_active_uses_inclusive_window() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.discounts();
        let now = Utc::now();

        let current = new_discount("current", now - Duration::days(1), now + Duration::days(1));
        let ends_now = new_discount("ends-now", now - Duration::days(2), now);
        let expired = new_discount("expired", now - Duration::days(9), now - Duration::days(3));
        for d in [&current, &ends_now, &expired] {
            repo.insert(d).await.unwrap();
        }

        let active = repo.list_active(now).await.unwrap();
        let names: Vec<_> = active.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(active.len(), 2);
        assert!(names.contains(&"current"));
        assert!(names.contains(&"ends-now"));

        assert_eq!(repo.list().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_round_trip_keeps_window() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let now = Utc::now();
        let d = new_discount("spring", now, now + Duration::days(30));
        db.discounts().insert(&d).await.unwrap();

        let loaded = db.discounts().get(&d.id).await.unwrap();
        assert_eq!(loaded.start_date_time, d.start_date_time);
        assert_eq!(loaded.end_date_time, d.end_date_time);
        assert_eq!(loaded.min_price_cents, 500);
    }
}
