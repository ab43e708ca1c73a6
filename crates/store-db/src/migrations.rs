//! # Schema Migrations
//!
//! The SQL under `migrations/sqlite/` is compiled into the binary and applied
//! by `Database::new` unless `DbConfig::run_migrations(false)` is set.
//!
//! ```text
//! migrations/sqlite/
//!   001_initial_schema.sql   products, customers, discounts, orders, backorders
//! ```
//!
//! Applied versions are tracked in `_sqlx_migrations`. A file that has been
//! applied anywhere is frozen: schema changes go in a new `NNN_*.sql`.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every embedded migration not yet recorded. Safe to call twice.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    let embedded = MIGRATOR.migrations.len();
    info!(embedded, "Applying schema migrations");
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// `(embedded, applied)` migration counts, reported by `/health`.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
        .fetch_one(pool)
        .await?;

    Ok((MIGRATOR.migrations.len(), applied as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_fresh_database_is_fully_migrated() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (embedded, applied) = migration_status(db.pool()).await.unwrap();
        assert!(embedded >= 1);
        assert_eq!(embedded, applied);
    }

    #[tokio::test]
    async fn test_rerun_is_a_no_op() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        run_migrations(db.pool()).await.unwrap();

        let (embedded, applied) = migration_status(db.pool()).await.unwrap();
        assert_eq!(embedded, applied);
    }
}
