//! # Database Pool Management
//!
//! Opens the SQLite pool and hands out repositories and transactions.
//!
//! ## Who Uses What
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Database (cheap clone)                          │
//! │                                                                         │
//! │   GET handlers ───────► db.products() / db.orders() ... ──► pool        │
//! │                          (one statement, any free connection)           │
//! │                                                                         │
//! │   OrderService    ┐                                                     │
//! │   ProductLedger   ├───► locks.acquire(product) ──► db.begin() ──► tx    │
//! │   BackorderQueue  ┘       every statement of the operation runs on tx,  │
//! │                           then COMMIT (or drop = ROLLBACK)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## SQLite Settings
//! - WAL journal: readers keep going while a transaction writes
//! - `busy_timeout`: a second writer waits for the lock instead of failing
//!   with `SQLITE_BUSY`
//! - `synchronous = NORMAL`: durable at checkpoints, fast commits
//!
//! `begin()` issues `BEGIN IMMEDIATE`. A deferred transaction that reads a
//! product and then writes would fail with `SQLITE_BUSY` (no busy wait) if
//! another connection committed a write in between; taking the write lock up
//! front makes concurrent writers queue on `busy_timeout` instead.
//!
//! `DbConfig::in_memory()` uses a single connection, so in tests every
//! statement of an operation must go through that operation's transaction.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::backorder::BackorderRepository;
use crate::repository::customer::CustomerRepository;
use crate::repository::discount::DiscountRepository;
use crate::repository::order::OrderRepository;
use crate::repository::product::ProductRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Pool settings, built with chained setters.
///
/// ```rust,ignore
/// let config = DbConfig::new("./store.db")
///     .max_connections(8)
///     .busy_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file; created on first connect.
    pub database_path: PathBuf,

    /// Default 5.
    pub max_connections: u32,

    /// Default 1.
    pub min_connections: u32,

    /// Wait for a free pooled connection. Default 30 s.
    pub acquire_timeout: Duration,

    /// Close connections idle this long. Default 10 min.
    pub idle_timeout: Duration,

    /// Wait on a write lock held by another connection. Default 5 s.
    pub busy_timeout: Duration,

    /// Apply embedded migrations in `Database::new`. Default true.
    pub run_migrations: bool,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Private in-memory database on one connection, migrated. For tests.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            ..DbConfig::new(":memory:")
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the pool. Clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects, applies the SQLite settings and (optionally) migrates.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening store database");

        let url = format!("sqlite://{}?mode=rwc", config.database_path.display());
        let options = SqliteConnectOptions::from_str(&url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout)
            .create_if_missing(true);

        debug!(busy_timeout = ?config.busy_timeout, "SQLite options ready");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(max_connections = config.max_connections, "Database pool created");

        let db = Database { pool };
        if config.run_migrations {
            db.run_migrations().await?;
        }
        Ok(db)
    }

    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Starts a write transaction holding SQLite's write lock.
    ///
    /// Dropping it without `commit` rolls back.
    pub async fn begin(&self) -> DbResult<Transaction<'static, Sqlite>> {
        self.pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    pub fn customers(&self) -> CustomerRepository {
        CustomerRepository::new(self.pool.clone())
    }

    pub fn discounts(&self) -> DiscountRepository {
        DiscountRepository::new(self.pool.clone())
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(self.pool.clone())
    }

    pub fn backorders(&self) -> BackorderRepository {
        BackorderRepository::new(self.pool.clone())
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }

    /// `SELECT 1` succeeds.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.health_check().await);
    }

    #[test]
    fn test_config_builder() {
        let config = DbConfig::new("/tmp/store.db")
            .max_connections(10)
            .min_connections(2)
            .busy_timeout(Duration::from_secs(1))
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.busy_timeout, Duration::from_secs(1));
        assert!(!config.run_migrations);

        let memory = DbConfig::in_memory();
        assert_eq!(memory.max_connections, 1);
        assert_eq!(memory.database_path, PathBuf::from(":memory:"));
        assert!(memory.run_migrations);
    }

    #[tokio::test]
    async fn test_rolled_back_transaction_leaves_no_rows() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        {
            let mut tx = db.begin().await.unwrap();
            sqlx::query(
                "INSERT INTO customers (id, full_name, created_at) VALUES ('c-1', 'Ann', '2024-01-01T00:00:00Z')",
            )
            .execute(&mut *tx)
            .await
            .unwrap();
            // dropped without commit
        }

        assert!(!db.customers().exists("c-1").await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_second_writer_waits_for_first() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(DbConfig::new(dir.path().join("store.db")).max_connections(4))
            .await
            .unwrap();

        let mut first = db.begin().await.unwrap();
        sqlx::query(
            "INSERT INTO customers (id, full_name, created_at) VALUES ('c-1', 'Ann', '2024-01-01T00:00:00Z')",
        )
        .execute(&mut *first)
        .await
        .unwrap();

        let other = db.clone();
        let second = tokio::spawn(async move {
            let mut tx = other.begin().await?;
            sqlx::query(
                "INSERT INTO customers (id, full_name, created_at) VALUES ('c-2', 'Bo', '2024-01-01T00:00:00Z')",
            )
            .execute(&mut *tx)
            .await?;
            tx.commit().await?;
            Ok::<_, DbError>(())
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!second.is_finished());

        first.commit().await.unwrap();
        second.await.unwrap().unwrap();

        assert!(db.customers().exists("c-1").await.unwrap());
        assert!(db.customers().exists("c-2").await.unwrap());
    }

    #[tokio::test]
    async fn test_closed_pool_is_unhealthy() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;
        assert!(!db.health_check().await);
    }
}
