//! Database Module
//!
//! SQLite connection pool, migrations and the query functions used by the API.

pub mod cart;
pub mod orders;
pub mod users;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Open the pool (WAL, foreign keys on) and apply pending migrations
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    busy_timeout: Duration,
) -> Result<SqlitePool, BoxError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| format!("Invalid database url: {e}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| format!("Failed to open database: {e}"))?;

    tracing::info!(
        max_connections,
        busy_timeout_ms = busy_timeout.as_millis() as u64,
        "Database connection established (SQLite WAL)"
    );

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| format!("Failed to apply migrations: {e}"))?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Seed helpers for tests that run against a scratch database file

    use super::*;

    /// Fresh migrated database in its own temp dir; keep the dir alive for the test
    pub async fn scratch_pool() -> (tempfile::TempDir, SqlitePool) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("storefront.db").display());
        let pool = connect(&url, 5, Duration::from_secs(5)).await.unwrap();
        (dir, pool)
    }

    pub async fn insert_user(pool: &SqlitePool, email: &str) -> i64 {
        sqlx::query_scalar("INSERT INTO users (email, password) VALUES (?, 'x') RETURNING id")
            .bind(email)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    /// Product row plus its detail row holding `stock`
    pub async fn insert_product(pool: &SqlitePool, name: &str, price: f64, stock: i64) -> i64 {
        let id = insert_product_without_details(pool, name, price).await;
        sqlx::query("INSERT INTO appliance_details (appliance_id, stock_quantity) VALUES (?, ?)")
            .bind(id)
            .bind(stock)
            .execute(pool)
            .await
            .unwrap();
        id
    }

    pub async fn insert_product_without_details(pool: &SqlitePool, name: &str, price: f64) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO appliance (name, type, price, photo_path) VALUES (?, 'Mixer', ?, NULL) RETURNING id",
        )
        .bind(name)
        .bind(price)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    pub async fn stock_of(pool: &SqlitePool, product_id: i64) -> i64 {
        sqlx::query_scalar("SELECT stock_quantity FROM appliance_details WHERE appliance_id = ?")
            .bind(product_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }
}
