//! Application state

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::time::Duration;

use crate::config::Config;
use crate::db;
use crate::money::MONEY_TOLERANCE;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state, built once at startup
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// Accepted difference between a charged amount and price x quantity
    pub amount_tolerance: Decimal,
}

impl AppState {
    /// Open the database (migrations included) and build the state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = db::connect(
            &config.database_url,
            config.db_max_connections,
            Duration::from_secs(config.db_busy_timeout_secs),
        )
        .await?;

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            amount_tolerance: config.amount_tolerance,
        })
    }

    /// State over an already opened pool, with the default amount tolerance
    pub fn with_pool(pool: SqlitePool, jwt_secret: impl Into<String>) -> Self {
        Self {
            pool,
            jwt_secret: jwt_secret.into(),
            amount_tolerance: MONEY_TOLERANCE,
        }
    }
}
