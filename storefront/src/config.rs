//! Storefront server configuration

use rust_decimal::Decimal;
use std::str::FromStr;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Storefront server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// JWT secret for session tokens
    pub jwt_secret: String,
    /// Upper bound of pooled connections
    pub db_max_connections: u32,
    /// How long a statement waits on a locked database before failing
    pub db_busy_timeout_secs: u64,
    /// Accepted difference between a charged amount and price x quantity
    pub amount_tolerance: Decimal,
    /// `json` switches the log output to JSON lines
    pub log_format: String,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let amount_tolerance = match std::env::var("AMOUNT_TOLERANCE") {
            Ok(raw) => Decimal::from_str(raw.trim())
                .map_err(|e| format!("AMOUNT_TOLERANCE is not a decimal: {e}"))?,
            Err(_) => Decimal::new(1, 2),
        };
        if amount_tolerance.is_sign_negative() {
            return Err("AMOUNT_TOLERANCE must not be negative".into());
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://storefront.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            environment,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10),
            db_busy_timeout_secs: std::env::var("DB_BUSY_TIMEOUT_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
            amount_tolerance,
            log_format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_secret_dev_fallback() {
        let val = Config::require_secret("STOREFRONT_TEST_UNSET_SECRET", "development").unwrap();
        assert_eq!(val, "dev-STOREFRONT_TEST_UNSET_SECRET-not-for-production");
    }

    #[test]
    fn test_require_secret_production_rejects_missing() {
        let err = Config::require_secret("STOREFRONT_TEST_UNSET_SECRET", "production").unwrap_err();
        assert!(err.to_string().contains("must be set in production"));
    }
}
