//! Service-layer error type for the storefront
//!
//! `ServiceError` sits between the database layer (`sqlx::Error`, `BoxError`)
//! and the API-layer error (`AppError`) so services can propagate with `?`.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error
///
/// - `Db`: database/infrastructure errors (logged, mapped to InternalError)
/// - `App`: business-rule errors (passed to the client as-is)
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl ServiceError {
    fn database_error(&self) -> Option<&dyn sqlx::error::DatabaseError> {
        let ServiceError::Db(err) = self else {
            return None;
        };
        err.downcast_ref::<sqlx::Error>()
            .and_then(|e| e.as_database_error())
    }

    /// True when a `CHECK` constraint rejected the statement
    pub fn is_check_violation(&self) -> bool {
        self.database_error().is_some_and(|db| db.is_check_violation())
    }

    /// True when a `FOREIGN KEY` constraint rejected the statement
    pub fn is_foreign_key_violation(&self) -> bool {
        self.database_error().is_some_and(|db| db.is_foreign_key_violation())
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
