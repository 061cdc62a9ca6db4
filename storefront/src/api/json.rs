//! JSON body extractor that rejects with the structured error body

use axum::{
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};

/// Like `axum::Json`, but a malformed body answers with an [`AppError`]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let code = match rejection.status() {
        StatusCode::UNPROCESSABLE_ENTITY => ErrorCode::ValidationFailed,
        StatusCode::UNSUPPORTED_MEDIA_TYPE => ErrorCode::InvalidRequest,
        _ => ErrorCode::InvalidFormat,
    };
    tracing::debug!(status = %rejection.status(), "Rejected request body: {}", rejection.body_text());
    AppError::with_message(code, rejection.body_text())
}
