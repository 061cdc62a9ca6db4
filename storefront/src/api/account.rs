//! Account endpoints

use axum::extract::State;
use serde::Deserialize;
use shared::error::{ApiResponse, AppError, ErrorCode};

use crate::auth::SessionUser;
use crate::db;
use crate::state::AppState;
use crate::util::{hash_password, verify_password};

use super::AppJson;

/// POST /api/change-password
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    user: SessionUser,
    AppJson(req): AppJson<ChangePasswordRequest>,
) -> Result<ApiResponse<()>, AppError> {
    for (field, value) in [
        ("currentPassword", &req.current_password),
        ("newPassword", &req.new_password),
        ("confirmPassword", &req.confirm_password),
    ] {
        if value.is_empty() {
            return Err(AppError::required(field));
        }
    }
    if req.new_password != req.confirm_password {
        return Err(AppError::new(ErrorCode::PasswordConfirmationMismatch));
    }

    let account = db::users::find_by_id(&state.pool, user.user_id)
        .await
        .map_err(|e| {
            tracing::error!("User query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    if !verify_password(&req.current_password, &account.password) {
        return Err(AppError::new(ErrorCode::CurrentPasswordIncorrect));
    }

    let hashed = hash_password(&req.new_password).map_err(|e| {
        tracing::error!("Password hash error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;
    db::users::update_password(&state.pool, account.id, &hashed)
        .await
        .map_err(|e| {
            tracing::error!("Password update error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    tracing::info!(user_id = account.id, email = %account.email, "Password changed");
    Ok(ApiResponse::ok("Password updated successfully"))
}
