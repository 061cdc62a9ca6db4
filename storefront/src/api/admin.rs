//! Admin order management

use axum::{Json, extract::State};
use shared::error::{AppError, ErrorCode};
use shared::models::AdminOrderLine;

use crate::auth::AdminUser;
use crate::db;
use crate::state::AppState;

use super::ApiResult;

/// GET /api/admin/orders
pub async fn list_orders(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Vec<AdminOrderLine>> {
    let lines = db::orders::list_all_lines(&state.pool).await.map_err(|e| {
        tracing::error!("Admin orders query error: {e}");
        AppError::new(ErrorCode::InternalError)
    })?;
    Ok(Json(lines))
}
