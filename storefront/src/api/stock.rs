//! Admin stock endpoint

use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{StockAdjustRequest, StockAdjustResponse};

use crate::auth::AdminUser;
use crate::services;
use crate::state::AppState;

use super::{ApiResult, AppJson};

/// PATCH /api/appliance-details/{id}/stock
pub async fn adjust_stock(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(product_id): Path<i64>,
    AppJson(req): AppJson<StockAdjustRequest>,
) -> ApiResult<StockAdjustResponse> {
    tracing::debug!(admin_id = admin.user_id, product_id, "Stock adjustment requested");
    let new_stock =
        services::adjust_stock(&state.pool, product_id, &req.operation, req.quantity).await?;

    Ok(Json(StockAdjustResponse {
        success: true,
        new_stock,
    }))
}
