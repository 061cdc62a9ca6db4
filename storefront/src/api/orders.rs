//! Order endpoints: place order, lookup by transaction, order history

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::error::{AppError, ErrorCode};
use shared::models::{OrderDetail, OrderHistoryResponse, PlaceOrderRequest, PlaceOrderResponse};

use crate::auth::SessionUser;
use crate::db;
use crate::services::{self, PlaceOrder};
use crate::state::AppState;

use super::{ApiResult, AppJson};

/// POST /api/orders
pub async fn place_order(
    State(state): State<AppState>,
    user: SessionUser,
    AppJson(req): AppJson<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<PlaceOrderResponse>), AppError> {
    let order = PlaceOrder::from_request(user.user_id, req)?;
    let order_id = services::place_order(&state.pool, &order, state.amount_tolerance).await?;

    Ok((
        StatusCode::CREATED,
        Json(PlaceOrderResponse {
            order_id,
            message: "Order placed successfully".to_string(),
        }),
    ))
}

/// GET /api/orders/{transaction_id}
///
/// Orders of other users are reported as missing unless the caller is an admin.
pub async fn get_order(
    State(state): State<AppState>,
    user: SessionUser,
    Path(transaction_id): Path<String>,
) -> ApiResult<OrderDetail> {
    let found =
        db::orders::find_by_transaction(&state.pool, &transaction_id, user.user_id, user.is_admin)
            .await
            .map_err(|e| {
                tracing::error!("Order lookup error: {e}");
                AppError::new(ErrorCode::InternalError)
            })?;
    let detail = found.ok_or_else(|| {
        AppError::new(ErrorCode::OrderNotFound).with_detail("transaction_id", transaction_id)
    })?;

    Ok(Json(detail))
}

/// GET /api/user-summary
pub async fn order_history(
    State(state): State<AppState>,
    user: SessionUser,
) -> ApiResult<OrderHistoryResponse> {
    let orders = db::orders::history_for_user(&state.pool, user.user_id)
        .await
        .map_err(|e| {
            tracing::error!(user_id = user.user_id, "Order history query error: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;

    Ok(Json(OrderHistoryResponse { orders }))
}
