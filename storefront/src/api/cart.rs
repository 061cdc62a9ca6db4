//! Cart endpoints; every mutation answers with the caller's updated cart

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{AddToCartRequest, CartLine, UpdateCartRequest};

use crate::auth::SessionUser;
use crate::db;
use crate::error::ServiceError;
use crate::money::MAX_QUANTITY;
use crate::state::AppState;

use super::{ApiResult, AppJson};

fn internal(context: &'static str) -> impl Fn(Box<dyn std::error::Error + Send + Sync>) -> AppError {
    move |e| {
        tracing::error!("{context}: {e}");
        AppError::new(ErrorCode::InternalError)
    }
}

fn quantity_out_of_range(min: i32) -> AppError {
    AppError::with_message(
        ErrorCode::ValueOutOfRange,
        format!("quantity must be between {min} and {MAX_QUANTITY}"),
    )
    .with_detail("field", "quantity")
}

async fn current_cart(state: &AppState, user_id: i64) -> ApiResult<Vec<CartLine>> {
    let lines = db::cart::list(&state.pool, user_id)
        .await
        .map_err(internal("Cart query error"))?;
    Ok(Json(lines))
}

/// GET /api/cart
pub async fn get_cart(State(state): State<AppState>, user: SessionUser) -> ApiResult<Vec<CartLine>> {
    current_cart(&state, user.user_id).await
}

/// POST /api/cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    user: SessionUser,
    AppJson(req): AppJson<AddToCartRequest>,
) -> ApiResult<Vec<CartLine>> {
    if !(1..=MAX_QUANTITY).contains(&req.quantity) {
        return Err(quantity_out_of_range(1));
    }

    let exists = db::cart::product_exists(&state.pool, req.appliance_id)
        .await
        .map_err(internal("Product lookup error"))?;
    if !exists {
        return Err(
            AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", req.appliance_id)
        );
    }

    if let Err(e) = db::cart::add(&state.pool, user.user_id, req.appliance_id, req.quantity).await {
        let err = ServiceError::Db(e);
        if !err.is_foreign_key_violation() {
            return Err(err.into());
        }
        // The session outlived its account, or the product went away since the check
        let user_exists = db::users::find_by_id(&state.pool, user.user_id)
            .await
            .map_err(ServiceError::from)?
            .is_some();
        return Err(if user_exists {
            AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", req.appliance_id)
        } else {
            AppError::new(ErrorCode::UserNotFound)
        });
    }

    current_cart(&state, user.user_id).await
}

/// PUT /api/cart/{id}
///
/// A quantity of zero or less removes the line.
pub async fn update_cart_line(
    State(state): State<AppState>,
    user: SessionUser,
    Path(line_id): Path<i64>,
    AppJson(req): AppJson<UpdateCartRequest>,
) -> ApiResult<Vec<CartLine>> {
    if req.quantity > MAX_QUANTITY {
        return Err(quantity_out_of_range(0));
    }
    let result = if req.quantity <= 0 {
        db::cart::remove(&state.pool, user.user_id, line_id).await
    } else {
        db::cart::set_quantity(&state.pool, user.user_id, line_id, req.quantity).await
    };
    let found = result.map_err(internal("Cart update error"))?;

    if !found {
        return Err(AppError::new(ErrorCode::CartItemNotFound).with_detail("id", line_id));
    }
    current_cart(&state, user.user_id).await
}

/// DELETE /api/cart/{id}
pub async fn remove_cart_line(
    State(state): State<AppState>,
    user: SessionUser,
    Path(line_id): Path<i64>,
) -> ApiResult<Vec<CartLine>> {
    let found = db::cart::remove(&state.pool, user.user_id, line_id)
        .await
        .map_err(internal("Cart delete error"))?;

    if !found {
        return Err(AppError::new(ErrorCode::CartItemNotFound).with_detail("id", line_id));
    }
    current_cart(&state, user.user_id).await
}
