//! Buy-now order placement
//!
//! One transaction inserts the order, its single line and decrements the
//! product's stock. Any failure drops the transaction, which rolls back all
//! three writes.

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::{PaymentMethod, PlaceOrderRequest};
use sqlx::SqlitePool;

use crate::error::{ServiceError, ServiceResult};
use crate::money;

/// Validated checkout input
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    /// Total charged by the payment step
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub transaction_id: String,
    pub delivery_address: String,
}

impl PlaceOrder {
    /// Validate a checkout payload for `user_id`; nothing here touches the database
    pub fn from_request(user_id: i64, req: PlaceOrderRequest) -> Result<Self, AppError> {
        if !(1..=money::MAX_QUANTITY).contains(&req.quantity) {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("quantity must be between 1 and {}", money::MAX_QUANTITY),
            )
            .with_detail("field", "quantity"));
        }
        if !req.amount.is_finite() || req.amount < 0.0 {
            return Err(
                AppError::validation("amount must be a non-negative number")
                    .with_detail("field", "amount"),
            );
        }
        if req.amount > money::MAX_PAYMENT_AMOUNT {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("amount may not exceed {}", money::MAX_PAYMENT_AMOUNT),
            )
            .with_detail("field", "amount"));
        }
        let payment_method: PaymentMethod = req.payment_method.parse().map_err(|_| {
            AppError::with_message(
                ErrorCode::PaymentInvalidMethod,
                format!("Unsupported payment method '{}'", req.payment_method),
            )
        })?;
        let transaction_id = req.transaction_id.trim();
        if transaction_id.is_empty() {
            return Err(AppError::new(ErrorCode::PaymentReferenceMissing));
        }
        let delivery_address = req.delivery_address.trim();
        if delivery_address.is_empty() {
            return Err(AppError::required("deliveryAddress"));
        }

        Ok(Self {
            user_id,
            product_id: req.product_id,
            quantity: req.quantity,
            amount: req.amount,
            payment_method,
            transaction_id: transaction_id.to_string(),
            delivery_address: delivery_address.to_string(),
        })
    }
}

/// Record a paid order and take its quantity out of stock; returns the order id
///
/// The charged amount must match the current price x quantity within
/// `tolerance`. The stored unit price is `amount / quantity`.
pub async fn place_order(
    pool: &SqlitePool,
    order: &PlaceOrder,
    tolerance: Decimal,
) -> ServiceResult<i64> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    // First statement is a write so the transaction holds the write lock
    // before it reads the price.
    let order_id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (user_id, total_amount, payment_method, transaction_id, \
         delivery_address, payment_status, created_at) \
         VALUES (?, ?, ?, ?, ?, 'completed', ?) RETURNING id",
    )
    .bind(order.user_id)
    .bind(money::to_f64(money::to_decimal(order.amount)))
    .bind(order.payment_method.as_str())
    .bind(&order.transaction_id)
    .bind(&order.delivery_address)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        // user_id is the only foreign key on orders
        let err = ServiceError::from(e);
        if err.is_foreign_key_violation() {
            ServiceError::App(
                AppError::new(ErrorCode::UserNotFound).with_detail("user_id", order.user_id),
            )
        } else {
            err
        }
    })?;

    let price: Option<f64> = sqlx::query_scalar("SELECT price FROM appliance WHERE id = ?")
        .bind(order.product_id)
        .fetch_optional(&mut *tx)
        .await?;
    let price = price.ok_or_else(|| {
        AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", order.product_id)
    })?;

    let expected = money::line_total(price, order.quantity);
    let matches =
        expected.is_some_and(|expected| money::amounts_match(order.amount, expected, tolerance));
    if !matches {
        tracing::warn!(
            user_id = order.user_id,
            product_id = order.product_id,
            claimed = order.amount,
            price,
            expected = ?expected,
            "Order amount does not match product price"
        );
        let mut err = AppError::new(ErrorCode::OrderAmountMismatch);
        if let Some(expected) = expected {
            err = err.with_detail("expected", money::to_f64(expected));
        }
        return Err(err.into());
    }

    sqlx::query(
        "INSERT INTO order_items (order_id, appliance_id, quantity, unit_price) VALUES (?, ?, ?, ?)",
    )
    .bind(order_id)
    .bind(order.product_id)
    .bind(order.quantity)
    .bind(money::unit_price_of(order.amount, order.quantity))
    .execute(&mut *tx)
    .await?;

    let new_stock: Option<i64> = sqlx::query_scalar(
        "UPDATE appliance_details SET stock_quantity = stock_quantity - ? \
         WHERE appliance_id = ? RETURNING stock_quantity",
    )
    .bind(order.quantity)
    .bind(order.product_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| {
        let err = ServiceError::from(e);
        if err.is_check_violation() {
            ServiceError::App(
                AppError::new(ErrorCode::ProductOutOfStock)
                    .with_detail("product_id", order.product_id),
            )
        } else {
            err
        }
    })?;
    let new_stock = new_stock.ok_or_else(|| {
        AppError::new(ErrorCode::ProductDetailNotFound).with_detail("product_id", order.product_id)
    })?;

    tx.commit().await?;

    tracing::info!(
        order_id,
        user_id = order.user_id,
        product_id = order.product_id,
        quantity = order.quantity,
        new_stock,
        "Order placed"
    );
    Ok(order_id)
}
