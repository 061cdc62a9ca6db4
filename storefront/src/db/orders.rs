//! Order read queries
//!
//! Writes happen only inside the order placement transaction
//! (`services::order_placement`).

use shared::models::{AdminOrderLine, Order, OrderDetail, OrderHistoryItem, OrderLine, OrderSummary};
use sqlx::SqlitePool;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Order with its lines, looked up by the payment transaction reference
///
/// References are client supplied and not unique, so the lookup is limited to
/// `user_id`'s orders unless `is_admin`. The newest match wins.
pub async fn find_by_transaction(
    pool: &SqlitePool,
    transaction_id: &str,
    user_id: i64,
    is_admin: bool,
) -> Result<Option<OrderDetail>, BoxError> {
    let order: Option<Order> = sqlx::query_as(
        "SELECT id, user_id, total_amount, payment_method, transaction_id, delivery_address, \
         payment_status, created_at FROM orders \
         WHERE transaction_id = ? AND (user_id = ? OR ?) ORDER BY id DESC LIMIT 1",
    )
    .bind(transaction_id)
    .bind(user_id)
    .bind(is_admin)
    .fetch_optional(pool)
    .await?;

    let Some(order) = order else {
        return Ok(None);
    };

    let items: Vec<OrderLine> = sqlx::query_as(
        "SELECT id, order_id, appliance_id, quantity, unit_price FROM order_items WHERE order_id = ? ORDER BY id",
    )
    .bind(order.id)
    .fetch_all(pool)
    .await?;

    Ok(Some(OrderDetail { order, items }))
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    order_id: i64,
    order_date: i64,
    total_amount: f64,
    payment_status: String,
    payment_method: String,
    transaction_id: String,
    delivery_address: String,
    item_id: i64,
    quantity: i32,
    unit_price: f64,
    appliance_id: i64,
    appliance_name: String,
    appliance_type: String,
    appliance_image: Option<String>,
}

/// A user's orders, newest first, each with its lines joined to the product
pub async fn history_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<OrderSummary>, BoxError> {
    let rows: Vec<HistoryRow> = sqlx::query_as(
        "SELECT o.id AS order_id, o.created_at AS order_date, o.total_amount, o.payment_status, \
         o.payment_method, o.transaction_id, o.delivery_address, \
         oi.id AS item_id, oi.quantity, oi.unit_price, \
         a.id AS appliance_id, a.name AS appliance_name, a.type AS appliance_type, \
         a.photo_path AS appliance_image \
         FROM orders o \
         JOIN order_items oi ON oi.order_id = o.id \
         JOIN appliance a ON a.id = oi.appliance_id \
         WHERE o.user_id = ? \
         ORDER BY o.created_at DESC, o.id DESC, oi.id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(group_history(rows))
}

/// Rows arrive sorted by order, so consecutive rows of one order are folded together
fn group_history(rows: Vec<HistoryRow>) -> Vec<OrderSummary> {
    let mut orders: Vec<OrderSummary> = Vec::new();
    for row in rows {
        let item = OrderHistoryItem {
            item_id: row.item_id,
            quantity: row.quantity,
            unit_price: row.unit_price,
            appliance_id: row.appliance_id,
            appliance_name: row.appliance_name,
            appliance_type: row.appliance_type,
            appliance_image: row.appliance_image,
        };
        match orders.last_mut() {
            Some(last) if last.order_id == row.order_id => last.items.push(item),
            _ => orders.push(OrderSummary {
                order_id: row.order_id,
                order_date: row.order_date,
                total_amount: row.total_amount,
                payment_status: row.payment_status,
                payment_method: row.payment_method,
                transaction_id: row.transaction_id,
                delivery_address: row.delivery_address,
                items: vec![item],
            }),
        }
    }
    orders
}

/// Every order line with its order, product and buyer, newest first
pub async fn list_all_lines(pool: &SqlitePool) -> Result<Vec<AdminOrderLine>, BoxError> {
    let rows = sqlx::query_as::<_, AdminOrderLine>(
        "SELECT oi.id, oi.order_id, oi.appliance_id, oi.quantity, oi.unit_price, \
         a.name AS appliance_name, a.type AS appliance_type, a.photo_path, \
         u.email AS user_email, u.id AS user_id, o.created_at, o.transaction_id, \
         o.payment_status, o.payment_method, o.delivery_address, o.total_amount \
         FROM order_items oi \
         JOIN appliance a ON a.id = oi.appliance_id \
         JOIN orders o ON o.id = oi.order_id \
         JOIN users u ON u.id = o.user_id \
         ORDER BY o.created_at DESC, oi.id DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
