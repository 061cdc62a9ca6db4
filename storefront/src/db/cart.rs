//! Cart queries
//!
//! Every statement is scoped by `user_id`: a line owned by another user
//! behaves exactly like a missing one.

use shared::models::CartLine;
use sqlx::SqlitePool;

use crate::money::MAX_QUANTITY;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const CART_LINE_SELECT: &str = "SELECT c.id, c.user_id, c.appliance_id, c.quantity, \
     a.name, a.price, a.photo_path \
     FROM cart_items c JOIN appliance a ON a.id = c.appliance_id";

pub async fn list(pool: &SqlitePool, user_id: i64) -> Result<Vec<CartLine>, BoxError> {
    let rows = sqlx::query_as::<_, CartLine>(&format!(
        "{CART_LINE_SELECT} WHERE c.user_id = ? ORDER BY c.id"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Add `quantity` of a product, incrementing the existing line if there is one
///
/// The merged quantity saturates at [`MAX_QUANTITY`].
pub async fn add(
    pool: &SqlitePool,
    user_id: i64,
    appliance_id: i64,
    quantity: i32,
) -> Result<(), BoxError> {
    sqlx::query(
        "INSERT INTO cart_items (user_id, appliance_id, quantity) VALUES (?, ?, ?)
         ON CONFLICT (user_id, appliance_id)
         DO UPDATE SET quantity = MIN(quantity + excluded.quantity, ?)",
    )
    .bind(user_id)
    .bind(appliance_id)
    .bind(quantity)
    .bind(MAX_QUANTITY)
    .execute(pool)
    .await?;
    Ok(())
}

/// Set a line's quantity; returns false when the caller owns no such line
pub async fn set_quantity(
    pool: &SqlitePool,
    user_id: i64,
    line_id: i64,
    quantity: i32,
) -> Result<bool, BoxError> {
    let result = sqlx::query("UPDATE cart_items SET quantity = ? WHERE id = ? AND user_id = ?")
        .bind(quantity)
        .bind(line_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete a line; returns false when the caller owns no such line
pub async fn remove(pool: &SqlitePool, user_id: i64, line_id: i64) -> Result<bool, BoxError> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = ? AND user_id = ?")
        .bind(line_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn product_exists(pool: &SqlitePool, appliance_id: i64) -> Result<bool, BoxError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM appliance WHERE id = ?")
        .bind(appliance_id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}
