//! Admin stock adjustment

use shared::error::{AppError, ErrorCode};
use shared::models::StockOperation;
use sqlx::SqlitePool;

use crate::error::ServiceResult;

/// Largest quantity a single adjustment may carry
pub const MAX_ADJUST_QUANTITY: i64 = 1_000_000;

/// Ceiling for a product's stock counter
pub const MAX_STOCK: i64 = 1_000_000_000;

/// Apply `operation` with `quantity` to a product's stock counter and return the new stock
///
/// Removal is clamped at zero and addition may not push the counter past
/// [`MAX_STOCK`]. Read, compute and write happen in a single statement, so
/// concurrent adjustments of one product never lose an update.
pub async fn adjust_stock(
    pool: &SqlitePool,
    product_id: i64,
    operation: &str,
    quantity: i64,
) -> ServiceResult<i64> {
    let operation: StockOperation = operation.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::StockInvalidOperation,
            format!("Invalid operation '{operation}', expected add or remove"),
        )
    })?;
    if quantity <= 0 || quantity > MAX_ADJUST_QUANTITY {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("quantity must be between 1 and {MAX_ADJUST_QUANTITY}"),
        )
        .with_detail("field", "quantity")
        .into());
    }

    let mut tx = pool.begin().await?;

    let new_stock: Option<i64> = match operation {
        StockOperation::Add => {
            sqlx::query_scalar(
                "UPDATE appliance_details SET stock_quantity = stock_quantity + ? \
                 WHERE appliance_id = ? AND stock_quantity <= ? RETURNING stock_quantity",
            )
            .bind(quantity)
            .bind(product_id)
            .bind(MAX_STOCK - quantity)
            .fetch_optional(&mut *tx)
            .await?
        }
        StockOperation::Remove => {
            sqlx::query_scalar(
                "UPDATE appliance_details SET stock_quantity = MAX(0, stock_quantity - ?) \
                 WHERE appliance_id = ? RETURNING stock_quantity",
            )
            .bind(quantity)
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?
        }
    };

    let Some(new_stock) = new_stock else {
        let exists: Option<i64> = sqlx::query_scalar(
            "SELECT appliance_id FROM appliance_details WHERE appliance_id = ?",
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;
        return Err(match exists {
            Some(_) => AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("stock may not exceed {MAX_STOCK}"),
            )
            .with_detail("field", "quantity"),
            None => AppError::new(ErrorCode::ProductDetailNotFound)
                .with_detail("product_id", product_id),
        }
        .into());
    };

    tx.commit().await?;

    tracing::info!(
        product_id,
        operation = operation.as_str(),
        quantity,
        new_stock,
        "Stock adjusted"
    );
    Ok(new_stock)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing;
    use crate::error::ServiceError;

    fn app_code(err: ServiceError) -> ErrorCode {
        match err {
            ServiceError::App(e) => e.code,
            ServiceError::Db(e) => panic!("unexpected database error: {e}"),
        }
    }

    #[tokio::test]
    async fn test_add_increases_stock() {
        let (_dir, pool) = testing::scratch_pool().await;
        let product = testing::insert_product(&pool, "Kettle", 25.0, 4).await;

        assert_eq!(adjust_stock(&pool, product, "add", 1).await.unwrap(), 5);
        assert_eq!(adjust_stock(&pool, product, "add", 20).await.unwrap(), 25);
        assert_eq!(testing::stock_of(&pool, product).await, 25);
    }

    #[tokio::test]
    async fn test_remove_clamps_at_zero() {
        let (_dir, pool) = testing::scratch_pool().await;
        let product = testing::insert_product(&pool, "Oven", 300.0, 10).await;

        assert_eq!(adjust_stock(&pool, product, "remove", 15).await.unwrap(), 0);
        assert_eq!(testing::stock_of(&pool, product).await, 0);
    }

    #[tokio::test]
    async fn test_remove_within_stock() {
        let (_dir, pool) = testing::scratch_pool().await;
        let product = testing::insert_product(&pool, "Oven", 300.0, 10).await;

        assert_eq!(adjust_stock(&pool, product, "remove", 4).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_invalid_operation_does_not_mutate() {
        let (_dir, pool) = testing::scratch_pool().await;
        let product = testing::insert_product(&pool, "Mixer", 80.0, 7).await;

        for op in ["set", "ADD", ""] {
            let err = adjust_stock(&pool, product, op, 3).await.unwrap_err();
            assert_eq!(app_code(err), ErrorCode::StockInvalidOperation);
        }
        assert_eq!(testing::stock_of(&pool, product).await, 7);
    }

    #[tokio::test]
    async fn test_non_positive_quantity_rejected() {
        let (_dir, pool) = testing::scratch_pool().await;
        let product = testing::insert_product(&pool, "Mixer", 80.0, 7).await;

        let err = adjust_stock(&pool, product, "add", 0).await.unwrap_err();
        assert_eq!(app_code(err), ErrorCode::ValueOutOfRange);
        let err = adjust_stock(&pool, product, "remove", -2).await.unwrap_err();
        assert_eq!(app_code(err), ErrorCode::ValueOutOfRange);
        assert_eq!(testing::stock_of(&pool, product).await, 7);
    }

    #[tokio::test]
    async fn test_oversized_quantity_rejected_without_mutation() {
        let (_dir, pool) = testing::scratch_pool().await;
        let product = testing::insert_product(&pool, "Mixer", 80.0, 7).await;

        let err = adjust_stock(&pool, product, "add", i64::MAX).await.unwrap_err();
        assert_eq!(app_code(err), ErrorCode::ValueOutOfRange);
        let err = adjust_stock(&pool, product, "remove", MAX_ADJUST_QUANTITY + 1)
            .await
            .unwrap_err();
        assert_eq!(app_code(err), ErrorCode::ValueOutOfRange);

        assert_eq!(testing::stock_of(&pool, product).await, 7);
        let kind: String = sqlx::query_scalar(
            "SELECT typeof(stock_quantity) FROM appliance_details WHERE appliance_id = ?",
        )
        .bind(product)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(kind, "integer");
        assert_eq!(adjust_stock(&pool, product, "remove", 1).await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_add_stops_at_stock_ceiling() {
        let (_dir, pool) = testing::scratch_pool().await;
        let product = testing::insert_product(&pool, "Mixer", 80.0, MAX_STOCK - 5).await;

        let err = adjust_stock(&pool, product, "add", 6).await.unwrap_err();
        assert_eq!(app_code(err), ErrorCode::ValueOutOfRange);
        assert_eq!(testing::stock_of(&pool, product).await, MAX_STOCK - 5);
        assert_eq!(adjust_stock(&pool, product, "add", 5).await.unwrap(), MAX_STOCK);
    }

    #[tokio::test]
    async fn test_unknown_product_not_found() {
        let (_dir, pool) = testing::scratch_pool().await;
        let without_details = testing::insert_product_without_details(&pool, "Grill", 60.0).await;

        let err = adjust_stock(&pool, 9999, "add", 1).await.unwrap_err();
        assert_eq!(app_code(err), ErrorCode::ProductDetailNotFound);
        let err = adjust_stock(&pool, without_details, "add", 1).await.unwrap_err();
        assert_eq!(app_code(err), ErrorCode::ProductDetailNotFound);
        assert_eq!(testing::count(&pool, "appliance_details").await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_adds_do_not_lose_updates() {
        let (_dir, pool) = testing::scratch_pool().await;
        let product = testing::insert_product(&pool, "Fridge", 900.0, 10).await;

        let (a, b) = tokio::join!(
            adjust_stock(&pool, product, "add", 5),
            adjust_stock(&pool, product, "add", 3),
        );
        a.unwrap();
        b.unwrap();
        assert_eq!(testing::stock_of(&pool, product).await, 18);
    }

    #[tokio::test]
    async fn test_many_concurrent_adjustments() {
        let (_dir, pool) = testing::scratch_pool().await;
        let product = testing::insert_product(&pool, "Fridge", 900.0, 100).await;

        let mut handles = Vec::new();
        for i in 0..20 {
            let pool = pool.clone();
            let op = if i % 2 == 0 { "add" } else { "remove" };
            handles.push(tokio::spawn(async move {
                adjust_stock(&pool, product, op, 2).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        // 10 adds and 10 removes of 2 never touch the floor from 100
        assert_eq!(testing::stock_of(&pool, product).await, 100);
    }
}
