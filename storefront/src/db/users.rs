use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
}

pub async fn find_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as("SELECT id, email, password FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn update_password(
    pool: &SqlitePool,
    user_id: i64,
    hashed_password: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password = ? WHERE id = ?")
        .bind(hashed_password)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}
