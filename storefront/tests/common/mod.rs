//! Test harness: scratch database, router and request helpers

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use std::time::Duration;
use storefront::AppState;
use storefront::auth::create_token;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    _dir: tempfile::TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("api.db").display());
        let pool = storefront::db::connect(&url, 5, Duration::from_secs(5))
            .await
            .unwrap();
        let router = storefront::api::create_router(AppState::with_pool(pool.clone(), SECRET));
        Self {
            router,
            pool,
            _dir: dir,
        }
    }

    /// Insert a user and return (id, session token)
    pub async fn user(&self, email: &str, password_hash: &str, is_admin: bool) -> (i64, String) {
        let id: i64 =
            sqlx::query_scalar("INSERT INTO users (email, password) VALUES (?, ?) RETURNING id")
                .bind(email)
                .bind(password_hash)
                .fetch_one(&self.pool)
                .await
                .unwrap();
        (id, create_token(id, email, is_admin, SECRET).unwrap())
    }

    pub async fn product(&self, name: &str, price: f64, stock: i64) -> i64 {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO appliance (name, type, price, photo_path) VALUES (?, 'Oven', ?, '/img/oven.png') RETURNING id",
        )
        .bind(name)
        .bind(price)
        .fetch_one(&self.pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO appliance_details (appliance_id, stock_quantity) VALUES (?, ?)")
            .bind(id)
            .bind(stock)
            .execute(&self.pool)
            .await
            .unwrap();
        id
    }

    pub async fn delete_user(&self, user_id: i64) {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .unwrap();
    }

    pub async fn stock(&self, product_id: i64) -> i64 {
        sqlx::query_scalar("SELECT stock_quantity FROM appliance_details WHERE appliance_id = ?")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    /// Send one request; `token` goes into the session cookie
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        self.send_raw(method, uri, token, body.map(|json| json.to_string()))
            .await
    }

    /// Like [`send`](Self::send) with the JSON body passed through verbatim
    pub async fn send_raw(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(http::header::COOKIE, format!("sessionToken={token}"));
        }
        let request = match body {
            Some(text) => builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(text))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}
