//! Session token issuing, validation and the request extractors built on it

use axum::extract::FromRequestParts;
use http::request::Parts;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use crate::state::AppState;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "sessionToken";

const JWT_EXPIRY_HOURS: i64 = 1;

/// JWT claims for a storefront session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated caller
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: i64,
    pub email: String,
    pub is_admin: bool,
}

/// Authenticated caller holding the admin flag
#[derive(Debug, Clone)]
pub struct AdminUser(pub SessionUser);

/// Create a session token for a user
pub fn create_token(
    user_id: i64,
    email: &str,
    is_admin: bool,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        email: email.to_string(),
        is_admin,
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate a token and turn its claims into a `SessionUser`
pub fn decode_token(token: &str, secret: &str) -> Result<SessionUser, AppError> {
    let token_data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::new(ErrorCode::TokenExpired),
            _ => AppError::invalid_token("Invalid session token"),
        }
    })?;

    let claims = token_data.claims;
    let user_id = claims
        .sub
        .parse()
        .map_err(|_| AppError::invalid_token("Malformed session subject"))?;

    Ok(SessionUser {
        user_id,
        email: claims.email,
        is_admin: claims.is_admin,
    })
}

/// Session cookie first, then `Authorization: Bearer`
fn token_from_parts(parts: &Parts) -> Option<&str> {
    let from_cookie = parts
        .headers
        .get_all(http::header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty());

    from_cookie.or_else(|| {
        parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    })
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<SessionUser>() {
            return Ok(user.clone());
        }

        let Some(token) = token_from_parts(parts) else {
            tracing::debug!(uri = %parts.uri, "Request without session token");
            return Err(AppError::not_authenticated());
        };

        let user = decode_token(token, &state.jwt_secret)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = SessionUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            tracing::warn!(user_id = user.user_id, "Admin route refused");
            return Err(AppError::new(ErrorCode::AdminRequired));
        }
        Ok(AdminUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn parts_with(name: http::HeaderName, value: &str) -> Parts {
        let (parts, _) = http::Request::builder()
            .uri("/api/orders")
            .header(name, value)
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_token_round_trip() {
        let token = create_token(42, "buyer@example.com", false, SECRET).unwrap();
        let user = decode_token(&token, SECRET).unwrap();
        assert_eq!(user.user_id, 42);
        assert_eq!(user.email, "buyer@example.com");
        assert!(!user.is_admin);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = create_token(1, "a@example.com", true, SECRET).unwrap();
        let err = decode_token(&token, "other-secret").unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
    }

    #[test]
    fn test_expired_token() {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = SessionClaims {
            sub: "1".into(),
            email: "a@example.com".into(),
            is_admin: false,
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let err = decode_token(&token, SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenExpired);
    }

    #[test]
    fn test_token_read_from_cookie() {
        let parts = parts_with(http::header::COOKIE, "theme=dark; sessionToken=abc.def.ghi");
        assert_eq!(token_from_parts(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_token_read_from_bearer_header() {
        let parts = parts_with(http::header::AUTHORIZATION, "Bearer abc.def.ghi");
        assert_eq!(token_from_parts(&parts), Some("abc.def.ghi"));

        let parts = parts_with(http::header::AUTHORIZATION, "Basic dXNlcjpwYXNz");
        assert_eq!(token_from_parts(&parts), None);
    }
}
