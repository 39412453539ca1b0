//! Admin authentication.
//!
//! The back office has a single admin whose credentials come from the
//! environment. A successful login returns an HS256 JWT which the admin UI
//! sends back as `Authorization: Bearer <token>`. Handlers that need an admin
//! take an [`AdminSession`] argument; extraction fails with 401 before the
//! handler body runs.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::config::AuthConfig;
use crate::error::AppError;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// The authenticated admin behind the current request.
#[derive(Debug, Clone, Serialize)]
pub struct AdminSession {
    pub email: String,
    pub role: String,
    pub expires_at: i64,
}

/// Exact comparison of the submitted pair against the configured pair.
pub fn credentials_match(config: &AuthConfig, email: &str, password: &str) -> bool {
    let email_ok = email.as_bytes().ct_eq(config.admin_email.as_bytes());
    let password_ok = password.as_bytes().ct_eq(config.admin_password.as_bytes());
    bool::from(email_ok & password_ok)
}

pub fn issue_token(config: &AuthConfig, email: &str) -> Result<String, AppError> {
    let iat = Utc::now().timestamp();
    let exp = i64::try_from(config.token_ttl.as_secs())
        .ok()
        .and_then(|ttl| iat.checked_add(ttl))
        .ok_or_else(|| AppError::Internal("token lifetime out of range".to_string()))?;
    let claims = Claims {
        sub: email.to_string(),
        role: ADMIN_ROLE.to_string(),
        iat,
        exp,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token signing failed: {e}")))
}

pub fn verify_token(config: &AuthConfig, token: &str) -> Result<AdminSession, AppError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| {
        log::warn!("Rejected admin token: {e}");
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    if data.claims.role != ADMIN_ROLE {
        return Err(AppError::Unauthorized("Admin access required".to_string()));
    }

    Ok(AdminSession {
        email: data.claims.sub,
        role: data.claims.role,
        expires_at: data.claims.exp,
    })
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequest for AdminSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<AuthConfig>>() else {
            return ready(Err(AppError::Internal(
                "auth config not registered".to_string(),
            )));
        };

        let result = match bearer_token(req) {
            Some(token) => verify_token(config, token),
            None => Err(AppError::Unauthorized("Authentication required".to_string())),
        };

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            admin_email: "admin@example.com".to_string(),
            admin_password: "hunter2".to_string(),
            jwt_secret: "test-secret".to_string(),
            token_ttl: Duration::from_secs(3600),
        }
    }

    #[test]
    fn test_credentials_must_match_exactly() {
        let config = config();
        assert!(credentials_match(&config, "admin@example.com", "hunter2"));
        assert!(!credentials_match(&config, "admin@example.com", "hunter3"));
        assert!(!credentials_match(&config, "Admin@example.com", "hunter2"));
        assert!(!credentials_match(&config, "admin@example.com", "hunter2 "));
        assert!(!credentials_match(&config, "", ""));
    }

    #[test]
    fn test_token_round_trip() {
        let config = config();
        let token = issue_token(&config, "admin@example.com").unwrap();
        let session = verify_token(&config, &token).unwrap();
        assert_eq!(session.email, "admin@example.com");
        assert_eq!(session.role, ADMIN_ROLE);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let token = issue_token(&config(), "admin@example.com").unwrap();
        let mut other = config();
        other.jwt_secret = "another-secret".to_string();
        assert!(matches!(
            verify_token(&other, &token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_oversized_lifetime_fails_without_panicking() {
        let mut config = config();
        config.token_ttl = Duration::from_secs(u64::MAX);
        assert!(matches!(
            issue_token(&config, "admin@example.com"),
            Err(AppError::Internal(_))
        ));

        config.token_ttl = Duration::from_secs(i64::MAX as u64);
        assert!(issue_token(&config, "admin@example.com").is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_token(&config(), "not.a.jwt").is_err());
    }
}
