use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::{self, AdminSession, ADMIN_ROLE};
use crate::config::AuthConfig;
use crate::error::AppError;
use crate::response;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    config: web::Data<AuthConfig>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    if !auth::credentials_match(&config, &body.email, &body.password) {
        log::warn!("Failed admin login for {}", body.email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = auth::issue_token(&config, &body.email)?;
    log::info!("Admin {} logged in", body.email);

    Ok(response::ok(serde_json::json!({
        "token": token,
        "expires_in": config.token_ttl.as_secs(),
        "admin": {
            "email": body.email,
            "role": ADMIN_ROLE,
        }
    })))
}

pub async fn verify(admin: AdminSession) -> Result<HttpResponse, AppError> {
    Ok(response::ok(admin))
}
