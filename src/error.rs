use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use validator::ValidationErrors;

use crate::response::ErrorBody;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Payment gateway is not configured")]
    GatewayUnconfigured,

    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("Server error")]
    Database(#[from] sqlx::Error),

    #[error("Server error")]
    Internal(String),
}

impl AppError {
    pub fn not_found(entity: &str) -> Self {
        AppError::NotFound(format!("{entity} not found"))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let detail = errs
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .next()
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field} {detail}")
            })
            .collect();
        fields.sort();
        AppError::Validation(fields.join(", "))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::GatewayUnconfigured => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Gateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Database(e) => log::error!("Database error: {e}"),
            AppError::Internal(e) => log::error!("Internal error: {e}"),
            AppError::Gateway(e) => log::error!("Payment gateway error: {e}"),
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_errors_hide_details() {
        let err = AppError::Internal("disk on fire".to_string());
        assert_eq!(err.to_string(), "Server error");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.to_string(), "Server error");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Unauthorized("Invalid credentials".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::GatewayUnconfigured.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(AppError::not_found("Booking").to_string(), "Booking not found");
    }
}
