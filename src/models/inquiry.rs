use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum InquiryStatus {
    New,
    Contacted,
    Resolved,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Inquiry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub status: InquiryStatus,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateInquiry {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 5000, message = "is required"))]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInquiryStatus {
    pub status: InquiryStatus,
}

#[derive(Debug, Deserialize)]
pub struct InquiryFilter {
    pub status: Option<InquiryStatus>,
}
