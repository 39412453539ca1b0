use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use subtle::ConstantTimeEq;
use validator::Validate;

use crate::payments::to_minor_units;

const REFERENCE_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    CancellationRequested,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        use BookingStatus::*;

        matches!(
            (self, next),
            (Pending, Confirmed | CancellationRequested | Cancelled)
                | (Confirmed, CancellationRequested | Cancelled | Completed)
                | (CancellationRequested, Cancelled | Confirmed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Completed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::CancellationRequested => "cancellation_requested",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
    Refunded,
    PartiallyRefunded,
}

impl PaymentStatus {
    pub fn is_refundable(self) -> bool {
        matches!(
            self,
            PaymentStatus::Paid | PaymentStatus::Partial | PaymentStatus::PartiallyRefunded
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub reference: String,
    pub package_id: i64,
    pub package_name: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub trip_date: chrono::NaiveDate,
    pub travelers: i64,
    pub total_price: f64,
    pub special_requests: Option<String>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_order_id: Option<String>,
    pub payment_id: Option<String>,
    pub amount_paid: f64,
    /// Sum of every refund issued so far.
    pub refund_amount: f64,
    pub refund_reason: Option<String>,
    pub refunded_at: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl Booking {
    /// A booking can be sent to the gateway until it is paid or closed.
    pub fn awaiting_payment(&self) -> bool {
        self.payment_status == PaymentStatus::Pending && !self.status.is_terminal()
    }

    pub fn reference_matches(&self, candidate: &str) -> bool {
        bool::from(self.reference.as_bytes().ct_eq(candidate.as_bytes()))
    }

    /// Money collected and not yet handed back.
    pub fn refundable_amount(&self) -> f64 {
        (self.amount_paid - self.refund_amount).max(0.0)
    }
}

/// Random customer-facing booking reference.
pub fn new_reference() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(REFERENCE_LEN)
        .map(char::from)
        .collect()
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateBooking {
    pub package_id: i64,
    #[validate(length(min = 1, message = "is required"))]
    pub customer_name: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 7, max = 20, message = "must be a valid phone number"))]
    pub phone: String,
    pub trip_date: chrono::NaiveDate,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub travelers: u32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateBookingStatus {
    pub status: BookingStatus,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RefundBooking {
    #[validate(range(min = 0.01, message = "must be positive"))]
    pub amount: f64,
    #[validate(length(min = 1, message = "is required"))]
    pub reason: String,
}

/// Customer proof of ownership for the public booking routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingAccess {
    pub reference: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CancellationRequest {
    pub reference: String,
}

#[derive(Debug, Deserialize)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
}

/// Payment status once `refunded` in total has gone back out of `paid`.
pub fn refund_outcome(paid: f64, refunded: f64) -> PaymentStatus {
    if to_minor_units(refunded) >= to_minor_units(paid) {
        PaymentStatus::Refunded
    } else {
        PaymentStatus::PartiallyRefunded
    }
}
