use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::handlers::bookings::{fetch_booking, fetch_owned_booking};
use crate::models::booking::{Booking, BookingStatus, PaymentStatus};
use crate::payments::{to_minor_units, verify_signature, Payments};
use crate::response;

pub const VERIFICATION_FAILED: &str = "Payment verification failed. Please contact support.";

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub booking_id: i64,
    pub reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub key: String,
    pub booking_id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyPaymentRequest {
    pub booking_id: i64,
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

pub async fn get_key(payments: web::Data<Payments>) -> Result<HttpResponse, AppError> {
    let key = payments.gateway().map(|g| g.key_id().to_string());
    Ok(response::ok(serde_json::json!({ "key": key })))
}

pub async fn create_order(
    pool: web::Data<SqlitePool>,
    payments: web::Data<Payments>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let mut conn = pool.acquire().await?;
    let booking = fetch_owned_booking(&mut conn, body.booking_id, &body.reference).await?;

    if !booking.awaiting_payment() {
        return Err(AppError::Conflict(
            "Booking is not awaiting payment".to_string(),
        ));
    }

    // Without keys the booking simply stays pending
    let gateway = payments.gateway().ok_or_else(|| {
        log::warn!("Order requested for booking {} but gateway is unconfigured", booking.id);
        AppError::GatewayUnconfigured
    })?;

    let amount = to_minor_units(booking.total_price);
    let receipt = format!("booking_{}", booking.id);
    let order = gateway
        .create_order(amount, &payments.currency, &receipt)
        .await?;

    sqlx::query(
        "UPDATE bookings SET payment_order_id = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
    )
    .bind(&order.id)
    .bind(booking.id)
    .execute(&mut *conn)
    .await?;

    log::info!("Created payment order {} for booking {}", order.id, booking.id);

    Ok(response::ok(CreateOrderResponse {
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        key: gateway.key_id().to_string(),
        booking_id: booking.id,
    }))
}

pub async fn verify_payment(
    pool: web::Data<SqlitePool>,
    payments: web::Data<Payments>,
    body: web::Json<VerifyPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let gateway = payments.gateway().ok_or(AppError::GatewayUnconfigured)?;

    let mut tx = pool.begin().await?;
    let booking = fetch_booking(&mut tx, body.booking_id).await?;

    let order_matches = booking.payment_order_id.as_deref() == Some(body.razorpay_order_id.as_str());
    let signature_ok = verify_signature(
        gateway.key_secret(),
        &body.razorpay_order_id,
        &body.razorpay_payment_id,
        &body.razorpay_signature,
    );

    if !order_matches || !signature_ok {
        log::warn!(
            "Payment verification failed for booking {} (order match: {}, signature ok: {})",
            booking.id,
            order_matches,
            signature_ok
        );
        return Err(AppError::BadRequest(VERIFICATION_FAILED.to_string()));
    }

    // The same callback delivered twice changes nothing
    if booking.payment_status == PaymentStatus::Paid
        && booking.payment_id.as_deref() == Some(body.razorpay_payment_id.as_str())
    {
        log::info!(
            "Payment {} for booking {} was already recorded",
            body.razorpay_payment_id,
            booking.id
        );
        return Ok(response::ok(booking));
    }

    if !booking.awaiting_payment() {
        return Err(AppError::Conflict(
            "Booking is not awaiting payment".to_string(),
        ));
    }

    // An open cancellation request is left for the admin to settle
    let status = match booking.status {
        BookingStatus::Pending => BookingStatus::Confirmed,
        other => other,
    };

    let updated = sqlx::query_as::<_, Booking>(
        r#"
        UPDATE bookings SET
            payment_status = 'paid',
            amount_paid = total_price,
            status = ?,
            payment_id = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ? AND payment_status = 'pending'
        RETURNING *
        "#,
    )
    .bind(status)
    .bind(&body.razorpay_payment_id)
    .bind(booking.id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::Conflict("Booking is not awaiting payment".to_string()))?;

    tx.commit().await?;

    log::info!(
        "Payment {} verified for booking {}",
        body.razorpay_payment_id,
        booking.id
    );

    Ok(response::ok(updated))
}
