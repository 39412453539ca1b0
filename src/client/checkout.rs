//! Storefront checkout sequence.
//!
//! create booking → fetch gateway key → create order → open the checkout
//! widget → verify the callback server-side. Steps run strictly in order and
//! nothing is retried. A booking created before a later step fails stays in
//! the pending-payment state.

use async_trait::async_trait;
use thiserror::Error;

use super::{ApiClient, ClientError};
use crate::handlers::payments::{CreateOrderResponse, VerifyPaymentRequest, VERIFICATION_FAILED};
use crate::models::booking::{Booking, CreateBooking};

#[async_trait]
pub trait StorefrontApi: Sync {
    async fn create_booking(&self, request: &CreateBooking) -> Result<Booking, ClientError>;
    async fn payment_key(&self) -> Result<Option<String>, ClientError>;
    async fn create_payment_order(
        &self,
        booking_id: i64,
        reference: &str,
    ) -> Result<CreateOrderResponse, ClientError>;
    async fn verify_payment(&self, request: &VerifyPaymentRequest)
        -> Result<Booking, ClientError>;
}

#[async_trait]
impl StorefrontApi for ApiClient {
    async fn create_booking(&self, request: &CreateBooking) -> Result<Booking, ClientError> {
        ApiClient::create_booking(self, request).await
    }

    async fn payment_key(&self) -> Result<Option<String>, ClientError> {
        ApiClient::payment_key(self).await
    }

    async fn create_payment_order(
        &self,
        booking_id: i64,
        reference: &str,
    ) -> Result<CreateOrderResponse, ClientError> {
        ApiClient::create_payment_order(self, booking_id, reference).await
    }

    async fn verify_payment(
        &self,
        request: &VerifyPaymentRequest,
    ) -> Result<Booking, ClientError> {
        ApiClient::verify_payment(self, request).await
    }
}

/// What the gateway's checkout widget reports back.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetOutcome {
    Paid {
        order_id: String,
        payment_id: String,
        signature: String,
    },
    Dismissed,
    Failed(String),
}

#[async_trait]
pub trait CheckoutWidget: Sync {
    async fn open(&self, key: &str, order: &CreateOrderResponse, booking: &Booking)
        -> WidgetOutcome;
}

#[derive(Debug, Clone)]
pub enum CheckoutOutcome {
    /// Payment verified, booking confirmed.
    Paid(Booking),
    /// No gateway key; the booking waits for offline payment.
    AwaitingPayment(Booking),
    /// Customer closed the widget.
    Dismissed(Booking),
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("could not create booking: {0}")]
    Booking(#[source] ClientError),

    #[error("booking {booking_id} created but payment could not start: {source}")]
    Payment {
        booking_id: i64,
        #[source]
        source: ClientError,
    },

    #[error("payment for booking {booking_id} failed: {reason}")]
    Widget { booking_id: i64, reason: String },

    #[error("{}", VERIFICATION_FAILED)]
    Verification {
        booking_id: i64,
        #[source]
        source: ClientError,
    },
}

pub async fn run_checkout<A, W>(
    api: &A,
    widget: &W,
    request: &CreateBooking,
) -> Result<CheckoutOutcome, CheckoutError>
where
    A: StorefrontApi + ?Sized,
    W: CheckoutWidget + ?Sized,
{
    let booking = api
        .create_booking(request)
        .await
        .map_err(CheckoutError::Booking)?;
    let booking_id = booking.id;

    let payment_error = |source: ClientError| CheckoutError::Payment { booking_id, source };

    let Some(key) = api.payment_key().await.map_err(payment_error)? else {
        log::warn!("Gateway unconfigured, booking {booking_id} left pending");
        return Ok(CheckoutOutcome::AwaitingPayment(booking));
    };

    let order = api
        .create_payment_order(booking_id, &booking.reference)
        .await
        .map_err(payment_error)?;

    match widget.open(&key, &order, &booking).await {
        WidgetOutcome::Paid {
            order_id,
            payment_id,
            signature,
        } => {
            let verified = api
                .verify_payment(&VerifyPaymentRequest {
                    booking_id,
                    razorpay_order_id: order_id,
                    razorpay_payment_id: payment_id,
                    razorpay_signature: signature,
                })
                .await
                .map_err(|source| CheckoutError::Verification { booking_id, source })?;

            log::info!("Booking {booking_id} paid and confirmed");
            Ok(CheckoutOutcome::Paid(verified))
        }
        WidgetOutcome::Dismissed => Ok(CheckoutOutcome::Dismissed(booking)),
        WidgetOutcome::Failed(reason) => Err(CheckoutError::Widget { booking_id, reason }),
    }
}
