//! Payment gateway plumbing.
//!
//! The gateway is an opaque HTTP service. This module only knows how to ask
//! it for an order and how to check the signature its checkout widget hands
//! back to the browser.

use std::sync::Arc;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::PaymentConfig;
use crate::error::AppError;

const RAZORPAY_ORDERS_URL: &str = "https://api.razorpay.com/v1/orders";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Public key the checkout widget is opened with.
    fn key_id(&self) -> &str;

    /// Secret used to sign payment callbacks.
    fn key_secret(&self) -> &str;

    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, AppError>;
}

pub struct RazorpayGateway {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
}

impl RazorpayGateway {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }
}

#[derive(Serialize)]
struct OrderRequest<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    fn key_id(&self) -> &str {
        &self.key_id
    }

    fn key_secret(&self) -> &str {
        &self.key_secret
    }

    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, AppError> {
        let response = self
            .http
            .post(RAZORPAY_ORDERS_URL)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&OrderRequest {
                amount: amount_minor,
                currency,
                receipt,
            })
            .send()
            .await
            .map_err(|e| AppError::Gateway(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Gateway(format!("order creation returned {status}: {body}")));
        }

        response
            .json::<GatewayOrder>()
            .await
            .map_err(|e| AppError::Gateway(format!("malformed order response: {e}")))
    }
}

/// Gateway handle shared by the payment handlers; empty when unconfigured.
#[derive(Clone)]
pub struct Payments {
    gateway: Option<Arc<dyn PaymentGateway>>,
    pub currency: String,
}

impl Payments {
    pub fn new(gateway: Option<Arc<dyn PaymentGateway>>, currency: impl Into<String>) -> Self {
        Self {
            gateway,
            currency: currency.into(),
        }
    }

    pub fn from_config(config: &PaymentConfig) -> Self {
        let gateway = config.credentials().map(|(id, secret)| {
            Arc::new(RazorpayGateway::new(id, secret)) as Arc<dyn PaymentGateway>
        });
        if gateway.is_none() {
            log::warn!("Payment gateway keys not set, bookings will stay pending");
        }
        Self::new(gateway, config.currency.clone())
    }

    pub fn gateway(&self) -> Option<&dyn PaymentGateway> {
        self.gateway.as_deref()
    }
}

/// Hex HMAC-SHA256 of `"{order_id}|{payment_id}"`.
pub fn payment_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC takes any key size");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let expected = payment_signature(secret, order_id, payment_id);
    bool::from(expected.as_bytes().ct_eq(signature.trim().as_bytes()))
}

/// Converts a whole-currency amount to minor units (rupees to paise).
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
