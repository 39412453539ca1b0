//! Typed client for the storefront and admin front ends.
//!
//! Every call unwraps the `{success, data|error}` envelope into a `Result`.
//! The admin token lives in an explicit [`Session`] owned by the caller.

pub mod checkout;
pub mod faqs;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::handlers::payments::{CreateOrderRequest, CreateOrderResponse, VerifyPaymentRequest};
use crate::models::booking::{Booking, CancellationRequest, CreateBooking};
use crate::models::faq::{Faq, ReorderFaqs};
use crate::models::inquiry::{CreateInquiry, Inquiry};
use crate::models::package::Package;
use crate::pricing::PriceQuote;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response ({status}): {message}")]
    Decode { status: u16, message: String },

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("not logged in")]
    NoSession,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
    admin: LoginAdmin,
}

#[derive(Debug, Deserialize)]
struct LoginAdmin {
    email: String,
}

#[derive(Debug, Deserialize)]
struct KeyData {
    key: Option<String>,
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: None,
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn logout(&mut self) {
        self.session = None;
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.session {
            Some(session) => builder.bearer_auth(&session.token),
            None => builder,
        }
    }

    fn admin_request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        if self.session.is_none() {
            return Err(ClientError::NoSession);
        }
        Ok(self.request(method, path))
    }

    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| ClientError::Decode {
                status,
                message: e.to_string(),
            })?;

        unwrap_envelope(status, envelope)
    }

    /// Logs in and keeps the session on this client.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session, ClientError> {
        let data: LoginData = Self::send(
            self.request(Method::POST, "/api/admin/login")
                .json(&serde_json::json!({ "email": email, "password": password })),
        )
        .await?;

        let session = Session {
            token: data.token,
            email: data.admin.email,
        };
        self.session = Some(session.clone());
        Ok(session)
    }

    pub async fn list_packages(&self) -> Result<Vec<Package>, ClientError> {
        Self::send(self.request(Method::GET, "/api/packages")).await
    }

    pub async fn get_package(&self, id: i64) -> Result<Package, ClientError> {
        Self::send(self.request(Method::GET, &format!("/api/packages/{id}"))).await
    }

    pub async fn quote(&self, package_id: i64, travelers: u32) -> Result<PriceQuote, ClientError> {
        Self::send(self.request(
            Method::GET,
            &format!("/api/packages/{package_id}/quote?travelers={travelers}"),
        ))
        .await
    }

    pub async fn create_booking(&self, request: &CreateBooking) -> Result<Booking, ClientError> {
        Self::send(self.request(Method::POST, "/api/bookings").json(request)).await
    }

    /// Looks a booking up with the reference handed out when it was created.
    pub async fn get_booking(&self, id: i64, reference: &str) -> Result<Booking, ClientError> {
        Self::send(
            self.request(Method::GET, &format!("/api/bookings/{id}"))
                .query(&[("reference", reference)]),
        )
        .await
    }

    pub async fn request_cancellation(
        &self,
        id: i64,
        reference: &str,
    ) -> Result<Booking, ClientError> {
        Self::send(
            self.request(Method::POST, &format!("/api/bookings/{id}/cancel-request"))
                .json(&CancellationRequest {
                    reference: reference.to_string(),
                }),
        )
        .await
    }

    pub async fn payment_key(&self) -> Result<Option<String>, ClientError> {
        let data: KeyData = Self::send(self.request(Method::GET, "/api/payments/key")).await?;
        Ok(data.key.filter(|k| !k.is_empty()))
    }

    pub async fn create_payment_order(
        &self,
        booking_id: i64,
        reference: &str,
    ) -> Result<CreateOrderResponse, ClientError> {
        Self::send(
            self.request(Method::POST, "/api/payments/create-order")
                .json(&CreateOrderRequest {
                    booking_id,
                    reference: reference.to_string(),
                }),
        )
        .await
    }

    pub async fn verify_payment(
        &self,
        request: &VerifyPaymentRequest,
    ) -> Result<Booking, ClientError> {
        Self::send(self.request(Method::POST, "/api/payments/verify").json(request)).await
    }

    pub async fn submit_inquiry(&self, request: &CreateInquiry) -> Result<Inquiry, ClientError> {
        Self::send(self.request(Method::POST, "/api/contact").json(request)).await
    }

    pub async fn list_admin_faqs(&self) -> Result<Vec<Faq>, ClientError> {
        Self::send(self.admin_request(Method::GET, "/api/faqs/admin/all")?).await
    }

    pub async fn reorder_faqs(&self, ids: Vec<i64>) -> Result<Vec<Faq>, ClientError> {
        Self::send(
            self.admin_request(Method::PUT, "/api/faqs/reorder")?
                .json(&ReorderFaqs { ids }),
        )
        .await
    }
}

fn unwrap_envelope<T>(status: u16, envelope: Envelope<T>) -> Result<T, ClientError> {
    if !envelope.success {
        return Err(ClientError::Api {
            status,
            message: envelope
                .error
                .unwrap_or_else(|| "Request failed".to_string()),
        });
    }

    envelope.data.ok_or_else(|| ClientError::Decode {
        status,
        message: "envelope has no data".to_string(),
    })
}
