//! Shared harness for API integration tests.
//!
//! Each test gets its own in-memory SQLite database with migrations applied
//! and an in-process payment gateway standing in for Razorpay.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use travel_booking_api::auth;
use travel_booking_api::config::AuthConfig;
use travel_booking_api::db;
use travel_booking_api::error::AppError;
use travel_booking_api::payments::{GatewayOrder, PaymentGateway, Payments};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const GATEWAY_KEY: &str = "rzp_test_key";
pub const GATEWAY_SECRET: &str = "rzp_test_secret";

pub struct FakeGateway;

#[async_trait]
impl PaymentGateway for FakeGateway {
    fn key_id(&self) -> &str {
        GATEWAY_KEY
    }

    fn key_secret(&self) -> &str {
        GATEWAY_SECRET
    }

    async fn create_order(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayOrder, AppError> {
        Ok(GatewayOrder {
            id: format!("order_{receipt}"),
            amount: amount_minor,
            currency: currency.to_string(),
            receipt: Some(receipt.to_string()),
        })
    }
}

pub struct TestState {
    pub pool: web::Data<SqlitePool>,
    pub auth: web::Data<AuthConfig>,
    pub payments: web::Data<Payments>,
}

impl TestState {
    pub async fn new() -> Self {
        Self::build(Some(Arc::new(FakeGateway))).await
    }

    pub async fn without_gateway() -> Self {
        Self::build(None).await
    }

    async fn build(gateway: Option<Arc<dyn PaymentGateway>>) -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory database");
        db::run_migrations(&pool).await.expect("migrations");

        Self {
            pool: web::Data::new(pool),
            auth: web::Data::new(auth_config()),
            payments: web::Data::new(Payments::new(gateway, "INR")),
        }
    }

    pub fn admin_token(&self) -> String {
        auth::issue_token(&self.auth, ADMIN_EMAIL).expect("token")
    }

    pub fn bearer(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.admin_token()))
    }
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        admin_email: ADMIN_EMAIL.to_string(),
        admin_password: ADMIN_PASSWORD.to_string(),
        jwt_secret: "integration-secret".to_string(),
        token_ttl: Duration::from_secs(3600),
    }
}

/// Builds the full application around a [`TestState`].
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.pool.clone())
                .app_data($state.auth.clone())
                .app_data($state.payments.clone())
                .configure(travel_booking_api::configure),
        )
        .await
    };
}

pub fn package_body() -> Value {
    json!({
        "name": "Himalayan Trek",
        "destination": "Manali",
        "tier": "Standard",
        "price": 1000.0,
        "original_price": 1250.0,
        "duration": "5 Days / 4 Nights",
        "group_size": "2-15",
        "description": "Snow and pine forests",
        "itinerary": [
            { "day": 2, "title": "Solang Valley", "activities": ["Paragliding"] },
            { "day": 1, "title": "Arrival", "activities": ["Check-in", "Mall Road"] }
        ],
        "images": [
            { "url": "/img/manali-main.jpg", "role": "main" },
            { "url": "/img/manali-hero.jpg", "role": "hero" }
        ]
    })
}

pub fn future_date(days: i64) -> String {
    (chrono::Utc::now().date_naive() + chrono::Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

pub fn booking_body(package_id: i64, travelers: u32) -> Value {
    json!({
        "package_id": package_id,
        "customer_name": "Asha Rao",
        "email": "asha@example.com",
        "phone": "9876543210",
        "trip_date": future_date(30),
        "travelers": travelers,
        "special_requests": "Window seats"
    })
}
