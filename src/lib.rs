//! Back end for a travel-package storefront and its admin back office.
//!
//! The HTTP API lives in [`handlers`] and is mounted by [`configure`]. Every
//! response is wrapped in the `{success, data|error}` envelope from
//! [`response`]. [`pricing`] holds the booking price rule shared by the API
//! and the storefront client in [`client`].

pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod payments;
pub mod pricing;
pub mod response;

use actix_web::{web, HttpResponse};

/// Registers every `/api` route plus `/health`.
///
/// Shared state (`SqlitePool`, `AuthConfig`, `Payments`) must already be
/// registered as `app_data` by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        error::AppError::BadRequest(format!("Malformed payload: {err}")).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _| {
        error::AppError::BadRequest(format!("Invalid query: {err}")).into()
    }))
    .route("/health", web::get().to(health))
    .service(
        web::scope("/api")
            .service(
                web::scope("/admin")
                    .route("/login", web::post().to(handlers::admin::login))
                    .route("/verify", web::get().to(handlers::admin::verify)),
            )
            .service(
                web::scope("/packages")
                    .route("", web::get().to(handlers::packages::get_packages))
                    .route("", web::post().to(handlers::packages::create_package))
                    .route(
                        "/admin/all",
                        web::get().to(handlers::packages::get_all_packages),
                    )
                    .route("/{id}", web::get().to(handlers::packages::get_package_by_id))
                    .route("/{id}", web::put().to(handlers::packages::update_package))
                    .route("/{id}", web::delete().to(handlers::packages::delete_package))
                    .route("/{id}/quote", web::get().to(handlers::packages::get_quote)),
            )
            .service(
                web::scope("/destinations")
                    .route("", web::get().to(handlers::destinations::get_destinations))
                    .route("", web::post().to(handlers::destinations::create_destination))
                    .route(
                        "/admin/all",
                        web::get().to(handlers::destinations::get_all_destinations),
                    )
                    .route(
                        "/{id}",
                        web::get().to(handlers::destinations::get_destination_by_id),
                    )
                    .route(
                        "/{id}",
                        web::put().to(handlers::destinations::update_destination),
                    )
                    .route(
                        "/{id}",
                        web::delete().to(handlers::destinations::delete_destination),
                    ),
            )
            .service(
                web::scope("/hotels")
                    .route("", web::get().to(handlers::hotels::get_hotels))
                    .route("", web::post().to(handlers::hotels::create_hotel))
                    .route("/admin/all", web::get().to(handlers::hotels::get_all_hotels))
                    .route("/{id}", web::get().to(handlers::hotels::get_hotel_by_id))
                    .route("/{id}", web::put().to(handlers::hotels::update_hotel))
                    .route("/{id}", web::delete().to(handlers::hotels::delete_hotel)),
            )
            .service(
                web::scope("/bookings")
                    .route("", web::post().to(handlers::bookings::create_booking))
                    .route("", web::get().to(handlers::bookings::get_bookings))
                    .route("/{id}", web::get().to(handlers::bookings::get_booking))
                    .route(
                        "/{id}/status",
                        web::put().to(handlers::bookings::update_booking_status),
                    )
                    .route(
                        "/{id}/cancel-request",
                        web::post().to(handlers::bookings::request_cancellation),
                    )
                    .route(
                        "/{id}/refund",
                        web::put().to(handlers::bookings::refund_booking),
                    ),
            )
            .service(
                web::scope("/faqs")
                    .route("", web::get().to(handlers::faqs::get_faqs))
                    .route("", web::post().to(handlers::faqs::create_faq))
                    .route("/admin/all", web::get().to(handlers::faqs::get_all_faqs))
                    .route("/reorder", web::put().to(handlers::faqs::reorder_faqs))
                    .route("/{id}", web::put().to(handlers::faqs::update_faq))
                    .route("/{id}", web::delete().to(handlers::faqs::delete_faq))
                    .route("/{id}/move", web::put().to(handlers::faqs::move_faq)),
            )
            .service(
                web::scope("/contact")
                    .route("", web::post().to(handlers::contact::submit_inquiry))
                    .route(
                        "/admin/inquiries",
                        web::get().to(handlers::contact::get_inquiries),
                    )
                    .route(
                        "/admin/inquiries/{id}",
                        web::get().to(handlers::contact::get_inquiry),
                    )
                    .route(
                        "/admin/inquiries/{id}",
                        web::delete().to(handlers::contact::delete_inquiry),
                    )
                    .route(
                        "/admin/inquiries/{id}/status",
                        web::put().to(handlers::contact::update_inquiry_status),
                    ),
            )
            .service(
                web::scope("/payments")
                    .route("/key", web::get().to(handlers::payments::get_key))
                    .route(
                        "/create-order",
                        web::post().to(handlers::payments::create_order),
                    )
                    .route("/verify", web::post().to(handlers::payments::verify_payment)),
            ),
    );
}

async fn health() -> HttpResponse {
    response::ok(serde_json::json!({ "status": "ok" }))
}
