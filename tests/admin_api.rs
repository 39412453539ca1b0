#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::{TestState, ADMIN_EMAIL, ADMIN_PASSWORD};

#[actix_web::test]
async fn test_login_issues_token_for_matching_credentials() {
    let state = TestState::new().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["admin"]["email"], ADMIN_EMAIL);
    assert_eq!(body["data"]["expires_in"], 3600);

    let token = body["data"]["token"].as_str().unwrap().to_string();
    let req = test::TestRequest::get()
        .uri("/api/admin/verify")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], ADMIN_EMAIL);
}

#[actix_web::test]
async fn test_login_rejects_any_mismatch() {
    let state = TestState::new().await;
    let app = test_app!(state);

    let attempts = [
        json!({ "email": ADMIN_EMAIL, "password": "wrong" }),
        json!({ "email": "someone@example.com", "password": ADMIN_PASSWORD }),
        json!({ "email": ADMIN_EMAIL.to_uppercase(), "password": ADMIN_PASSWORD }),
        json!({ "email": "", "password": "" }),
    ];

    for attempt in attempts {
        let req = test::TestRequest::post()
            .uri("/api/admin/login")
            .set_json(attempt)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid credentials");
        assert!(body.get("data").is_none());
    }
}

#[actix_web::test]
async fn test_admin_routes_require_bearer_token() {
    let state = TestState::new().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/api/bookings").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/bookings")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid or expired token");

    let req = test::TestRequest::get()
        .uri("/api/bookings")
        .insert_header(state.bearer())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_malformed_json_uses_error_envelope() {
    let state = TestState::new().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/admin/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_health() {
    let state = TestState::new().await;
    let app = test_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "ok");
}
