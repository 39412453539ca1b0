#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::TestState;

#[actix_web::test]
async fn test_inquiry_flow() {
    let state = TestState::new().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Ravi",
            "email": "ravi@example.com",
            "subject": "Group discount",
            "message": "Do you offer discounts for 20 people?"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "New");
    let id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/contact/admin/inquiries")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::put()
        .uri(&format!("/api/contact/admin/inquiries/{id}/status"))
        .insert_header(state.bearer())
        .set_json(json!({ "status": "Contacted" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["status"], "Contacted");

    let req = test::TestRequest::get()
        .uri("/api/contact/admin/inquiries?status=New")
        .insert_header(state.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri("/api/contact/admin/inquiries?status=Contacted")
        .insert_header(state.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["id"], id);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/contact/admin/inquiries/{id}"))
        .insert_header(state.bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/contact/admin/inquiries/{id}"))
        .insert_header(state.bearer())
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_inquiry_validation() {
    let state = TestState::new().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({ "name": "", "email": "nope", "message": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}
