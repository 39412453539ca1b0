#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::TestState;

fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_i64().unwrap())
        .collect()
}

#[actix_web::test]
async fn test_faq_ordering_and_reorder() {
    let state = TestState::new().await;
    let app = test_app!(state);

    let mut created = Vec::new();
    for (question, active) in [("How do I pay?", true), ("Can I cancel?", true), ("Draft", false)] {
        let req = test::TestRequest::post()
            .uri("/api/faqs")
            .insert_header(state.bearer())
            .set_json(json!({ "question": question, "answer": "Yes.", "is_active": active }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["sort_order"], created.len() as i64);
        created.push(body["data"]["id"].as_i64().unwrap());
    }
    let (a, b, c) = (created[0], created[1], created[2]);

    let req = test::TestRequest::get().uri("/api/faqs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![a, b]);

    let req = test::TestRequest::put()
        .uri("/api/faqs/reorder")
        .insert_header(state.bearer())
        .set_json(json!({ "ids": [c, a, b] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![c, a, b]);

    // a partial id list is refused and nothing moves
    let req = test::TestRequest::put()
        .uri("/api/faqs/reorder")
        .insert_header(state.bearer())
        .set_json(json!({ "ids": [b, a] }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri("/api/faqs/admin/all")
        .insert_header(state.bearer())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![c, a, b]);
}

#[actix_web::test]
async fn test_move_swaps_neighbours() {
    let state = TestState::new().await;
    let app = test_app!(state);

    let mut created = Vec::new();
    for question in ["One", "Two", "Three"] {
        let req = test::TestRequest::post()
            .uri("/api/faqs")
            .insert_header(state.bearer())
            .set_json(json!({ "question": question, "answer": "..." }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        created.push(body["data"]["id"].as_i64().unwrap());
    }
    let (one, two, three) = (created[0], created[1], created[2]);

    let req = test::TestRequest::put()
        .uri(&format!("/api/faqs/{three}/move"))
        .insert_header(state.bearer())
        .set_json(json!({ "direction": "up" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(ids(&body), vec![one, three, two]);

    let req = test::TestRequest::put()
        .uri(&format!("/api/faqs/{one}/move"))
        .insert_header(state.bearer())
        .set_json(json!({ "direction": "up" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn test_faq_update_and_delete() {
    let state = TestState::new().await;
    let app = test_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/faqs")
        .insert_header(state.bearer())
        .set_json(json!({ "question": "Visa?", "answer": "Not needed." }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/faqs/{id}"))
        .insert_header(state.bearer())
        .set_json(json!({ "answer": "Only for foreign nationals." }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["question"], "Visa?");
    assert_eq!(body["data"]["answer"], "Only for foreign nationals.");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/faqs/{id}"))
        .insert_header(state.bearer())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&format!("/api/faqs/{id}"))
        .insert_header(state.bearer())
        .set_json(json!({ "answer": "gone" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
