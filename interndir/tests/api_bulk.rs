// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use interndir::store::InternStore;
use serde_json::{json, Value};

#[actix_web::test]
async fn bulk_upsert_creates_and_overwrites_by_identity() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/interns/bulk")
        .cookie(harness.admin_cookie())
        .set_json(json!({ "interns": [
            { "id": "ID01", "name": "Ana", "role": "Engineer", "email": "ana@example.com" },
            { "name": "Ben", "role": "Designer", "email": "ben@example.com" },
        ] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let interns = body
        .get("interns")
        .and_then(Value::as_array)
        .expect("interns array");
    assert_eq!(interns.len(), 2);
    assert_eq!(interns[0].get("id").and_then(Value::as_str), Some("ID01"));
    // The row without an id got the next sequential one.
    assert_eq!(interns[1].get("id").and_then(Value::as_str), Some("ID02"));

    // Importing the same identity again replaces instead of duplicating.
    let req = test::TestRequest::post()
        .uri("/interns/bulk")
        .cookie(harness.admin_cookie())
        .set_json(json!({ "interns": [
            { "id": "ID01", "name": "Ana Maria", "role": "Engineer", "email": "ana@example.com" },
        ] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body.get("interns")
            .and_then(Value::as_array)
            .and_then(|interns| interns[0].get("name"))
            .and_then(Value::as_str),
        Some("Ana Maria")
    );
    assert_eq!(harness.store.count().expect("count"), 2);
}

#[actix_web::test]
async fn bulk_upsert_rejects_invalid_rows_with_position() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/interns/bulk")
        .cookie(harness.admin_cookie())
        .set_json(json!({ "interns": [
            { "name": "Ana", "role": "Engineer", "email": "ana@example.com" },
            { "name": "Ben", "role": "Designer", "email": "broken" },
        ] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let error = body.get("error").and_then(Value::as_str).expect("error");
    assert!(error.starts_with("Row 2:"), "unexpected error: {}", error);
    // Validation happens before any row is written.
    assert_eq!(harness.store.count().expect("count"), 0);
}

#[actix_web::test]
async fn bulk_upsert_rejects_an_empty_batch() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/interns/bulk")
        .cookie(harness.admin_cookie())
        .set_json(json!({ "interns": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn bulk_upsert_requires_the_interns_field() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/interns/bulk")
        .cookie(harness.admin_cookie())
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("No interns provided")
    );
}

#[actix_web::test]
async fn bulk_upsert_rejects_a_bare_array_body_with_json_error() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/interns/bulk")
        .cookie(harness.admin_cookie())
        .set_json(json!([
            { "name": "Ana", "role": "Engineer", "email": "ana@example.com" },
        ]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Even deserialization failures keep the JSON error shape.
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body.get("ok").and_then(Value::as_bool), Some(false));
    assert_eq!(
        body.get("error").and_then(Value::as_str),
        Some("Invalid request body")
    );
}

#[actix_web::test]
async fn bulk_upsert_honors_foreign_ids_verbatim() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/interns/bulk")
        .cookie(harness.admin_cookie())
        .set_json(json!({ "interns": [
            { "id": "EXT-900", "name": "Ana", "role": "Engineer", "email": "ana@example.com" },
        ] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body.get("interns")
            .and_then(Value::as_array)
            .and_then(|interns| interns[0].get("id"))
            .and_then(Value::as_str),
        Some("EXT-900")
    );
}
