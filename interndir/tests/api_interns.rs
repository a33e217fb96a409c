// This file is part of the product NoPressure.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::{http::StatusCode, test};
use interndir::store::InternStore;
use serde_json::{json, Value};

#[actix_web::test]
async fn list_seeds_an_empty_directory() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::get().uri("/interns").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.get("ok").and_then(Value::as_bool), Some(true));

    let interns = body
        .get("interns")
        .and_then(Value::as_array)
        .expect("interns array");
    assert!(!interns.is_empty());
    assert_eq!(
        body.get("total").and_then(Value::as_u64),
        Some(interns.len() as u64)
    );
    assert_eq!(body.get("currentPage").and_then(Value::as_u64), Some(1));
    // Records come back in camelCase wire format.
    assert!(interns[0].get("startDate").is_some());
    assert!(interns[0].get("imageUrl").is_some());
}

#[actix_web::test]
async fn list_pages_and_clamps_out_of_range_pages() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;
    harness.store.seed_if_empty().expect("seed");
    let total = harness.store.count().expect("count");

    let req = test::TestRequest::get()
        .uri("/interns?page=2&limit=3")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.get("currentPage").and_then(Value::as_u64), Some(2));
    assert_eq!(body.get("total").and_then(Value::as_u64), Some(total));
    assert_eq!(
        body.get("totalPages").and_then(Value::as_u64),
        Some(total.div_ceil(3))
    );
    assert_eq!(
        body.get("interns")
            .and_then(Value::as_array)
            .map(|interns| interns.len()),
        Some(3)
    );

    // Past the end clamps to the last page instead of returning nothing.
    let req = test::TestRequest::get()
        .uri("/interns?page=99&limit=3")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body.get("currentPage").and_then(Value::as_u64),
        body.get("totalPages").and_then(Value::as_u64)
    );
    assert!(
        !body
            .get("interns")
            .and_then(Value::as_array)
            .expect("interns array")
            .is_empty()
    );
}

#[actix_web::test]
async fn mutations_require_a_session() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let attempts = [
        test::TestRequest::post()
            .uri("/interns")
            .set_json(common::intern_json("Ana", "Engineer", "ana@example.com")),
        test::TestRequest::put()
            .uri("/interns/ID01")
            .set_json(common::intern_json("Ana", "Engineer", "ana@example.com")),
        test::TestRequest::delete().uri("/interns/ID01"),
        test::TestRequest::post().uri("/interns/bulk")
            .set_json(json!({ "interns": [] })),
        test::TestRequest::post().uri("/seed"),
    ];
    for attempt in attempts {
        let resp = test::call_service(&app, attempt.to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body.get("error").and_then(Value::as_str),
            Some("Unauthorized")
        );
    }
    // Nothing was written.
    assert_eq!(harness.store.count().expect("count"), 0);
}

#[actix_web::test]
async fn create_returns_the_record_with_an_assigned_id() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/interns")
        .cookie(harness.admin_cookie())
        .set_json(json!({
            "name": "Ana Martinez",
            "role": "Engineer",
            "email": "ana@example.com",
            "projects": ["Gateway"],
            "startDate": "2026-06-01",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let intern = body.get("intern").expect("intern");
    assert_eq!(intern.get("id").and_then(Value::as_str), Some("ID01"));
    assert_eq!(
        intern.get("projects").and_then(Value::as_array).map(Vec::len),
        Some(1)
    );
    // Omitted optional fields come back as empty strings.
    assert_eq!(intern.get("phone").and_then(Value::as_str), Some(""));
}

#[actix_web::test]
async fn create_rejects_invalid_drafts() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let cases = [
        json!({ "name": "Ana", "role": "", "email": "ana@example.com" }),
        json!({ "name": "Ana", "role": "Engineer", "email": "not-an-email" }),
        json!({
            "name": "Ana", "role": "Engineer", "email": "ana@example.com",
            "startDate": "June 1st",
        }),
    ];
    for case in cases {
        let req = test::TestRequest::post()
            .uri("/interns")
            .cookie(harness.admin_cookie())
            .set_json(case)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body.get("ok").and_then(Value::as_bool), Some(false));
    }
    assert_eq!(harness.store.count().expect("count"), 0);
}

#[actix_web::test]
async fn update_replaces_the_whole_record() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/interns")
        .cookie(harness.admin_cookie())
        .set_json(json!({
            "name": "Ana", "role": "Engineer", "email": "ana@example.com",
            "phone": "555-0100",
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body
        .get("intern")
        .and_then(|intern| intern.get("id"))
        .and_then(Value::as_str)
        .expect("id")
        .to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/interns/{}", id))
        .cookie(harness.admin_cookie())
        .set_json(common::intern_json("Ana", "Senior Engineer", "ana@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let intern = body.get("intern").expect("intern");
    assert_eq!(
        intern.get("role").and_then(Value::as_str),
        Some("Senior Engineer")
    );
    // Full replace: the phone submitted at create time is gone.
    assert_eq!(intern.get("phone").and_then(Value::as_str), Some(""));
}

#[actix_web::test]
async fn update_and_delete_unknown_ids_are_404() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::put()
        .uri("/interns/ID99")
        .cookie(harness.admin_cookie())
        .set_json(common::intern_json("Ana", "Engineer", "ana@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri("/interns/ID99")
        .cookie(harness.admin_cookie())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn delete_removes_the_record() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/interns")
        .cookie(harness.admin_cookie())
        .set_json(common::intern_json("Ana", "Engineer", "ana@example.com"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body
        .get("intern")
        .and_then(|intern| intern.get("id"))
        .and_then(Value::as_str)
        .expect("id")
        .to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/interns/{}", id))
        .cookie(harness.admin_cookie())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(harness.store.count().expect("count"), 0);
}

#[actix_web::test]
async fn reseed_restores_the_sample_roster() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/interns")
        .cookie(harness.admin_cookie())
        .set_json(common::intern_json("Ana", "Engineer", "ana@example.com"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/seed")
        .cookie(harness.admin_cookie())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/interns").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = body
        .get("interns")
        .and_then(Value::as_array)
        .expect("interns array")
        .iter()
        .filter_map(|intern| intern.get("name").and_then(Value::as_str))
        .collect();
    assert!(!names.contains(&"Ana"));
}

#[actix_web::test]
async fn wrong_method_on_intern_paths_is_405() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_state.clone())).await;

    let req = test::TestRequest::get().uri("/interns/ID01").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    let req = test::TestRequest::delete().uri("/interns").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
