mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use backend::auth::role::Role;
use common::{bearer_for, date_in, test_app, test_state};

fn payload(number: &str, doc_type: &str, owner: &str, expiry_days: i64) -> serde_json::Value {
    serde_json::json!({
        "document_type": doc_type,
        "document_owner": owner,
        "document_number": number,
        "expiry_date": date_in(expiry_days),
        "action_due_date": date_in(expiry_days - 5),
    })
}

async fn seed<S>(app: &S, auth: &(&'static str, String), docs: &[serde_json::Value])
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<actix_web::body::BoxBody>,
        Error = actix_web::Error,
    >,
{
    for doc in docs {
        let req = test::TestRequest::post()
            .uri("/documents")
            .insert_header(auth.clone())
            .set_json(doc)
            .to_request();
        let resp = test::call_service(app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

fn numbers(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|d| d["document_number"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn test_list_ordered_by_expiry_ascending() {
    let (state, _) = test_state().await;
    let auth = bearer_for("alice", Role::User, &state);
    let app = test_app(state).await;

    seed(
        &app,
        &auth,
        &[
            payload("ORD-LATE", "License", "Ops", 120),
            payload("ORD-SOON", "License", "Ops", 10),
            payload("ORD-MID", "License", "Ops", 60),
        ],
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/documents")
        .insert_header(auth)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(numbers(&body), vec!["ORD-SOON", "ORD-MID", "ORD-LATE"]);
}

#[actix_web::test]
async fn test_filters_are_case_insensitive_substrings() {
    let (state, _) = test_state().await;
    let auth = bearer_for("alice", Role::User, &state);
    let app = test_app(state).await;

    seed(
        &app,
        &auth,
        &[
            payload("FIL-1", "Trade License", "Acme Corp", 30),
            payload("FIL-2", "Insurance", "Acme Corp", 40),
            payload("FIL-3", "Trade License", "Beta LLC", 50),
        ],
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/documents?document_type=license")
        .insert_header(auth.clone())
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(numbers(&body), vec!["FIL-1", "FIL-3"]);

    let req = test::TestRequest::get()
        .uri("/documents?document_owner=ACME")
        .insert_header(auth.clone())
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(numbers(&body), vec!["FIL-1", "FIL-2"]);

    let req = test::TestRequest::get()
        .uri("/documents?document_type=license&document_owner=beta")
        .insert_header(auth)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(numbers(&body), vec!["FIL-3"]);
}

#[actix_web::test]
async fn test_skip_and_limit_paginate() {
    let (state, _) = test_state().await;
    let auth = bearer_for("alice", Role::User, &state);
    let app = test_app(state).await;

    seed(
        &app,
        &auth,
        &[
            payload("PAGE-1", "License", "Ops", 10),
            payload("PAGE-2", "License", "Ops", 20),
            payload("PAGE-3", "License", "Ops", 30),
            payload("PAGE-4", "License", "Ops", 40),
        ],
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/documents?skip=1&limit=2")
        .insert_header(auth)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(numbers(&body), vec!["PAGE-2", "PAGE-3"]);
}

#[actix_web::test]
async fn test_expiring_soon_window_is_inclusive() {
    let (state, _) = test_state().await;
    let auth = bearer_for("alice", Role::User, &state);
    let app = test_app(state).await;

    seed(
        &app,
        &auth,
        &[
            payload("EXP-TODAY", "License", "Ops", 0),
            payload("EXP-EDGE", "License", "Ops", 30),
            payload("EXP-OUT", "License", "Ops", 31),
        ],
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/documents/expiring/soon")
        .insert_header(auth)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["days_ahead"], 30);
    assert_eq!(body["count"], 2);
    let found: Vec<&str> = body["expiring_documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["document_number"].as_str().unwrap())
        .collect();
    assert_eq!(found, vec!["EXP-TODAY", "EXP-EDGE"]);
}

#[actix_web::test]
async fn test_expiring_soon_honors_days_param() {
    let (state, _) = test_state().await;
    let auth = bearer_for("alice", Role::User, &state);
    let app = test_app(state).await;

    seed(
        &app,
        &auth,
        &[
            payload("WIN-NEAR", "License", "Ops", 5),
            payload("WIN-FAR", "License", "Ops", 25),
        ],
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/documents/expiring/soon?days=7")
        .insert_header(auth)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["days_ahead"], 7);
    assert_eq!(body["count"], 1);
    assert_eq!(
        body["expiring_documents"][0]["document_number"],
        "WIN-NEAR"
    );
}

#[actix_web::test]
async fn test_empty_list_and_empty_window() {
    let (state, _) = test_state().await;
    let auth = bearer_for("alice", Role::User, &state);
    let app = test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/documents")
        .insert_header(auth.clone())
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri("/documents/expiring/soon")
        .insert_header(auth)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 0);
    assert!(body["expiring_documents"].as_array().unwrap().is_empty());
}
