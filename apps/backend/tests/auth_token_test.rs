mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use backend::auth::role::Role;
use backend::repos::users;
use backend::verify_access_token;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use common::{bearer_for, document_payload, test_app, test_state};

#[actix_web::test]
async fn test_token_issued_with_default_role() {
    let (state, _) = test_state().await;
    let security = state.security.clone();
    let app = test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_json(serde_json::json!({ "username": "alice" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "bearer");

    let claims = verify_access_token(body["access_token"].as_str().unwrap(), &security).unwrap();
    assert_eq!(claims.sub, "alice");
    assert_eq!(claims.role, Role::User);
}

#[actix_web::test]
async fn test_token_carries_requested_role() {
    let (state, _) = test_state().await;
    let security = state.security.clone();
    let app = test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_json(serde_json::json!({ "username": "boss", "role": "admin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let claims = verify_access_token(body["access_token"].as_str().unwrap(), &security).unwrap();
    assert_eq!(claims.role, Role::Admin);
}

#[actix_web::test]
async fn test_empty_username_rejected() {
    let (state, _) = test_state().await;
    let app = test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/auth/token")
        .set_json(serde_json::json!({ "username": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "USERNAME_REQUIRED",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
}

#[actix_web::test]
async fn test_issued_token_grants_document_access() {
    let (state, _) = test_state().await;
    let security = state.security.clone();
    let app = test_app(state).await;

    let token_req = test::TestRequest::post()
        .uri("/auth/token")
        .set_json(serde_json::json!({ "username": "carol" }))
        .to_request();
    let token_body: serde_json::Value =
        test::call_and_read_body_json(&app, token_req).await;
    let token = token_body["access_token"].as_str().unwrap();

    // The token from the endpoint verifies locally and opens /documents
    verify_access_token(token, &security).unwrap();
    let req = test::TestRequest::get()
        .uri("/documents")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_documents_require_bearer() {
    let (state, _) = test_state().await;
    let app = test_app(state).await;

    let req = test::TestRequest::get().uri("/documents").to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}

#[actix_web::test]
async fn test_garbage_token_rejected() {
    let (state, _) = test_state().await;
    let app = test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/documents")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .set_json(document_payload("AUTH-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "UNAUTHORIZED_INVALID_JWT",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}

#[actix_web::test]
async fn test_require_known_user_rejects_strangers() {
    let (mut state, _) = test_state().await;
    state.security.require_known_user = true;

    let db = state.db.clone().unwrap();
    users::insert(&db, "registered", "registered@example.com", Role::User)
        .await
        .unwrap();

    let app = test_app(state).await;

    let known = test::TestRequest::post()
        .uri("/auth/token")
        .set_json(serde_json::json!({ "username": "registered" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, known).await.status(),
        StatusCode::OK
    );

    let unknown = test::TestRequest::post()
        .uri("/auth/token")
        .set_json(serde_json::json!({ "username": "stranger" }))
        .to_request();
    let resp = test::call_service(&app, unknown).await;
    assert_problem_details_from_service_response(
        resp,
        "FORBIDDEN",
        StatusCode::FORBIDDEN,
        None,
    )
    .await;
}

#[actix_web::test]
async fn test_minted_helper_token_works() {
    let (state, _) = test_state().await;
    let auth = bearer_for("dave", Role::User, &state);
    let app = test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/documents")
        .insert_header(auth)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
