mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use backend::auth::role::Role;
use backend::repos::users;
use backend::services::reminders::REMINDER_SUBJECT;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_email;
use common::{bearer_for, document_payload, test_app, test_state};

#[actix_web::test]
async fn test_reminder_check_sends_one_digest() {
    let (state, notifier) = test_state().await;
    let db = state.db.clone().unwrap();

    let worker_email = unique_email("worker");
    users::insert(&db, "boss", &unique_email("boss"), Role::Admin)
        .await
        .unwrap();
    users::insert(&db, "owner", &unique_email("owner"), Role::Owner)
        .await
        .unwrap();
    users::insert(&db, "worker", &worker_email, Role::User)
        .await
        .unwrap();

    let auth = bearer_for("boss", Role::Admin, &state);
    let app = test_app(state).await;

    let mut payload = document_payload("REM-1");
    payload["expiry_date"] = serde_json::json!(common::date_in(10));
    payload["action_due_date"] = serde_json::json!(common::date_in(5));
    let req = test::TestRequest::post()
        .uri("/documents")
        .insert_header(auth.clone())
        .set_json(payload)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::OK
    );

    let req = test::TestRequest::post()
        .uri("/reminder/check")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "completed");
    assert_eq!(body["expiring_documents"], 1);
    assert_eq!(body["recipients"], 2);
    assert_eq!(body["email_sent"], true);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, REMINDER_SUBJECT);
    assert!(sent[0].html_body.contains("REM-1"));
    // Regular users never receive the digest
    assert_eq!(sent[0].recipients.len(), 2);
    assert!(sent[0].recipients.iter().all(|r| r != &worker_email));
}

#[actix_web::test]
async fn test_reminder_check_skips_send_when_nothing_expires() {
    let (state, notifier) = test_state().await;
    let db = state.db.clone().unwrap();

    users::insert(&db, "boss", "boss@example.com", Role::Admin)
        .await
        .unwrap();

    let auth = bearer_for("boss", Role::Admin, &state);
    let app = test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/reminder/check")
        .insert_header(auth)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "completed");
    assert_eq!(body["expiring_documents"], 0);
    assert_eq!(body["email_sent"], false);
    assert_eq!(notifier.sent_count(), 0);
}

#[actix_web::test]
async fn test_reminder_check_forbidden_for_regular_users() {
    let (state, notifier) = test_state().await;
    let auth = bearer_for("worker", Role::User, &state);
    let app = test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/reminder/check")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details_from_service_response(
        resp,
        "FORBIDDEN",
        StatusCode::FORBIDDEN,
        None,
    )
    .await;
    assert_eq!(notifier.sent_count(), 0);
}

#[actix_web::test]
async fn test_reminder_check_reports_already_running() {
    let (state, _) = test_state().await;
    let auth = bearer_for("boss", Role::Owner, &state);

    // Hold the single-flight lock to simulate a run in progress
    let lock = state.reminder_lock.clone();
    let guard = lock.lock().await;

    let app = test_app(state).await;
    let req = test::TestRequest::post()
        .uri("/reminder/check")
        .insert_header(auth)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "already_running");
    drop(guard);
}

#[actix_web::test]
async fn test_failed_send_is_reported_not_fatal() {
    let (mut state, _) = test_state().await;
    state.notifier = Some(std::sync::Arc::new(
        backend::notify::RecordingNotifier::failing(),
    ));
    let db = state.db.clone().unwrap();

    users::insert(&db, "boss", "boss@example.com", Role::Admin)
        .await
        .unwrap();

    let auth = bearer_for("boss", Role::Admin, &state);
    let app = test_app(state).await;

    let mut payload = document_payload("FAIL-1");
    payload["expiry_date"] = serde_json::json!(common::date_in(10));
    payload["action_due_date"] = serde_json::json!(common::date_in(5));
    let req = test::TestRequest::post()
        .uri("/documents")
        .insert_header(auth.clone())
        .set_json(payload)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::OK
    );

    let req = test::TestRequest::post()
        .uri("/reminder/check")
        .insert_header(auth)
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "completed");
    assert_eq!(body["expiring_documents"], 1);
    assert_eq!(body["recipients"], 1);
    assert_eq!(body["email_sent"], false);
}
