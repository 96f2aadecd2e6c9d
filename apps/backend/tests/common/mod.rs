#![allow(dead_code)]

//! Shared setup for integration tests: in-memory database state, the
//! production route table, and token helpers.

use std::sync::Arc;
use std::time::SystemTime;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::auth::role::Role;
use backend::infra::state::build_state;
use backend::notify::RecordingNotifier;
use backend::routes;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use time::{Duration, OffsetDateTime};

pub const TEST_JWT_SECRET: &[u8] = b"integration_test_secret_do_not_reuse";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_JWT_SECRET)
}

/// Fresh in-memory database with migrations applied, plus a recording
/// notifier so tests can assert on outbound mail.
pub async fn test_state() -> (AppState, Arc<RecordingNotifier>) {
    backend_test_support::test_logging::init();

    let notifier = Arc::new(RecordingNotifier::new());
    let state = build_state()
        .with_db_url("sqlite::memory:")
        .with_security(test_security())
        .with_notifier(notifier.clone())
        .build()
        .await
        .expect("failed to build test state");

    (state, notifier)
}

/// Test service wired with the production route table.
///
/// Service-level errors (e.g. middleware rejections) are converted into
/// their HTTP responses here, mirroring what actix-http does on a real
/// server, so tests can assert on status codes and bodies.
pub async fn test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure)
            .wrap_fn(|req, srv| {
                let fut = srv.call(req);
                async move {
                    match fut.await {
                        Ok(res) => Ok(res.map_into_boxed_body()),
                        Err(err) => Ok(ServiceResponse::new(
                            test::TestRequest::default().to_http_request(),
                            err.error_response(),
                        )),
                    }
                }
            }),
    )
    .await
}

/// Authorization header value for a freshly minted token.
pub fn bearer_for(username: &str, role: Role, state: &AppState) -> (&'static str, String) {
    let token =
        backend::mint_access_token(username, role, SystemTime::now(), &state.security)
            .expect("failed to mint test token");
    ("Authorization", format!("Bearer {token}"))
}

/// Formatted date `days` from today (UTC). Negative offsets give past dates.
pub fn date_in(days: i64) -> String {
    backend::http::dates::format_date(OffsetDateTime::now_utc().date() + Duration::days(days))
}

/// A valid document payload expiring well in the future.
pub fn document_payload(number: &str) -> serde_json::Value {
    serde_json::json!({
        "document_type": "License",
        "document_owner": "Operations",
        "document_number": number,
        "expiry_date": date_in(300),
        "action_due_date": date_in(270),
    })
}
