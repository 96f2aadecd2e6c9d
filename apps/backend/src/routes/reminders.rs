//! Manual reminder trigger, restricted to admin and owner roles.

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services::reminders::{run_reminder_check, ReminderRun};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct ReminderCheckResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiring_documents: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipients: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email_sent: Option<bool>,
}

/// POST /reminder/check
async fn trigger_check(
    state: web::Data<AppState>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    user.require_reminder_access()?;

    let response = match run_reminder_check(&state).await? {
        ReminderRun::Completed(outcome) => ReminderCheckResponse {
            status: "completed",
            expiring_documents: Some(outcome.expiring),
            recipients: Some(outcome.recipients),
            email_sent: Some(outcome.sent),
        },
        ReminderRun::AlreadyRunning => ReminderCheckResponse {
            status: "already_running",
            expiring_documents: None,
            recipients: None,
            email_sent: None,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/check", web::post().to(trigger_check));
}
