//! The expiry-reminder job: query documents in the expiry window, render
//! one HTML digest, and send one message to all admin/owner recipients.
//!
//! The job only reads and sends, never mutates the store, so duplicate
//! runs are safe in data terms. A single-flight lock still prevents
//! overlapping scheduled and manual triggers from double-sending.

use time::{Date, Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::error::AppError;
use crate::http::dates::format_date;
use crate::infra::db::require_db;
use crate::repos::documents::{self, Document};
use crate::repos::users;
use crate::services::documents::today_utc;
use crate::state::app_state::AppState;

pub const REMINDER_SUBJECT: &str = "Document Expiry Reminder";

/// What a completed run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderOutcome {
    /// Documents found in the expiry window
    pub expiring: usize,
    /// Admin/owner recipients found
    pub recipients: usize,
    /// Whether the notification was actually dispatched
    pub sent: bool,
}

/// Result of a trigger: either the job ran, or another run held the lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderRun {
    Completed(ReminderOutcome),
    AlreadyRunning,
}

/// Run the reminder check once, skipping (not queueing) if a run is
/// already in flight. Used by both the daily timer and the manual
/// endpoint.
pub async fn run_reminder_check(state: &AppState) -> Result<ReminderRun, AppError> {
    let Ok(_guard) = state.reminder_lock.try_lock() else {
        warn!("reminder check already running, skipping");
        return Ok(ReminderRun::AlreadyRunning);
    };

    let outcome = run_locked(state).await?;
    state.scheduler_status.record_run(OffsetDateTime::now_utc());
    Ok(ReminderRun::Completed(outcome))
}

async fn run_locked(state: &AppState) -> Result<ReminderOutcome, AppError> {
    let db = require_db(state)?;
    let today = today_utc();
    let window_days = state.reminder.window_days;
    let to = today
        .checked_add(Duration::days(window_days))
        .ok_or_else(|| AppError::config(format!("reminder window out of range: {window_days}")))?;

    let docs = documents::find_expiring(db, today, to).await?;
    if docs.is_empty() {
        info!(window_days, "no documents expiring in window");
        return Ok(ReminderOutcome {
            expiring: 0,
            recipients: 0,
            sent: false,
        });
    }

    let recipients = users::reminder_recipients(db).await?;
    if recipients.is_empty() {
        info!(expiring = docs.len(), "no admin or owner users to notify");
        return Ok(ReminderOutcome {
            expiring: docs.len(),
            recipients: 0,
            sent: false,
        });
    }

    let html = render_reminder_email(&docs, today, window_days);
    let addresses: Vec<String> = recipients.iter().map(|u| u.email.clone()).collect();

    // Mail is best-effort: failures are logged, never propagated.
    let sent = match &state.notifier {
        None => {
            warn!("mail not configured, skipping reminder send");
            false
        }
        Some(notifier) => match notifier.send(REMINDER_SUBJECT, &html, &addresses).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "reminder send failed");
                false
            }
        },
    };

    info!(
        expiring = docs.len(),
        recipients = addresses.len(),
        sent,
        "reminder check completed"
    );

    Ok(ReminderOutcome {
        expiring: docs.len(),
        recipients: addresses.len(),
        sent,
    })
}

/// Row background by urgency; purely for legibility of the digest.
fn urgency_color(days_left: i64) -> &'static str {
    if days_left <= 7 {
        "#f8d7da" // red: expiring within a week
    } else if days_left <= 14 {
        "#fff3cd" // amber: within two weeks
    } else {
        "#ffffff"
    }
}

/// One HTML table, a row per expiring document.
pub fn render_reminder_email(docs: &[Document], today: Date, window_days: i64) -> String {
    let mut body = format!(
        "<html>\n<body>\n<h2>Document Expiry Reminder</h2>\n\
         <p>The following documents are expiring within {window_days} days:</p>\n\
         <table border=\"1\" style=\"border-collapse: collapse;\">\n\
         <tr><th>Document Type</th><th>Owner</th><th>Document Number</th>\
         <th>Expiry Date</th><th>Action Due Date</th></tr>\n"
    );

    for doc in docs {
        let days_left = (doc.expiry_date - today).whole_days();
        body.push_str(&format!(
            "<tr style=\"background-color: {};\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            urgency_color(days_left),
            doc.document_type,
            doc.document_owner,
            doc.document_number,
            format_date(doc.expiry_date),
            format_date(doc.action_due_date),
        ));
    }

    body.push_str(
        "</table>\n<p>Please take necessary action before the expiry dates.</p>\n</body>\n</html>\n",
    );
    body
}

#[cfg(test)]
mod tests {
    use time::macros::{date, datetime};

    use super::{render_reminder_email, urgency_color};
    use crate::repos::documents::Document;

    fn doc(number: &str, expiry: time::Date, due: time::Date) -> Document {
        Document {
            id: 1,
            document_type: "License".to_string(),
            document_owner: "Ops".to_string(),
            document_number: number.to_string(),
            expiry_date: expiry,
            action_due_date: due,
            created_at: datetime!(2026-08-01 00:00 UTC),
            updated_at: datetime!(2026-08-01 00:00 UTC),
        }
    }

    #[test]
    fn test_urgency_banding() {
        assert_eq!(urgency_color(0), "#f8d7da");
        assert_eq!(urgency_color(7), "#f8d7da");
        assert_eq!(urgency_color(8), "#fff3cd");
        assert_eq!(urgency_color(14), "#fff3cd");
        assert_eq!(urgency_color(15), "#ffffff");
        assert_eq!(urgency_color(30), "#ffffff");
    }

    #[test]
    fn test_render_contains_document_rows() {
        let today = date!(2026 - 08 - 23);
        let docs = vec![
            doc("A-1", date!(2026 - 08 - 28), date!(2026 - 08 - 25)),
            doc("B-2", date!(2026 - 09 - 15), date!(2026 - 09 - 10)),
        ];

        let html = render_reminder_email(&docs, today, 30);

        assert!(html.contains("Document Expiry Reminder"));
        assert!(html.contains("expiring within 30 days"));
        assert!(html.contains("A-1"));
        assert!(html.contains("B-2"));
        assert!(html.contains("2026-08-28"));
        // A-1 expires in 5 days: red band
        assert!(html.contains("#f8d7da"));
    }

    #[test]
    fn test_render_empty_has_no_rows() {
        let html = render_reminder_email(&[], date!(2026 - 08 - 23), 30);
        assert!(!html.contains("<td>"));
    }
}
