//! Daily reminder trigger.
//!
//! A plain tokio task that sleeps until the configured UTC hour, runs the
//! reminder check, and goes back to sleep. Timer-run errors are logged and
//! swallowed; the single-flight lock inside the job keeps an overlapping
//! manual trigger from double-sending.

use time::{Duration, OffsetDateTime, Time};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::services::reminders::{run_reminder_check, ReminderRun};
use crate::state::app_state::AppState;

/// Spawn the daily reminder loop. The handle is detached by the caller;
/// the loop runs for the lifetime of the process.
pub fn spawn_daily_reminder(state: AppState) -> JoinHandle<()> {
    let hour_utc = state.reminder.hour_utc;
    state.scheduler_status.mark_started();
    info!(hour_utc, "reminder scheduler started");

    tokio::spawn(async move {
        loop {
            let wait = duration_until_next_run(OffsetDateTime::now_utc(), hour_utc);
            debug!(wait_secs = wait.as_secs(), "sleeping until next reminder run");
            tokio::time::sleep(wait).await;

            info!("daily reminder trigger fired");
            match run_reminder_check(&state).await {
                Ok(ReminderRun::Completed(outcome)) => {
                    info!(
                        expiring = outcome.expiring,
                        recipients = outcome.recipients,
                        sent = outcome.sent,
                        "scheduled reminder check completed"
                    );
                }
                Ok(ReminderRun::AlreadyRunning) => {
                    warn!("scheduled reminder check skipped, a run was already in flight");
                }
                Err(e) => {
                    // Timer runs never propagate errors; the next tick retries.
                    error!(error = %e, "scheduled reminder check failed");
                }
            }
        }
    })
}

/// Time until the next `hour_utc`:00:00 strictly after `now`.
fn duration_until_next_run(now: OffsetDateTime, hour_utc: u8) -> std::time::Duration {
    let run_time = Time::from_hms(hour_utc, 0, 0).unwrap_or(Time::MIDNIGHT);
    let today_run = now.date().with_time(run_time).assume_utc();

    let next = if today_run > now {
        today_run
    } else {
        today_run + Duration::days(1)
    };

    (next - now).unsigned_abs()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::duration_until_next_run;

    #[test]
    fn test_before_todays_run() {
        let now = datetime!(2026-08-23 08:00 UTC);
        let wait = duration_until_next_run(now, 9);
        assert_eq!(wait.as_secs(), 60 * 60);
    }

    #[test]
    fn test_after_todays_run_waits_for_tomorrow() {
        let now = datetime!(2026-08-23 10:30 UTC);
        let wait = duration_until_next_run(now, 9);
        assert_eq!(wait.as_secs(), (24 - 1) * 60 * 60 - 30 * 60);
    }

    #[test]
    fn test_exactly_at_run_time_schedules_next_day() {
        let now = datetime!(2026-08-23 09:00 UTC);
        let wait = duration_until_next_run(now, 9);
        assert_eq!(wait.as_secs(), 24 * 60 * 60);
    }
}
