//! Reminder scheduler configuration.

/// Settings for the daily expiry-reminder job.
#[derive(Debug, Clone, Copy)]
pub struct ReminderConfig {
    /// UTC hour (0-23) at which the daily job fires
    pub hour_utc: u8,
    /// Inclusive look-ahead window in days
    pub window_days: i64,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            hour_utc: 9,
            window_days: 30,
        }
    }
}

impl ReminderConfig {
    /// Read `REMINDER_HOUR_UTC` and `REMINDER_WINDOW_DAYS`, falling back
    /// to the defaults (09:00 UTC, 30 days) on missing or invalid values.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let hour_utc = std::env::var("REMINDER_HOUR_UTC")
            .ok()
            .and_then(|v| v.parse::<u8>().ok())
            .filter(|h| *h < 24)
            .unwrap_or(defaults.hour_utc);

        let window_days = std::env::var("REMINDER_WINDOW_DAYS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|d| *d >= 0)
            .unwrap_or(defaults.window_days);

        Self {
            hour_utc,
            window_days,
        }
    }
}
