use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use sea_orm::DatabaseConnection;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use super::security_config::SecurityConfig;
use crate::config::reminder::ReminderConfig;
use crate::notify::Notifier;

/// Liveness view of the reminder scheduler, reported by /health.
#[derive(Debug, Default)]
pub struct SchedulerStatus {
    started: AtomicBool,
    last_run: RwLock<Option<OffsetDateTime>>,
}

impl SchedulerStatus {
    pub fn mark_started(&self) {
        self.started.store(true, Ordering::Relaxed);
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Relaxed)
    }

    pub fn record_run(&self, at: OffsetDateTime) {
        *self.last_run.write() = Some(at);
    }

    pub fn last_run(&self) -> Option<OffsetDateTime> {
        *self.last_run.read()
    }
}

/// Application state containing shared resources. Constructed once at
/// startup and handed to handlers and the scheduler; no ambient singletons.
#[derive(Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    pub db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Outbound mail sender; None when mail credentials are unconfigured
    pub notifier: Option<Arc<dyn Notifier>>,
    /// Reminder job settings (window size, daily hour)
    pub reminder: ReminderConfig,
    /// Single-flight guard: overlapping reminder runs are skipped, not queued
    pub reminder_lock: Arc<Mutex<()>>,
    /// Scheduler liveness for /health
    pub scheduler_status: Arc<SchedulerStatus>,
}

impl AppState {
    /// Create a new AppState with the given database connection and security config
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            notifier: None,
            reminder: ReminderConfig::default(),
            reminder_lock: Arc::new(Mutex::new(())),
            scheduler_status: Arc::new(SchedulerStatus::default()),
        }
    }

    /// Create a new AppState without a database connection (for testing)
    pub fn without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            notifier: None,
            reminder: ReminderConfig::default(),
            reminder_lock: Arc::new(Mutex::new(())),
            scheduler_status: Arc::new(SchedulerStatus::default()),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_reminder_config(mut self, config: ReminderConfig) -> Self {
        self.reminder = config;
        self
    }
}
