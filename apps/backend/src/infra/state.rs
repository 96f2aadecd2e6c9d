use std::sync::Arc;

use crate::config::reminder::ReminderConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::notify::Notifier;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_url: Option<String>,
    notifier: Option<Arc<dyn Notifier>>,
    reminder: ReminderConfig,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_url: None,
            notifier: None,
            reminder: ReminderConfig::default(),
        }
    }

    pub fn with_db_url(mut self, url: impl Into<String>) -> Self {
        self.db_url = Some(url.into());
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_reminder(mut self, reminder: ReminderConfig) -> Self {
        self.reminder = reminder;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let mut state = if let Some(url) = self.db_url {
            // single entrypoint: connect + migrate
            let conn = bootstrap_db(&url).await?;
            AppState::new(conn, self.security_config)
        } else {
            AppState::without_db(self.security_config)
        };

        state = state.with_reminder_config(self.reminder);
        if let Some(notifier) = self.notifier {
            state = state.with_notifier(notifier);
        }
        Ok(state)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
