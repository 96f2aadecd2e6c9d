//! In-memory notifier used by tests to assert on sent messages.

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{Notifier, NotifyError};

#[derive(Debug, Clone)]
pub struct RecordedMessage {
    pub subject: String,
    pub html_body: String,
    pub recipients: Vec<String>,
}

/// Records every send instead of performing I/O. Optionally fails each
/// send to exercise the log-and-continue path.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<RecordedMessage>>,
    fail_sends: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_sends: true,
        }
    }

    pub fn sent(&self) -> Vec<RecordedMessage> {
        self.sent.lock().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        subject: &str,
        html_body: &str,
        recipients: &[String],
    ) -> Result<(), NotifyError> {
        if self.fail_sends {
            return Err(NotifyError::Transport("recording notifier set to fail".into()));
        }
        self.sent.lock().push(RecordedMessage {
            subject: subject.to_string(),
            html_body: html_body.to_string(),
            recipients: recipients.to_vec(),
        });
        Ok(())
    }
}
