//! Outbound notification port.
//!
//! The application carries `Option<Arc<dyn Notifier>>`; callers check the
//! option at the call site and log-and-continue when mail is unconfigured
//! or a send fails. A failed send never aborts the surrounding request or
//! scheduled job.

use async_trait::async_trait;
use thiserror::Error;

pub mod mailer;
pub mod recording;

pub use mailer::HttpMailer;
pub use recording::RecordingNotifier;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("mail relay request failed: {0}")]
    Transport(String),
    #[error("mail relay rejected the message: status {0}")]
    Rejected(u16),
}

/// Sends a single message to a list of recipients.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(
        &self,
        subject: &str,
        html_body: &str,
        recipients: &[String],
    ) -> Result<(), NotifyError>;
}
