//! HTTP mail-relay notifier.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use super::{Notifier, NotifyError};
use crate::config::mail::MailConfig;

/// Sends mail through an HTTP relay endpoint that accepts a JSON message
/// payload with a bearer credential. One request per send; all recipients
/// go on the same message.
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

#[derive(Serialize)]
struct OutboundMessage<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn send(
        &self,
        subject: &str,
        html_body: &str,
        recipients: &[String],
    ) -> Result<(), NotifyError> {
        let message = OutboundMessage {
            from: &self.config.from,
            to: recipients,
            subject,
            html: html_body,
        };

        debug!(recipients = recipients.len(), subject, "dispatching mail");

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&message)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(NotifyError::Rejected(response.status().as_u16()));
        }

        info!(recipients = recipients.len(), subject, "mail dispatched");
        Ok(())
    }
}
