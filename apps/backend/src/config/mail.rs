//! Outbound mail relay configuration.
//!
//! Mail is a soft dependency: when any of these variables is unset the
//! application runs without a notifier and reminder runs log-and-skip
//! the send instead of failing.

#[derive(Debug, Clone)]
pub struct MailConfig {
    /// HTTP mail-relay endpoint accepting a JSON message payload
    pub api_url: String,
    /// Bearer credential for the relay
    pub api_key: String,
    /// From address stamped on every reminder
    pub from: String,
}

impl MailConfig {
    /// Build from `MAIL_API_URL`, `MAIL_API_KEY` and `MAIL_FROM`.
    /// Returns None unless all three are present and non-empty.
    pub fn from_env() -> Option<Self> {
        let api_url = std::env::var("MAIL_API_URL").ok()?;
        let api_key = std::env::var("MAIL_API_KEY").ok()?;
        let from = std::env::var("MAIL_FROM").ok()?;

        if api_url.is_empty() || api_key.is_empty() || from.is_empty() {
            return None;
        }

        Some(Self {
            api_url,
            api_key,
            from,
        })
    }
}
