use serde::Deserialize;
use std::env;

/// Configuration for the notification gateway.
///
/// All fields are optional: with no `NOTIFY_API_URL` the gateway runs in
/// disabled mode and every send reports `sent: false` instead of failing,
/// so a booking environment without a provider keeps working.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifyConfig {
    /// Endpoint of the notification provider (required to enable sending)
    pub api_url: Option<String>,
    /// Bearer token for the provider
    pub api_key: Option<String>,
    /// Sender identity forwarded to the provider
    pub from: Option<String>,
}

impl NotifyConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("NOTIFY_API_URL").ok(),
            api_key: env::var("NOTIFY_API_KEY").ok(),
            from: env::var("NOTIFY_FROM").ok(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.api_url.is_some()
    }
}
