//! # Pitchbook Notification Gateway
//!
//! Best-effort delivery of booking confirmations. The gateway posts a JSON
//! summary of a confirmed reservation to an external provider which renders
//! and sends the actual message (email plus attached confirmation document).
//!
//! Delivery is strictly non-fatal for the booking path: `send_confirmation`
//! never returns an error. Transport failures are retried once, then folded
//! into the returned [`DeliveryReport`] for the caller to surface as
//! response metadata.

pub mod config;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use config::NotifyConfig;

/// Everything the provider needs to render a confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationSummary {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub pitch_name: String,
    pub pitch_kind: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub tariff: f64,
    pub status: String,
}

/// Outcome of one delivery attempt, reported alongside the booking response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryReport {
    pub sent: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

impl DeliveryReport {
    fn sent(message_id: Option<String>) -> Self {
        Self {
            sent: true,
            message_id,
            error: None,
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            sent: false,
            message_id: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ProviderRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<&'a str>,
    #[serde(flatten)]
    summary: &'a ConfirmationSummary,
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    message_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NotifyClient {
    config: NotifyConfig,
    http: reqwest::Client,
}

impl NotifyClient {
    pub fn new(config: NotifyConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(NotifyConfig::from_env())
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// Delivers a confirmation, retrying once on transport failure.
    ///
    /// Always returns a report; the booking that triggered the send has
    /// already been committed and must not be rolled back on provider
    /// trouble.
    pub async fn send_confirmation(&self, summary: &ConfirmationSummary) -> DeliveryReport {
        let Some(api_url) = self.config.api_url.as_deref() else {
            return DeliveryReport::failed("notification gateway is not configured");
        };

        let body = ProviderRequest {
            from: self.config.from.as_deref(),
            summary,
        };

        let mut last_error = String::new();
        for attempt in 0..2 {
            match self.post_once(api_url, &body).await {
                Ok(report) => return report,
                Err(err) => {
                    warn!(
                        "confirmation delivery attempt {} failed: {}",
                        attempt + 1,
                        err
                    );
                    last_error = err;
                }
            }
        }

        DeliveryReport::failed(last_error)
    }

    async fn post_once(
        &self,
        api_url: &str,
        body: &ProviderRequest<'_>,
    ) -> Result<DeliveryReport, String> {
        let mut request = self.http.post(api_url).json(body);
        if let Some(key) = self.config.api_key.as_deref() {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| e.to_string())?;
        let status = response.status();

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            // Provider rejected the payload; retrying will not help.
            return Ok(DeliveryReport::failed(format!(
                "provider returned {status}: {detail}"
            )));
        }

        let parsed = response.json::<ProviderResponse>().await.ok();
        Ok(DeliveryReport::sent(parsed.and_then(|p| p.message_id)))
    }
}
