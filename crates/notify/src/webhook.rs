//! HTTP webhook notifier.
//!
//! Delivers notifications as `{"text": "..."}` JSON payloads, the format
//! accepted by Slack-style incoming webhooks.

use std::time::Duration;

use crate::traits::{Notification, Notifier, NotifyError};

/// POSTs notifications as JSON to a configured endpoint.
///
/// Delivery is attempted exactly once per call; there is no retry or queue.
#[derive(Debug)]
pub struct WebhookNotifier {
    /// Target URL.
    url: String,
    /// Shared HTTP client (connection pooling, request timeout).
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a new webhook notifier. Every request is bounded by `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let body = serde_json::to_string(notification).map_err(|e| {
            NotifyError::Config(format!("failed to serialize notification: {e}"))
        })?;

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(
                %status,
                body = %body_text,
                "webhook returned non-2xx status"
            );
            return Err(NotifyError::Status {
                status,
                body: body_text,
            });
        }

        tracing::debug!(%status, "webhook notification delivered");

        Ok(())
    }

    fn channel_name(&self) -> &str {
        "webhook"
    }
}
