//! Slack incoming-webhook client module
//!
//! Posts finished summaries to a fixed webhook URL and turns every outcome,
//! transport failures included, into a status string.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{error, info, warn};

use super::Notifier;
use crate::core::models::NotificationOutcome;
use crate::errors::TodoError;

pub const SUMMARY_PREFIX: &str = "📝 *Todo Summary*: \n";
pub const SENT_SUCCESSFULLY: &str = "Summary sent to Slack successfully!";
pub const SEND_FAILED: &str = "Failed to send summary to Slack.";

/// Builds the webhook payload for a summary.
#[must_use]
pub fn create_summary_payload(summary: &str) -> Value {
    json!({ "text": format!("{SUMMARY_PREFIX}{summary}") })
}

/// Slack answers a good webhook post with the literal body `ok`.
#[must_use]
pub fn classify_webhook_response(body: &str) -> NotificationOutcome {
    if body.eq_ignore_ascii_case("ok") {
        NotificationOutcome::sent(SENT_SUCCESSFULLY)
    } else {
        NotificationOutcome::failed(format!("Slack API response: {body}"))
    }
}

/// Slack webhook client
pub struct SlackClient {
    http: Client,
    webhook_url: String,
}

impl SlackClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(webhook_url: String, timeout: Duration) -> Result<Self, TodoError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            TodoError::HttpError(format!("Failed to build Slack HTTP client: {e}"))
        })?;

        Ok(Self { http, webhook_url })
    }

    async fn post_payload(&self, payload: &Value) -> Result<String, TodoError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let resp = self
            .http
            .post(&self.webhook_url)
            .headers(headers)
            .json(payload)
            .send()
            .await?;

        let status = resp.status();
        let body_text = resp
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());

        if !status.is_success() {
            return Err(TodoError::Upstream(format!(
                "webhook POST failed: status={status} body={body_text}"
            )));
        }

        Ok(body_text)
    }

    pub async fn send(&self, summary: &str) -> NotificationOutcome {
        let payload = create_summary_payload(summary);

        match self.post_payload(&payload).await {
            Ok(body) => {
                let outcome = classify_webhook_response(&body);
                if outcome.success {
                    info!("Summary delivered to Slack webhook");
                } else {
                    warn!("Unexpected Slack webhook response: {}", body);
                }
                outcome
            }
            Err(e) => {
                error!("Error sending to Slack: {}", e);
                NotificationOutcome::failed(SEND_FAILED)
            }
        }
    }
}

#[async_trait]
impl Notifier for SlackClient {
    async fn send_summary(&self, summary: &str) -> Result<NotificationOutcome, TodoError> {
        Ok(self.send(summary).await)
    }
}
