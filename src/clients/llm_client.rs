//! LLM (Gemini) API client module
//!
//! Encapsulates the `generateContent` call used to summarize pending todos.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info};
use url::Url;

use super::Summarizer;
use crate::core::models::{GENERATION_FAILED, NO_PENDING_TASKS, PARSE_FAILED};
use crate::errors::TodoError;
use crate::prompt::{build_prompt_text, build_request_body};

/// Pulls `candidates[0].content.parts[0].text` out of a `generateContent` response.
#[must_use]
pub fn extract_summary_text(response: &Value) -> Option<String> {
    response
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(ToString::to_string)
}

/// LLM API client for generating todo summaries
pub struct LlmClient {
    http: Client,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        api_key: String,
        base_url: String,
        model_name: String,
        timeout: Duration,
    ) -> Result<Self, TodoError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            TodoError::HttpError(format!("Failed to build Gemini HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            api_key,
            base_url,
            model_name,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the configured base URL is not a valid URL.
    pub fn endpoint(&self) -> Result<Url, TodoError> {
        let raw = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model_name
        );
        let mut url = Url::parse(&raw)?;
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    /// Sends one request and returns the raw response body.
    async fn request(&self, body: &Value) -> Result<String, TodoError> {
        let url = self.endpoint()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .http
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| TodoError::HttpError(format!("Gemini API request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TodoError::Upstream(format!(
                "Gemini API error: status={status} body={error_text}"
            )));
        }

        Ok(response.text().await?)
    }

    /// Summarizes `tasks` in one call. Failures come back as `Error:`-prefixed text.
    pub async fn generate_summary(
        &self,
        tasks: &[String],
        system_instruction: Option<&str>,
    ) -> String {
        if tasks.is_empty() {
            return NO_PENDING_TASKS.to_string();
        }

        let prompt_text = build_prompt_text(tasks);
        let body = build_request_body(system_instruction, &prompt_text);

        #[cfg(feature = "debug-logs")]
        info!("Using Gemini prompt:\n{}", prompt_text);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            model = %self.model_name,
            "Generating summary for {} pending tasks",
            tasks.len()
        );

        let raw = match self.request(&body).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("Error calling Gemini API: {}", e);
                return GENERATION_FAILED.to_string();
            }
        };

        let parsed = serde_json::from_str::<Value>(&raw)
            .ok()
            .and_then(|json| extract_summary_text(&json));

        if let Some(text) = parsed {
            text
        } else {
            error!("Error parsing Gemini response, raw body: {}", raw);
            PARSE_FAILED.to_string()
        }
    }
}

#[async_trait]
impl Summarizer for LlmClient {
    async fn summarize(
        &self,
        tasks: &[String],
        system_instruction: Option<&str>,
    ) -> Result<String, TodoError> {
        Ok(self.generate_summary(tasks, system_instruction).await)
    }
}
