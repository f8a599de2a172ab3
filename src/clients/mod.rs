//! Client modules for external API interactions

pub mod llm_client;
pub mod slack_client;

use async_trait::async_trait;

use crate::core::models::NotificationOutcome;
use crate::errors::TodoError;

pub use llm_client::LlmClient;
pub use slack_client::SlackClient;

/// Turns a list of tasks into one natural-language summary.
///
/// Implementations report upstream failures as text starting with
/// [`crate::core::models::ERROR_MARKER`]; `Err` is reserved for failures they
/// could not turn into text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        tasks: &[String],
        system_instruction: Option<&str>,
    ) -> Result<String, TodoError>;
}

/// Delivers a finished summary to the team chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_summary(&self, summary: &str) -> Result<NotificationOutcome, TodoError>;
}
