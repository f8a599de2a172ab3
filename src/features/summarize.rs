use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::clients::{Notifier, Summarizer};
use crate::core::models::{NO_PENDING_TODOS, SummaryResult};
use crate::errors::TodoError;
use crate::prompt::SYSTEM_INSTRUCTION;
use crate::store::ItemStore;

/// Status returned when a collaborator fails outside its own error handling.
pub const ORCHESTRATION_FAILED: &str =
    "An error occurred during the summarization or Slack notification process.";

/// Where a summarization run currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    Idle,
    FetchPending,
    Summarizing(Vec<String>),
    Notifying(String),
    Done(String),
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::FetchPending => "fetch_pending",
            Stage::Summarizing(_) => "summarizing",
            Stage::Notifying(_) => "notifying",
            Stage::Done(_) => "done",
        }
    }
}

/// Reads pending todos, summarizes them and forwards the summary to Slack.
pub struct TodoSummarizer {
    store: Arc<dyn ItemStore>,
    summarizer: Arc<dyn Summarizer>,
    notifier: Arc<dyn Notifier>,
}

impl TodoSummarizer {
    pub fn new(
        store: Arc<dyn ItemStore>,
        summarizer: Arc<dyn Summarizer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            summarizer,
            notifier,
        }
    }

    /// Runs one summarization and returns the user-facing status.
    ///
    /// Never fails: collaborator errors and panics become [`ORCHESTRATION_FAILED`].
    pub async fn summarize_and_send(&self) -> String {
        let correlation_id = Uuid::new_v4().to_string();

        match AssertUnwindSafe(self.run(&correlation_id))
            .catch_unwind()
            .await
        {
            Ok(Ok(status)) => status,
            Ok(Err(e)) => {
                error!(
                    "Error in summarize_and_send: {} (corr_id={})",
                    e, correlation_id
                );
                ORCHESTRATION_FAILED.to_string()
            }
            Err(_) => {
                error!(
                    "Summarization panicked (corr_id={})",
                    correlation_id
                );
                ORCHESTRATION_FAILED.to_string()
            }
        }
    }

    async fn run(&self, correlation_id: &str) -> Result<String, TodoError> {
        let mut stage = Stage::Idle;

        loop {
            info!(stage = stage.name(), corr_id = %correlation_id, "Summarization stage");
            stage = match stage {
                Stage::Idle => Stage::FetchPending,
                Stage::FetchPending => self.fetch_pending().await?,
                Stage::Summarizing(tasks) => self.summarize(&tasks, correlation_id).await?,
                Stage::Notifying(summary) => {
                    let outcome = self.notifier.send_summary(&summary).await?;
                    info!(
                        success = outcome.success,
                        corr_id = %correlation_id,
                        "Notification finished"
                    );
                    Stage::Done(outcome.status)
                }
                Stage::Done(status) => return Ok(status),
            };
        }
    }

    async fn fetch_pending(&self) -> Result<Stage, TodoError> {
        let pending = self.store.list_pending().await?;
        if pending.is_empty() {
            return Ok(Stage::Done(NO_PENDING_TODOS.to_string()));
        }

        let tasks = pending.into_iter().map(|item| item.task).collect();
        Ok(Stage::Summarizing(tasks))
    }

    async fn summarize(&self, tasks: &[String], correlation_id: &str) -> Result<Stage, TodoError> {
        let summary = self
            .summarizer
            .summarize(tasks, Some(SYSTEM_INSTRUCTION))
            .await?;

        let result = SummaryResult::classify(&summary);
        if result.is_failure() {
            warn!(
                kind = ?result,
                corr_id = %correlation_id,
                "Summary generation failed, skipping notification"
            );
            return Ok(Stage::Done(summary));
        }

        Ok(Stage::Notifying(summary))
    }
}
