use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix carried by every failed summarization result.
pub const ERROR_MARKER: &str = "Error:";

pub const NO_PENDING_TODOS: &str = "No pending todos to summarize.";
pub const NO_PENDING_TASKS: &str = "No pending tasks to summarize.";
pub const GENERATION_FAILED: &str = "Error: Failed to get summary from LLM.";
pub const PARSE_FAILED: &str = "Error: Could not parse summary from LLM response.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u64,
    pub task: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Body accepted by the create and update routes.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoInput {
    pub task: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryResult {
    Summary(String),
    NoPendingItems,
    GenerationFailed,
    ParseFailed,
}

impl SummaryResult {
    /// Classifies the string handed back by a summarizer. Anything carrying the
    /// error marker is a failure and must not be forwarded.
    #[must_use]
    pub fn classify(text: &str) -> Self {
        match text {
            NO_PENDING_TODOS | NO_PENDING_TASKS => Self::NoPendingItems,
            GENERATION_FAILED => Self::GenerationFailed,
            PARSE_FAILED => Self::ParseFailed,
            other if other.starts_with(ERROR_MARKER) => Self::GenerationFailed,
            other => Self::Summary(other.to_string()),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::GenerationFailed | Self::ParseFailed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationOutcome {
    pub success: bool,
    pub status: String,
}

impl NotificationOutcome {
    pub fn sent(status: impl Into<String>) -> Self {
        Self {
            success: true,
            status: status.into(),
        }
    }

    pub fn failed(status: impl Into<String>) -> Self {
        Self {
            success: false,
            status: status.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_failure_markers() {
        assert_eq!(SummaryResult::classify(GENERATION_FAILED), SummaryResult::GenerationFailed);
        assert_eq!(SummaryResult::classify(PARSE_FAILED), SummaryResult::ParseFailed);
        assert_eq!(SummaryResult::classify(NO_PENDING_TODOS), SummaryResult::NoPendingItems);
        assert!(SummaryResult::classify("Error: quota exceeded").is_failure());
        assert!(!SummaryResult::classify(NO_PENDING_TASKS).is_failure());
    }

    #[test]
    fn test_classify_plain_text_is_summary() {
        let result = SummaryResult::classify("You have 2 tasks");
        assert!(!result.is_failure());
        assert_eq!(result, SummaryResult::Summary("You have 2 tasks".to_string()));
    }

    #[test]
    fn test_todo_input_completed_defaults_to_false() {
        let input: TodoInput = serde_json::from_str(r#"{"task":"buy milk"}"#).unwrap();
        assert_eq!(input.task, "buy milk");
        assert!(!input.completed);
    }
}
