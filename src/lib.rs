/// Todo Summary Assistant - a todo list whose pending items can be summarized
/// by Gemini and posted to a Slack channel.
///
/// The crate is deployed as a single API Lambda behind API Gateway:
/// 1. CRUD routes under `/items` manage todos in the `ItemStore`
/// 2. `POST /items/summarize` runs the `TodoSummarizer`, which reads pending
///    todos, asks Gemini for one summary and forwards it to a Slack webhook
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution
/// - reqwest for the Gemini and Slack webhook calls
/// - an in-memory store, optionally persisted to a JSON file
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use todo_summary::clients::{LlmClient, SlackClient};
/// use todo_summary::features::TodoSummarizer;
/// use todo_summary::store::{ItemStore, TodoStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     todo_summary::setup_logging();
///
///     let store = Arc::new(TodoStore::in_memory());
///     store.create("buy milk", false).await?;
///
///     let timeout = std::time::Duration::from_secs(30);
///     let llm = LlmClient::new(
///         "dummy_gemini_key".to_string(),
///         "https://generativelanguage.googleapis.com".to_string(),
///         "gemini-2.0-flash".to_string(),
///         timeout,
///     )?;
///     let slack = SlackClient::new("https://hooks.slack.com/services/T/B/X".to_string(), timeout)?;
///
///     let summarizer = TodoSummarizer::new(store, Arc::new(llm), Arc::new(slack));
///     println!("{}", summarizer.summarize_and_send().await);
///     Ok(())
/// }
/// ```
// Module declarations
pub mod api;
pub mod clients;
pub mod core;
pub mod errors;
pub mod features;
pub mod prompt;
pub mod store;

pub use errors::TodoError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// todo_summary::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
