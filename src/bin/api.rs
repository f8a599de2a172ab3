use anyhow::Context;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use std::sync::Arc;
use todo_summary::api::{AppState, handler};
use todo_summary::core::config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    todo_summary::setup_logging();

    let config = AppConfig::from_env()
        .map_err(anyhow::Error::msg)
        .context("failed to load configuration")?;
    let state = AppState::from_config(&config)
        .await
        .context("failed to initialize application state")?;
    let state = Arc::new(state);

    info!(
        model = %config.gemini_model_name,
        persisted = config.store_path.is_some(),
        "Todo summary API starting"
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let state = Arc::clone(&state);
        async move { handler(&state, event).await }
    }))
    .await
}
