//! API Lambda handler - thin router over the todo store and the summarizer.
//!
//! This module handles:
//! - Method and route extraction (delegated to `parsing`)
//! - Todo CRUD against the shared `ItemStore`
//! - On-demand summarization through `TodoSummarizer`
//! - CORS headers on every response

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use super::helpers;
use super::parsing::{self, Route};
use crate::clients::{LlmClient, SlackClient};
use crate::core::config::AppConfig;
use crate::errors::TodoError;
use crate::features::TodoSummarizer;
use crate::store::{ItemStore, TodoStore};

/// Everything a request needs, built once per process.
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub summarizer: TodoSummarizer,
    pub cors_allowed_origin: Option<String>,
}

impl AppState {
    /// Wires the real store and HTTP clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file cannot be loaded or an HTTP client
    /// cannot be built.
    pub async fn from_config(config: &AppConfig) -> Result<Self, TodoError> {
        let store: Arc<dyn ItemStore> = match &config.store_path {
            Some(path) => Arc::new(TodoStore::open(path).await?),
            None => Arc::new(TodoStore::in_memory()),
        };

        let llm = LlmClient::new(
            config.gemini_api_key.clone(),
            config.gemini_api_url.clone(),
            config.gemini_model_name.clone(),
            config.http_timeout(),
        )?;
        let slack = SlackClient::new(config.slack_webhook_url.clone(), config.http_timeout())?;

        let summarizer = TodoSummarizer::new(Arc::clone(&store), Arc::new(llm), Arc::new(slack));

        Ok(Self {
            store,
            summarizer,
            cors_allowed_origin: config.cors_allowed_origin.clone(),
        })
    }
}

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never returns `Err` in practice: every failure becomes an HTTP response.
#[tracing::instrument(level = "info", skip(state, event))]
pub async fn function_handler(
    state: &AppState,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    info!(request_id = %event.context.request_id, "API Lambda received request");
    Ok(handle_request(state, &event.payload).await)
}

/// Routes one API Gateway proxy event and builds its response.
pub async fn handle_request(state: &AppState, payload: &Value) -> Value {
    let response = route_request(state, payload).await;
    helpers::with_cors(response, state.cors_allowed_origin.as_deref())
}

async fn route_request(state: &AppState, payload: &Value) -> Value {
    let Some(method) = parsing::request_method(payload) else {
        error!("Request missing HTTP method");
        return helpers::err_response(400, "Missing HTTP method");
    };
    let Some(path) = parsing::request_path(payload) else {
        error!("Request missing path");
        return helpers::err_response(400, "Missing path");
    };

    info!(method = %method, raw_path = %path, "Request path");

    let route = parsing::parse_route(path);
    if route == Route::Unknown {
        return helpers::err_response(404, "Not found");
    }
    if method == "OPTIONS" {
        return helpers::preflight_response();
    }

    let body = match parsing::request_body(payload) {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to read request body: {}", e);
            return helpers::err_response(400, &e.to_string());
        }
    };

    let result = match (method.as_str(), route) {
        ("GET", Route::Items) => list_items(state).await,
        ("POST", Route::Items) => create_item(state, body.as_deref()).await,
        ("POST", Route::Summarize) => return summarize(state).await,
        ("GET", Route::Item(id)) => get_item(state, id).await,
        ("PUT", Route::Item(id)) => update_item(state, id, body.as_deref()).await,
        ("DELETE", Route::Item(id)) => delete_item(state, id).await,
        (_, Route::BadId(raw)) => Err(TodoError::ParseError(format!("Invalid todo id: {raw}"))),
        _ => return helpers::err_response(405, "Method not allowed"),
    };

    result.unwrap_or_else(|e| error_response(&e))
}

// ============================================================================
// Todo Handlers
// ============================================================================

async fn list_items(state: &AppState) -> Result<Value, TodoError> {
    let items = state.store.list_all().await?;
    Ok(helpers::json_response(200, &items))
}

async fn create_item(state: &AppState, body: Option<&str>) -> Result<Value, TodoError> {
    let input = parsing::parse_todo_input(body)?;
    let item = state.store.create(&input.task, input.completed).await?;
    info!(id = item.id, "Created todo");
    Ok(helpers::json_response(201, &item))
}

async fn get_item(state: &AppState, id: u64) -> Result<Value, TodoError> {
    let item = state.store.get(id).await?.ok_or(TodoError::NotFound(id))?;
    Ok(helpers::json_response(200, &item))
}

async fn update_item(state: &AppState, id: u64, body: Option<&str>) -> Result<Value, TodoError> {
    let input = parsing::parse_todo_input(body)?;
    let item = state
        .store
        .update(id, &input.task, input.completed)
        .await?;
    info!(id, completed = item.completed, "Updated todo");
    Ok(helpers::json_response(200, &item))
}

async fn delete_item(state: &AppState, id: u64) -> Result<Value, TodoError> {
    state.store.delete(id).await?;
    info!(id, "Deleted todo");
    Ok(helpers::empty_response(200))
}

// ============================================================================
// Summarization
// ============================================================================

async fn summarize(state: &AppState) -> Value {
    let status = state.summarizer.summarize_and_send().await;

    if status.contains("successfully") {
        info!("Summarization finished: {}", status);
        helpers::text_response(200, &status)
    } else {
        warn!("Summarization did not complete: {}", status);
        helpers::text_response(500, &status)
    }
}

fn error_response(error: &TodoError) -> Value {
    match error {
        TodoError::NotFound(_) => helpers::err_response(404, &error.to_string()),
        TodoError::Validation(_) | TodoError::ParseError(_) => {
            helpers::err_response(400, &error.to_string())
        }
        other => {
            error!("Request failed: {}", other);
            helpers::err_response(500, &other.to_string())
        }
    }
}
