use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("Todo not found with id: {0}")]
    NotFound(u64),

    #[error("Invalid todo: {0}")]
    Validation(String),

    #[error("Failed to access upstream service: {0}")]
    Upstream(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to persist todos: {0}")]
    Storage(String),

    #[error("Failed to parse payload: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for TodoError {
    fn from(error: reqwest::Error) -> Self {
        TodoError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for TodoError {
    fn from(error: serde_json::Error) -> Self {
        TodoError::ParseError(error.to_string())
    }
}

impl From<std::io::Error> for TodoError {
    fn from(error: std::io::Error) -> Self {
        TodoError::Storage(error.to_string())
    }
}

impl From<url::ParseError> for TodoError {
    fn from(error: url::ParseError) -> Self {
        TodoError::Config(format!("invalid URL: {error}"))
    }
}

impl From<anyhow::Error> for TodoError {
    fn from(error: anyhow::Error) -> Self {
        TodoError::Upstream(error.to_string())
    }
}
