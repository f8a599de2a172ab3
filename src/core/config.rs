use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub gemini_model_name: String,
    pub slack_webhook_url: String,
    pub cors_allowed_origin: Option<String>,
    pub http_timeout_secs: u64,
    pub store_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let http_timeout_secs = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("HTTP_TIMEOUT_SECS: {}", e))?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            gemini_api_key: env::var("GEMINI_API_KEY")
                .map_err(|e| format!("GEMINI_API_KEY: {}", e))?,
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
            gemini_model_name: env::var("GEMINI_MODEL_NAME")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            slack_webhook_url: env::var("SLACK_WEBHOOK_URL")
                .map_err(|e| format!("SLACK_WEBHOOK_URL: {}", e))?,
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            http_timeout_secs,
            store_path: env::var("TODO_STORE_PATH").ok().map(PathBuf::from),
        })
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs.max(1))
    }
}
