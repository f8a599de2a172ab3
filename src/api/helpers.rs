//! Response builders for API Gateway proxy responses.

use serde::Serialize;
use serde_json::{Value, json};

// ============================================================================
// Response Builders
// ============================================================================

/// Returns a response whose body is the JSON encoding of `body`.
#[must_use]
pub fn json_response<T: Serialize>(status_code: u16, body: &T) -> Value {
    match serde_json::to_string(body) {
        Ok(body) => json!({
            "statusCode": status_code,
            "headers": { "Content-Type": "application/json" },
            "body": body
        }),
        Err(e) => err_response(500, &format!("Failed to encode response: {e}")),
    }
}

/// Returns a plain-text response.
#[must_use]
pub fn text_response(status_code: u16, text: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "text/plain; charset=utf-8" },
        "body": text
    })
}

/// Returns a response with no body.
#[must_use]
pub fn empty_response(status_code: u16) -> Value {
    json!({ "statusCode": status_code, "body": "" })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": json!({ "error": message }).to_string()
    })
}

/// Answers a CORS preflight request.
#[must_use]
pub fn preflight_response() -> Value {
    json!({
        "statusCode": 204,
        "headers": {
            "Access-Control-Allow-Methods": "GET, POST, PUT, DELETE, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type"
        },
        "body": ""
    })
}

/// Adds `Access-Control-Allow-Origin` when an origin is configured.
#[must_use]
pub fn with_cors(mut response: Value, allowed_origin: Option<&str>) -> Value {
    let Some(origin) = allowed_origin else {
        return response;
    };

    if !response.get("headers").is_some_and(Value::is_object) {
        response["headers"] = json!({});
    }
    response["headers"]["Access-Control-Allow-Origin"] = json!(origin);
    response
}
