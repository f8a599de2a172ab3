//! Extraction of method, route and body from API Gateway proxy events.
//!
//! Both HTTP API (v2) and REST API (v1) payload shapes are understood.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::core::models::TodoInput;
use crate::errors::TodoError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// Upper-cased HTTP method of the event.
pub fn request_method(payload: &Value) -> Option<String> {
    v_str(payload, &["requestContext", "http", "method"])
        .or_else(|| v_str(payload, &["httpMethod"]))
        .map(str::to_ascii_uppercase)
}

pub fn request_path(payload: &Value) -> Option<&str> {
    v_str(payload, &["rawPath"]).or_else(|| v_str(payload, &["path"]))
}

/// Request body as text, base64-decoded when the gateway flagged it.
pub fn request_body(payload: &Value) -> Result<Option<String>, TodoError> {
    let Some(body) = payload.get("body").and_then(Value::as_str) else {
        return Ok(None);
    };

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !encoded {
        return Ok(Some(body.to_string()));
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| TodoError::ParseError(format!("Invalid base64 body: {e}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| TodoError::ParseError(format!("Body is not UTF-8: {e}")))?;
    Ok(Some(text))
}

pub fn parse_todo_input(body: Option<&str>) -> Result<TodoInput, TodoError> {
    let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
        return Err(TodoError::ParseError("Missing body".to_string()));
    };
    serde_json::from_str(body)
        .map_err(|e| TodoError::ParseError(format!("Invalid todo JSON: {e}")))
}

/// Resource addressed by a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Items,
    Item(u64),
    Summarize,
    /// `/items/{id}` where the id is not a number
    BadId(String),
    Unknown,
}

/// Finds the single `items` segment; anything before it is treated as a stage
/// or `/api` prefix, anything after it selects the resource.
pub fn parse_route(path: &str) -> Route {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut positions = segments
        .iter()
        .enumerate()
        .filter(|(_, segment)| **segment == "items")
        .map(|(i, _)| i);
    let (Some(start), None) = (positions.next(), positions.next()) else {
        return Route::Unknown;
    };

    match &segments[start + 1..] {
        [] => Route::Items,
        ["summarize"] => Route::Summarize,
        [id] => match id.parse::<u64>() {
            Ok(id) => Route::Item(id),
            Err(_) => Route::BadId((*id).to_string()),
        },
        _ => Route::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_route() {
        assert_eq!(parse_route("/items"), Route::Items);
        assert_eq!(parse_route("/items/"), Route::Items);
        assert_eq!(parse_route("/prod/api/items"), Route::Items);
        assert_eq!(parse_route("/items/42"), Route::Item(42));
        assert_eq!(parse_route("/items/summarize"), Route::Summarize);
        assert_eq!(parse_route("/items/abc"), Route::BadId("abc".to_string()));
        assert_eq!(parse_route("/health"), Route::Unknown);
        assert_eq!(parse_route("/items/1/extra"), Route::Unknown);
        assert_eq!(parse_route("/"), Route::Unknown);
    }

    #[test]
    fn test_parse_route_rejects_repeated_items_segment() {
        assert_eq!(parse_route("/items/items"), Route::Unknown);
        assert_eq!(parse_route("/items/5/items"), Route::Unknown);
        assert_eq!(parse_route("/api/items/items/summarize"), Route::Unknown);
    }

    #[test]
    fn test_request_method_v1_and_v2() {
        let v2 = json!({ "requestContext": { "http": { "method": "post" } } });
        assert_eq!(request_method(&v2).as_deref(), Some("POST"));

        let v1 = json!({ "httpMethod": "DELETE" });
        assert_eq!(request_method(&v1).as_deref(), Some("DELETE"));
    }

    #[test]
    fn test_request_body_decodes_base64() {
        let payload = json!({ "body": "eyJ0YXNrIjoiYnV5IG1pbGsifQ==", "isBase64Encoded": true });
        assert_eq!(
            request_body(&payload).unwrap().as_deref(),
            Some("{\"task\":\"buy milk\"}")
        );
    }
}
