use axum::http::HeaderMap;
use serde_json::Value;

use crate::error::GatewayError;

/// Raw transport event before normalization. The body may be absent, already
/// structured, or a string carrying JSON that still needs decoding.
#[derive(Debug, Default)]
pub struct RawEvent {
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl RawEvent {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Self { authorization, body: None }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Canonical request shape every downstream component sees: credentials as
/// an optional header value, the body always structured JSON (Null if absent).
#[derive(Debug)]
pub struct CanonicalRequest {
    pub authorization: Option<String>,
    pub body: Value,
}

/// Collapse the string-or-already-parsed body ambiguity at the boundary:
/// string bodies are decoded as JSON, structured bodies pass through
/// unchanged, absent bodies become Null.
pub fn adapt(event: RawEvent) -> Result<CanonicalRequest, GatewayError> {
    let body = match event.body {
        None => Value::Null,
        Some(Value::String(raw)) => serde_json::from_str(&raw).map_err(|e| {
            GatewayError::malformed_body(format!("Request body is not valid JSON: {}", e))
        })?,
        Some(structured) => structured,
    };

    Ok(CanonicalRequest { authorization: event.authorization, body })
}
