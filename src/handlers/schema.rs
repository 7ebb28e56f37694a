// Transport-facing schema handlers. These only translate between HTTP and
// the gateway's RawEvent/GatewayResponse types; all sequencing, auth, and
// error shaping lives in the orchestrator.
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use serde_json::Value;

use crate::gateway::{GatewayResponse, RawEvent};
use crate::AppState;

/// GET /api/schema
pub async fn get(State(state): State<AppState>, headers: HeaderMap) -> GatewayResponse {
    state.gateway.handle_get(RawEvent::from_headers(&headers)).await
}

/// PUT /api/schema
pub async fn put(
    State(state): State<AppState>,
    headers: HeaderMap,
    bytes: Bytes,
) -> GatewayResponse {
    let mut event = RawEvent::from_headers(&headers);
    if !bytes.is_empty() {
        // Undecodable payloads are forwarded as string bodies so the request
        // adapter reports them as MalformedBody with the standard error shape.
        let body = match serde_json::from_slice::<Value>(&bytes) {
            Ok(value) => value,
            Err(_) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        };
        event = event.with_body(body);
    }
    state.gateway.handle_update(event).await
}
