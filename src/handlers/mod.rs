use axum::Json;
use serde_json::{json, Value};

pub mod login;
pub mod schema;

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "static-press-api",
    }))
}
