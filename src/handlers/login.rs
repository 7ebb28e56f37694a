use axum::body::Bytes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{self, AccessLevel, Claims};
use crate::config;
use crate::error::GatewayError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/login - validate credentials and issue a bearer token.
///
/// Credential mismatch is a plain 401; any unexpected failure collapses to a
/// generic 500 so nothing about the signing setup leaks to the caller.
pub async fn post(bytes: Bytes) -> Response {
    // Parse by hand rather than through the Json extractor so a bad payload
    // still gets the standard `{"message": ...}` error shape.
    let payload: LoginRequest = match serde_json::from_slice(&bytes) {
        Ok(payload) => payload,
        Err(e) => {
            return GatewayError::malformed_body(format!("Login body is not valid JSON: {}", e))
                .into_response()
        }
    };

    if !auth::verify_password(&payload.username, &payload.password) {
        tracing::warn!(username = %payload.username, "login rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid username or password" })),
        )
            .into_response();
    }

    let claims = Claims::new(payload.username.clone(), AccessLevel::Full);
    match auth::issue_token(&claims) {
        Ok(token) => {
            tracing::info!(subject = %claims.sub, "login succeeded");
            let expires_in = config::config().security.jwt_expiry_hours * 3600;
            (
                StatusCode::OK,
                Json(json!({
                    "token": token,
                    "expiresIn": expires_in,
                    "user": { "username": payload.username },
                })),
            )
                .into_response()
        }
        Err(err) => {
            tracing::error!(kind = err.kind(), error = %err, "token issuance failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Internal server error during login" })),
            )
                .into_response()
        }
    }
}
