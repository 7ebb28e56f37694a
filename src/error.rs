// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// Gateway-level error with an explicit machine-readable kind.
///
/// The variant is the contract: status codes and client handling derive from
/// it, never from inspecting the message text.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    // 400 Bad Request
    #[error("{0}")]
    MalformedBody(String),
    #[error("{0}")]
    ValidationFailed(String),

    // 401 Unauthorized
    #[error("{0}")]
    Unauthorized(String),

    // 403 Forbidden
    #[error("{0}")]
    Forbidden(String),

    // 404 Not Found
    #[error("{0}")]
    NotFound(String),

    // 500 Internal Server Error
    #[error("{0}")]
    StoreUnavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl GatewayError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::MalformedBody(_) => 400,
            GatewayError::ValidationFailed(_) => 400,
            GatewayError::Unauthorized(_) => 401,
            GatewayError::Forbidden(_) => 403,
            GatewayError::NotFound(_) => 404,
            GatewayError::StoreUnavailable(_) => 500,
            GatewayError::Internal(_) => 500,
        }
    }

    /// Get error kind tag for logging and client handling
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::MalformedBody(_) => "MALFORMED_BODY",
            GatewayError::ValidationFailed(_) => "VALIDATION_FAILED",
            GatewayError::Unauthorized(_) => "UNAUTHORIZED",
            GatewayError::Forbidden(_) => "FORBIDDEN",
            GatewayError::NotFound(_) => "NOT_FOUND",
            GatewayError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            GatewayError::Internal(_) => "INTERNAL",
        }
    }

    /// Get client-safe error message. Backend failures are reported with a
    /// generic message; the real cause goes to the logs only.
    pub fn message(&self) -> &str {
        match self {
            GatewayError::MalformedBody(msg) => msg,
            GatewayError::ValidationFailed(msg) => msg,
            GatewayError::Unauthorized(msg) => msg,
            GatewayError::Forbidden(msg) => msg,
            GatewayError::NotFound(msg) => msg,
            GatewayError::StoreUnavailable(_) => "Internal Server Error",
            GatewayError::Internal(_) => "Internal Server Error",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "message": self.message() })
    }
}

// Static constructor methods
impl GatewayError {
    pub fn malformed_body(message: impl Into<String>) -> Self {
        GatewayError::MalformedBody(message.into())
    }

    pub fn validation_failed(message: impl Into<String>) -> Self {
        GatewayError::ValidationFailed(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        GatewayError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        GatewayError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        GatewayError::NotFound(message.into())
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        GatewayError::StoreUnavailable(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        GatewayError::Internal(message.into())
    }
}

impl From<crate::store::StoreError> for GatewayError {
    fn from(err: crate::store::StoreError) -> Self {
        match err {
            crate::store::StoreError::NotFound(msg) => GatewayError::not_found(msg),
            crate::store::StoreError::Validation(msg) => GatewayError::validation_failed(msg),
            crate::store::StoreError::Unavailable(msg) => {
                tracing::error!(error = %msg, "schema store unavailable");
                GatewayError::store_unavailable(msg)
            }
        }
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
