use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tokio::time::timeout;

use crate::auth::{AccessLevel, Claims, CredentialVerifier};
use crate::error::GatewayError;
use crate::schema::SchemaResource;
use crate::store::SchemaStore;

pub mod adapter;

pub use adapter::{adapt, CanonicalRequest, RawEvent};

/// Transport-agnostic response: status, headers, JSON body.
#[derive(Debug)]
pub struct GatewayResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

impl GatewayResponse {
    fn json_headers() -> HashMap<String, String> {
        HashMap::from([("content-type".to_string(), "application/json".to_string())])
    }

    pub fn ok(body: Value) -> Self {
        Self { status: 200, headers: Self::json_headers(), body }
    }

    pub fn from_error(err: &GatewayError) -> Self {
        Self { status: err.status_code(), headers: Self::json_headers(), body: err.to_json() }
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, axum::Json(self.body)).into_response();
        // The header map is part of the response contract; forward every
        // entry rather than relying on Json to re-add content-type.
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                response.headers_mut().insert(name, value);
            }
        }
        response
    }
}

/// Sequences one request through the pathway: adapt, verify, store access,
/// response shaping. The orchestrator is the last line of defense: every
/// downstream failure is converted to a `GatewayResponse` here and nothing
/// propagates to the transport layer.
pub struct Gateway {
    verifier: Arc<dyn CredentialVerifier>,
    store: Arc<dyn SchemaStore>,
    io_timeout: Duration,
}

impl Gateway {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        store: Arc<dyn SchemaStore>,
        io_timeout: Duration,
    ) -> Self {
        Self { verifier, store, io_timeout }
    }

    pub async fn handle_get(&self, event: RawEvent) -> GatewayResponse {
        match self.get(event).await {
            Ok((claims, resource)) => {
                tracing::info!(subject = %claims.sub, operation = "get_schema", status = 200);
                match serde_json::to_value(&resource) {
                    Ok(body) => GatewayResponse::ok(body),
                    Err(e) => self.reject("get_schema", GatewayError::internal(e.to_string())),
                }
            }
            Err(err) => self.reject("get_schema", err),
        }
    }

    pub async fn handle_update(&self, event: RawEvent) -> GatewayResponse {
        match self.update(event).await {
            Ok((claims, resource)) => {
                tracing::info!(subject = %claims.sub, operation = "update_schema", status = 200);
                match serde_json::to_value(&resource) {
                    Ok(body) => GatewayResponse::ok(body),
                    Err(e) => self.reject("update_schema", GatewayError::internal(e.to_string())),
                }
            }
            Err(err) => self.reject("update_schema", err),
        }
    }

    async fn get(&self, event: RawEvent) -> Result<(Claims, SchemaResource), GatewayError> {
        let request = adapt(event)?;
        let claims = self.verify(&request, AccessLevel::Read).await?;
        let resource = self.store_get().await?;
        Ok((claims, resource))
    }

    async fn update(&self, event: RawEvent) -> Result<(Claims, SchemaResource), GatewayError> {
        let request = adapt(event)?;
        let claims = self.verify(&request, AccessLevel::Edit).await?;

        if request.body.is_null() {
            return Err(GatewayError::malformed_body("Request body is required"));
        }
        let candidate: SchemaResource = serde_json::from_value(request.body).map_err(|e| {
            GatewayError::validation_failed(format!("Body is not a valid schema resource: {}", e))
        })?;

        let resource = self.store_update(candidate).await?;
        Ok((claims, resource))
    }

    /// Credential verification, bounded by the configured I/O timeout. A
    /// verifier that never answers cannot authenticate anyone.
    async fn verify(
        &self,
        request: &CanonicalRequest,
        required: AccessLevel,
    ) -> Result<Claims, GatewayError> {
        match timeout(
            self.io_timeout,
            self.verifier.verify(request.authorization.as_deref(), required),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(GatewayError::unauthorized("Credential verification timed out")),
        }
    }

    async fn store_get(&self) -> Result<SchemaResource, GatewayError> {
        match timeout(self.io_timeout, self.store.get_schema()).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(GatewayError::store_unavailable("Schema store timed out")),
        }
    }

    async fn store_update(&self, candidate: SchemaResource) -> Result<SchemaResource, GatewayError> {
        match timeout(self.io_timeout, self.store.update_schema(candidate)).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(GatewayError::store_unavailable("Schema store timed out")),
        }
    }

    fn reject(&self, operation: &'static str, err: GatewayError) -> GatewayResponse {
        tracing::warn!(
            operation,
            kind = err.kind(),
            status = err.status_code(),
            error = %err,
            "request rejected"
        );
        GatewayResponse::from_error(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{issue_token, JwtVerifier};
    use crate::store::{MemoryStore, StoreError};
    use crate::testing::sample_resource;
    use async_trait::async_trait;
    use serde_json::json;

    struct StalledVerifier;

    #[async_trait]
    impl CredentialVerifier for StalledVerifier {
        async fn verify(
            &self,
            _authorization: Option<&str>,
            _required: AccessLevel,
        ) -> Result<Claims, GatewayError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            unreachable!("timeout should fire first")
        }
    }

    struct StalledStore;

    #[async_trait]
    impl SchemaStore for StalledStore {
        async fn get_schema(&self) -> Result<SchemaResource, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            unreachable!("timeout should fire first")
        }

        async fn update_schema(&self, _: SchemaResource) -> Result<SchemaResource, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            unreachable!("timeout should fire first")
        }
    }

    fn gateway_with(store: Arc<dyn SchemaStore>) -> Gateway {
        Gateway::new(Arc::new(JwtVerifier), store, Duration::from_secs(5))
    }

    fn full_access_event() -> RawEvent {
        let token = issue_token(&Claims::new("user-42".into(), AccessLevel::Full)).unwrap();
        RawEvent { authorization: Some(format!("Bearer {}", token)), body: None }
    }

    #[tokio::test]
    async fn get_returns_stored_resource() {
        let store = Arc::new(MemoryStore::with_resource(sample_resource()));
        let gateway = gateway_with(store);

        let response = gateway.handle_get(full_access_event()).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.headers["content-type"], "application/json");
        assert_eq!(response.body, serde_json::to_value(sample_resource()).unwrap());
    }

    #[tokio::test]
    async fn get_without_credential_is_401() {
        let gateway = gateway_with(Arc::new(MemoryStore::with_resource(sample_resource())));
        let response = gateway.handle_get(RawEvent::default()).await;
        assert_eq!(response.status, 401);
        assert!(response.body["message"].is_string());
    }

    #[tokio::test]
    async fn get_on_empty_store_is_404() {
        let gateway = gateway_with(Arc::new(MemoryStore::new()));
        let response = gateway.handle_get(full_access_event()).await;
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn update_with_string_body_is_decoded_and_stored() {
        let store = Arc::new(MemoryStore::new());
        let gateway = gateway_with(store.clone());

        let event = full_access_event()
            .with_body(json!(r#"{"name":"Posts","slug":"posts","fields":[]}"#));
        let response = gateway.handle_update(event).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["name"], "Posts");

        let stored = store.get_schema().await.unwrap();
        assert_eq!(stored.slug, "posts");
    }

    #[tokio::test]
    async fn update_with_undecodable_body_is_400() {
        let gateway = gateway_with(Arc::new(MemoryStore::new()));
        let event = full_access_event().with_body(json!("{broken"));
        let response = gateway.handle_update(event).await;
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn update_without_body_is_400() {
        let gateway = gateway_with(Arc::new(MemoryStore::new()));
        let response = gateway.handle_update(full_access_event()).await;
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn stalled_verifier_maps_to_401() {
        let gateway = Gateway::new(
            Arc::new(StalledVerifier),
            Arc::new(MemoryStore::with_resource(sample_resource())),
            Duration::from_millis(20),
        );
        let response = gateway.handle_get(full_access_event()).await;
        assert_eq!(response.status, 401);
        assert!(response.body["message"].is_string());
    }

    #[test]
    fn response_headers_reach_the_wire() {
        let mut response = GatewayResponse::ok(json!({ "ok": true }));
        response
            .headers
            .insert("x-schema-revision".to_string(), "7".to_string());
        let http = response.into_response();
        assert_eq!(http.headers()["content-type"], "application/json");
        assert_eq!(http.headers()["x-schema-revision"], "7");
    }

    #[tokio::test]
    async fn stalled_store_maps_to_500() {
        let gateway = Gateway::new(
            Arc::new(JwtVerifier),
            Arc::new(StalledStore),
            Duration::from_millis(20),
        );
        let response = gateway.handle_get(full_access_event()).await;
        assert_eq!(response.status, 500);
        assert_eq!(response.body, json!({ "message": "Internal Server Error" }));
    }
}
