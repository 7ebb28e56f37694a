use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use static_press_api::auth::{issue_token, AccessLevel, Claims};
use static_press_api::schema::{FieldDefinition, FieldType, SchemaResource};
use static_press_api::store::{MemoryStore, SchemaStore, StoreError};

// Fixtures

pub fn text_field(name: &str, required: bool) -> FieldDefinition {
    FieldDefinition {
        name: name.to_string(),
        field_type: FieldType::Text,
        required,
        label: None,
        placeholder: None,
        description: None,
        options: None,
        timezone_aware: None,
        fields: None,
    }
}

/// "Posts" resource with one required title field and fixed timestamps.
pub fn posts_resource() -> SchemaResource {
    let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    SchemaResource {
        name: "Posts".to_string(),
        slug: "posts".to_string(),
        description: None,
        fields: vec![text_field("title", true)],
        created_at: t,
        updated_at: t,
        icon: None,
        is_public: None,
    }
}

pub fn bearer(access: AccessLevel) -> String {
    bearer_for("user-42", access)
}

pub fn bearer_for(subject: &str, access: AccessLevel) -> String {
    let token = issue_token(&Claims::new(subject.to_string(), access))
        .expect("failed to issue test token");
    format!("Bearer {}", token)
}

// Test doubles

/// Store spy that counts invocations, proving requests short-circuit before
/// the accessor when authentication fails.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    pub gets: AtomicUsize,
    pub updates: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(resource: SchemaResource) -> Self {
        Self {
            inner: MemoryStore::with_resource(resource),
            gets: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchemaStore for CountingStore {
    async fn get_schema(&self) -> Result<SchemaResource, StoreError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get_schema().await
    }

    async fn update_schema(&self, resource: SchemaResource) -> Result<SchemaResource, StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_schema(resource).await
    }
}

/// Store whose every call fails with a backend I/O error.
pub struct FailingStore;

#[async_trait]
impl SchemaStore for FailingStore {
    async fn get_schema(&self) -> Result<SchemaResource, StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }

    async fn update_schema(&self, _: SchemaResource) -> Result<SchemaResource, StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }
}

// Request helpers

pub async fn send(app: &Router, request: Request<Body>) -> Result<(StatusCode, Bytes)> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok((status, bytes))
}

pub async fn send_json(app: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let (status, bytes) = send(app, request).await?;
    let body = serde_json::from_slice(&bytes)?;
    Ok((status, body))
}

pub fn get_schema(auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/api/schema");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn put_schema(auth: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PUT")
        .uri("/api/schema")
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}
