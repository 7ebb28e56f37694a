use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod schema;
pub mod store;

#[cfg(test)]
pub mod testing;

use gateway::Gateway;
use store::SchemaStore;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}

/// Build the router with the default JWT verifier and configured timeout.
pub fn app(schema_store: Arc<dyn SchemaStore>) -> Router {
    let cfg = config::config();
    let gateway = Arc::new(Gateway::new(
        Arc::new(auth::JwtVerifier),
        schema_store,
        Duration::from_secs(cfg.gateway.io_timeout_secs),
    ));
    app_with_gateway(gateway)
}

/// Build the router around a pre-assembled gateway. Tests use this to inject
/// spy stores or custom verifiers/timeouts.
pub fn app_with_gateway(gateway: Arc<Gateway>) -> Router {
    let state = AppState { gateway };

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/login", post(handlers::login::post))
        .route(
            "/api/schema",
            get(handlers::schema::get).put(handlers::schema::put),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config::config().security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router
}
