use std::sync::Arc;

use anyhow::Context;

use static_press_api::store::{FileStore, MemoryStore, SchemaStore};
use static_press_api::{app, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up JWT_SECRET, SCHEMA_STORE_PATH, etc.
    let _ = dotenvy::dotenv();

    let config = config::config();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "static_press_api=info,tower_http=info".into()),
        )
        .init();

    tracing::info!(environment = ?config.environment, "starting static-press API");

    let schema_store: Arc<dyn SchemaStore> = match config.store.backend.as_str() {
        "memory" => Arc::new(MemoryStore::new()),
        _ => Arc::new(FileStore::new(&config.store.schema_path)),
    };

    let app = app(schema_store);

    // Allow tests or deployments to override port via env
    let port = std::env::var("STATIC_PRESS_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("static-press API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
