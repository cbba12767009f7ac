use std::sync::Arc;

use jot_api::config;
use jot_api::store::{PgStore, SharedStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Jot API in {:?} mode", config.environment);

    // The store is built exactly once here and passed into the router.
    let store = PgStore::connect(&config.store).await?;
    store.ensure_collection(&config.store.collection).await?;
    let store: SharedStore = Arc::new(store);

    let app = jot_api::app(store);

    // Allow tests or deployments to override port via env
    let port = std::env::var("JOT_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Jot API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
