pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod id;
pub mod middleware;
pub mod model;
pub mod store;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    middleware as mw,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use store::SharedStore;

/// Build the router around an already-constructed store. The store is the
/// one explicit dependency; tests substitute their own implementation.
pub fn app(store: SharedStore) -> Router {
    let config = config::config();

    let protected = Router::new()
        .route("/api/notes", post(handlers::notes::create))
        .layer(mw::from_fn(middleware::jwt_auth_middleware));

    let mut app = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(protected)
        // Global middleware
        .layer(Extension(store))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    // Preflight handling; the response envelope itself always carries the
    // fixed CORS pair regardless of this layer.
    if config.security.enable_cors {
        app = app.layer(CorsLayer::permissive());
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    app
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Jot API",
        "version": version,
        "description": "Multi-tenant note creation API",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "notes": "POST /api/notes (protected)",
        }
    }))
}

async fn health(Extension(store): Extension<SharedStore>) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match store.ping().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "store_error": e.to_string()
            })),
        ),
    }
}
