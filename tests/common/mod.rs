use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use jot_api::auth::{generate_jwt, Claims};
use jot_api::store::{DocumentStore, SharedStore, StoreAction, StoreError, StoreParams};

/// Must run before anything touches the config singleton.
pub fn init() {
    std::env::set_var("JWT_SECRET", "test-secret");
}

/// Substitutable store: counts calls, records what was asked of it, and
/// rejects on demand.
pub struct MockStore {
    pub calls: AtomicUsize,
    pub fail: AtomicBool,
    pub recorded: Mutex<Vec<(StoreAction, StoreParams)>>,
}

impl MockStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            recorded: Mutex::new(Vec::new()),
        })
    }

    pub fn rejecting() -> Arc<Self> {
        let store = Self::new();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DocumentStore for MockStore {
    async fn call(&self, action: StoreAction, params: StoreParams) -> Result<Value, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded
            .lock()
            .unwrap()
            .push((action, params.clone()));

        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::MalformedItem(
                "simulated store rejection: internal detail".to_string(),
            ));
        }
        Ok(params.payload)
    }
}

pub fn app_with(store: &Arc<MockStore>) -> Router {
    jot_api::app(store.clone() as SharedStore)
}

pub fn bearer_token(sub: &str) -> String {
    generate_jwt(Claims::new(sub.to_string())).expect("token generation")
}

/// Drive one POST /api/notes through the router, returning the raw body.
pub async fn post_note_raw(
    app: Router,
    token: Option<&str>,
    body: &str,
) -> (StatusCode, HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().uri("/api/notes").method("POST");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = builder.body(Body::from(body.to_string())).expect("request");

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body bytes");

    (status, headers, bytes.to_vec())
}

/// As `post_note_raw`, with the body decoded as JSON.
pub async fn post_note(
    app: Router,
    token: Option<&str>,
    body: &str,
) -> (StatusCode, HeaderMap, Value) {
    let (status, headers, bytes) = post_note_raw(app, token, body).await;
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, headers, value)
}
