// Storage Gateway: normalizes the backing document store into a uniform
// single-outcome call contract. Exactly one of resolved value / rejected
// error occurs per invocation; the adapter performs no retries, no timeout
// enforcement, and no validation of params.

pub mod postgres;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use postgres::PgStore;

/// Store operations the gateway can carry. The creation path only issues
/// `Put`; `Get` and `Query` keep the adapter shape open for read paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    Put,
    Get,
    Query,
}

impl fmt::Display for StoreAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreAction::Put => write!(f, "put"),
            StoreAction::Get => write!(f, "get"),
            StoreAction::Query => write!(f, "query"),
        }
    }
}

/// Input for a store call: a logical collection name and the operation's
/// payload (the full item for `Put`, a key or expression for read actions).
#[derive(Debug, Clone)]
pub struct StoreParams {
    pub collection: String,
    pub payload: Value,
}

impl StoreParams {
    pub fn put_item(collection: impl Into<String>, item: Value) -> Self {
        Self { collection: collection.into(), payload: item }
    }
}

/// Errors from the Storage Gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("unsupported store action: {0}")]
    UnsupportedAction(StoreAction),

    #[error("invalid collection name: {0}")]
    InvalidCollection(String),

    #[error("item has no usable key: {0}")]
    MalformedItem(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// The single-outcome call contract over the backing store. Implementations
/// resolve with the operation's value or reject with a `StoreError`; callers
/// never observe the store's native call shape.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn call(&self, action: StoreAction, params: StoreParams) -> Result<Value, StoreError>;

    /// Connectivity check for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Shared handle constructed once at startup and passed into the router.
pub type SharedStore = Arc<dyn DocumentStore>;
