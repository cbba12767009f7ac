use axum::extract::Extension;
use serde_json::Value;

use crate::config;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::model::{CreateNote, Note};
use crate::store::{SharedStore, StoreAction, StoreError, StoreParams};

/// POST /api/notes - Create a note owned by the calling user.
///
/// One persistence attempt per invocation, no retries. Malformed bodies and
/// missing claims terminate the request before any store traffic. The store
/// outcome is the single suspension point.
pub async fn create(
    Extension(store): Extension<SharedStore>,
    auth_user: Option<Extension<AuthUser>>,
    body: String,
) -> ApiResult<Value> {
    // Decode the raw body; structure problems are the client's error, not a
    // storage failure.
    let payload: CreateNote = serde_json::from_str(&body)
        .map_err(|e| ApiError::validation(format!("malformed request body: {}", e)))?;

    // Fail fast on a missing claim rather than persisting an ownerless note.
    let Some(Extension(auth_user)) = auth_user else {
        return Err(ApiError::unauthorized("missing identity claim"));
    };

    let note = Note::create(auth_user.sub, payload);
    tracing::debug!(note_id = %note.note_id, "persisting note");

    let item = serde_json::to_value(&note)
        .map_err(|e| StoreError::MalformedItem(e.to_string()))?;

    let collection = config::config().store.collection.as_str();
    let stored = store
        .call(StoreAction::Put, StoreParams::put_item(collection, item))
        .await?;

    Ok(ApiResponse::success(stored))
}
