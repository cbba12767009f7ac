use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::id;

/// Decoded request body for note creation.
///
/// `content` must be present (a body without it is a validation error);
/// an empty string is accepted. `attachment` is an optional opaque
/// reference (e.g. a file key) and passes through as-is with no default
/// substituted for an absent value.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNote {
    pub content: String,
    #[serde(default)]
    pub attachment: Option<String>,
}

/// The persisted note record. Wire names are camelCase to match the
/// stored document and response body shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Owning tenant, taken verbatim from the verified claim subject.
    pub user_id: String,
    /// System-generated unique identifier, assigned exactly once.
    pub note_id: String,
    pub content: String,
    pub attachment: Option<String>,
    /// Milliseconds since epoch, stamped at write time.
    pub created_at: i64,
}

impl Note {
    /// Build the record to persist: claim subject in, fresh identifier,
    /// wall-clock timestamp. The caller never supplies any of these.
    pub fn create(user_id: impl Into<String>, body: CreateNote) -> Self {
        Self {
            user_id: user_id.into(),
            note_id: id::generate(),
            content: body.content,
            attachment: body.attachment,
            created_at: Utc::now().timestamp_millis(),
        }
    }
}
