mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn oversized_body_is_rejected_before_the_handler() -> Result<()> {
    // Must be set before the config singleton initializes; this file is its
    // own test binary, so the override is isolated here.
    std::env::set_var("API_MAX_REQUEST_SIZE_BYTES", "64");
    common::init();

    let store = common::MockStore::new();
    let token = common::bearer_token("u-limit");

    let content = "x".repeat(256);
    let body = format!(r#"{{"content":"{}"}}"#, content);
    let (status, _, _) =
        common::post_note_raw(common::app_with(&store), Some(&token), &body).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(store.call_count(), 0, "capped requests must not reach the store");

    Ok(())
}

#[tokio::test]
async fn small_bodies_pass_under_the_cap() -> Result<()> {
    std::env::set_var("API_MAX_REQUEST_SIZE_BYTES", "64");
    common::init();

    let store = common::MockStore::new();
    let token = common::bearer_token("u-8");

    let (status, _, body) =
        common::post_note(common::app_with(&store), Some(&token), r#"{"content":"ok"}"#).await;

    assert_eq!(status, StatusCode::OK, "got {}: {}", status, body);
    assert_eq!(store.call_count(), 1);

    Ok(())
}
