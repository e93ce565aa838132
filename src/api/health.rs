use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use crate::types::PkceToken;

/// Reports the server version and how far the running authorization got:
/// `idle` before a verifier exists, `pending` while waiting for Spotify and
/// `complete` once the callback stored a token.
pub async fn health(
    Extension(shared_state): Extension<Arc<Mutex<Option<PkceToken>>>>,
) -> Json<Value> {
    let authorization = match shared_state.lock().await.as_ref() {
        None => "idle",
        Some(PkceToken { token: None, .. }) => "pending",
        Some(PkceToken { token: Some(_), .. }) => "complete",
    };

    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "authorization": authorization
    }))
}
