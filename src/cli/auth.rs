use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{info, spotify, types::PkceToken};

/// Authorizes wrapcover to read the artists the user follows.
pub async fn auth() {
    let shared_state: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
    info!("Waiting for Spotify authorization (60s)...");
    spotify::auth::auth(shared_state).await;
}
