use std::path::PathBuf;

use crate::{
    cover::CoverRenderer,
    download, error, success,
    types::{MediaItem, MediaType},
};

/// Renders one cover from a local artwork file, without database or network.
pub async fn cover(name: String, media_type: MediaType, art: PathBuf, artists: Option<String>) {
    let renderer = match CoverRenderer::from_config().await {
        Ok(r) => r,
        Err(e) => error!("Cannot prepare renderer: {}", e),
    };

    let item = MediaItem {
        id: name.clone(),
        artists: artists.unwrap_or_default(),
        name,
        media_type,
        image_url: None,
    };

    let result = tokio::task::spawn_blocking(move || {
        let image = download::load_artwork(&art)?;
        renderer.render_to_file(&item, &image)
    })
    .await;

    match result {
        Ok(Ok(path)) => success!("Saved cover to {}", path.display()),
        Ok(Err(e)) => error!("Failed to render cover: {}", e),
        Err(e) => error!("Render task failed: {}", e),
    }
}
