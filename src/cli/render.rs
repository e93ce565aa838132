use std::{path::PathBuf, sync::Arc};

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tabled::Table;

use crate::{
    Res,
    cli::artists::{fetch_followed_artists, load_token},
    config,
    cover::{CoverError, CoverRenderer},
    db, download, error, info,
    management::FollowedArtistsManager,
    success,
    types::{MediaItem, MediaType, RenderTableRow},
    utils, warning,
};

/// Where the media items of a run come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Source {
    /// The local catalog database
    Db,
    /// Artists followed on Spotify
    Spotify,
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb
}

async fn items_from_db(filter: Option<MediaType>) -> Vec<MediaItem> {
    let url = match config::database_url() {
        Ok(url) => url,
        Err(e) => error!("{}", e),
    };

    let pool = match db::connect(&url).await {
        Ok(pool) => pool,
        Err(e) => error!("Cannot connect to database: {}", e),
    };

    let items = match db::fetch_media_items(&pool, filter).await {
        Ok(items) => items,
        Err(e) => {
            pool.close().await;
            error!("Cannot read media items: {}", e);
        }
    };

    pool.close().await;
    items
}

async fn items_from_spotify(client: &Client, refresh: bool) -> Vec<MediaItem> {
    let cached = if refresh {
        None
    } else {
        FollowedArtistsManager::load().await.ok()
    };

    let artists = match cached {
        Some(mgr) if mgr.count() > 0 => mgr.into_artists(),
        _ => {
            let mut token_mgr = load_token().await;
            match fetch_followed_artists(client, &mut token_mgr).await {
                Ok(artists) => {
                    let mgr = FollowedArtistsManager::new(Some(artists));
                    if let Err(e) = mgr.persist().await {
                        warning!("Failed to cache artists. Err: {}", e);
                    }
                    mgr.into_artists()
                }
                Err(e) => error!("Failed to fetch followed artists: {}", e),
            }
        }
    };

    artists.into_iter().map(MediaItem::from).collect()
}

/// Downloads the artwork of one item and renders its cover on a blocking
/// thread. The temporary artwork file is removed before returning.
pub async fn render_item(
    client: &Client,
    renderer: Arc<CoverRenderer>,
    item: &MediaItem,
) -> Res<PathBuf> {
    let url = item
        .image_url
        .as_deref()
        .ok_or_else(|| CoverError::MissingArtwork(item.name.clone()))?;

    let artwork = download::download_artwork(client, url).await?;
    let owned = item.clone();
    let path = tokio::task::spawn_blocking(move || -> Result<PathBuf, CoverError> {
        let art = download::load_artwork(artwork.path())?;
        renderer.render_to_file(&owned, &art)
    })
    .await??;

    Ok(path)
}

/// Renders a cover for every selected item, one after the other. Failures
/// are reported and skipped; setup failures (database, fonts) end the run.
pub async fn render(
    source: Source,
    media_type: Option<MediaType>,
    limit: Option<usize>,
    refresh: bool,
) {
    let renderer = match CoverRenderer::from_config().await {
        Ok(r) => Arc::new(r),
        Err(e) => error!("Cannot prepare renderer: {}", e),
    };

    let client = Client::new();
    let items = match source {
        Source::Db => items_from_db(media_type).await,
        Source::Spotify => items_from_spotify(&client, refresh).await,
    };
    let items = utils::select_items(items, media_type, limit);

    if items.is_empty() {
        info!("Nothing to render.");
        return;
    }

    info!(
        "Rendering {} covers into {}",
        items.len(),
        renderer.output_dir().display()
    );

    let pb = progress_bar(items.len());
    let mut rows: Vec<RenderTableRow> = Vec::new();
    let mut failed = 0usize;

    for item in &items {
        pb.set_message(item.name.clone());
        let result = match render_item(&client, Arc::clone(&renderer), item).await {
            Ok(path) => path.display().to_string(),
            Err(e) => {
                failed += 1;
                pb.suspend(|| warning!("Skipping {} '{}': {}", item.media_type, item.name, e));
                format!("failed: {e}")
            }
        };
        rows.push(RenderTableRow {
            kind: item.media_type.to_string(),
            name: item.name.clone(),
            result,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!("{}", Table::new(rows));
    if failed == 0 {
        success!("Rendered {} covers.", items.len());
    } else {
        warning!(
            "Rendered {} of {} covers, {} failed.",
            items.len() - failed,
            items.len(),
            failed
        );
    }
}
