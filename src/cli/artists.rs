use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tabled::Table;

use crate::{
    error, info,
    management::{FollowedArtistsManager, TokenManager},
    spotify, success,
    types::Artist,
    utils, warning,
};

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

pub(crate) async fn load_token() -> TokenManager {
    match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run wrapcover auth\n Error: {}",
                e
            );
        }
    }
}

/// Prints cached followed artists as a table, optionally filtered by a
/// case-insensitive name search.
pub async fn list_artists(search: Option<String>) {
    let mut artists = match FollowedArtistsManager::load().await {
        Ok(mgr) => mgr.into_artists(),
        Err(e) => {
            warning!(
                "Failed to load artists. Run wrapcover artists update first.\n Error: {}",
                e
            );
            return;
        }
    };

    utils::sort_artists_by_name(&mut artists);
    if let Some(term) = search {
        utils::filter_artists(&mut artists, &term);
    }

    if artists.is_empty() {
        info!("No artists found.");
        return;
    }

    println!("{}", Table::new(utils::artist_table_rows(&artists)));
    info!("{} artists", artists.len());
}

/// Re-reads every followed artist from Spotify and replaces the cache.
///
/// Without `force` the remote count is compared with the cache first and the
/// download is skipped when they match.
pub async fn update_artists(force: bool) {
    let client = Client::new();
    let mut token_mgr = load_token().await;

    let cached = FollowedArtistsManager::load()
        .await
        .map(|m| m.count())
        .unwrap_or(0);

    if !force {
        let pb = spinner("Fetching remote artists count...");
        let remote = spotify::artists::get_total_artist_count(&client, &mut token_mgr).await;
        pb.finish_and_clear();

        match remote {
            Ok(remote) if remote as usize == cached && cached > 0 => {
                success!("Nothing to update here.");
                return;
            }
            Ok(_) => {}
            Err(e) => warning!("Cannot read remote artist count: {}", e),
        }
    }

    match fetch_followed_artists(&client, &mut token_mgr).await {
        Ok(artists) => {
            let mgr = FollowedArtistsManager::new(Some(artists));
            if let Err(e) = mgr.persist().await {
                error!("Failed to cache artists. Err: {}", e);
            }
            success!("Fetched {} artists!", mgr.count());
        }
        Err(e) => error!("Failed to fetch artists: {}", e),
    }
}

pub(crate) async fn fetch_followed_artists(
    client: &Client,
    token_mgr: &mut TokenManager,
) -> Result<Vec<Artist>, reqwest::Error> {
    let pb = spinner("Fetching followed artists...");
    let result = spotify::artists::get_all_followed_artists(client, token_mgr, |total| {
        pb.set_message(format!("Fetched {} artists...", total));
    })
    .await;
    pb.finish_and_clear();
    result
}
