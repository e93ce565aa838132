use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{Artist, ArtistTableRow, MediaItem, MediaType};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Makes a media name safe to use as a file name on every platform.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let trimmed = cleaned.trim().trim_matches('.').trim();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn cover_file_name(name: &str) -> String {
    format!("{}_cover.png", sanitize_file_name(name))
}

pub fn remove_duplicate_artists(artists: &mut Vec<Artist>) {
    let mut seen_ids = std::collections::HashSet::new();
    artists.retain(|artist| seen_ids.insert(artist.id.clone()));
}

pub fn sort_artists_by_name(artists: &mut [Artist]) {
    artists.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}

pub fn filter_artists(artists: &mut Vec<Artist>, search: &str) {
    let term = search.to_lowercase();
    artists.retain(|a| a.name.to_lowercase().contains(&term));
}

pub fn artist_table_rows(artists: &[Artist]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .map(|a| ArtistTableRow {
            name: a.name.clone(),
            image: a.image_url().unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

/// Keeps only items of `media_type` (all items when `None`) and applies the
/// optional `limit`.
pub fn select_items(
    mut items: Vec<MediaItem>,
    media_type: Option<MediaType>,
    limit: Option<usize>,
) -> Vec<MediaItem> {
    if let Some(kind) = media_type {
        items.retain(|i| i.media_type == kind);
    }
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}
