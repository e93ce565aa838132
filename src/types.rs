use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Artist {
    /// Largest image Spotify returns is listed first.
    pub fn image_url(&self) -> Option<String> {
        self.images.first().map(|i| i.url.clone())
    }
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsContainer {
    pub items: Vec<Artist>,
    pub next: Option<String>,
    pub cursors: Option<Cursors>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
}

/// Kind of media a cover is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Playlist,
    Album,
    Artist,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Playlist => "PLAYLIST",
            MediaType::Album => "ALBUM",
            MediaType::Artist => "ARTIST",
        }
    }

    /// Subfolder of the output directory holding covers of this type.
    pub fn folder(&self) -> &'static str {
        match self {
            MediaType::Playlist => "playlists",
            MediaType::Album => "albums",
            MediaType::Artist => "artists",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "playlist" | "playlists" => Ok(MediaType::Playlist),
            "album" | "albums" => Ok(MediaType::Album),
            "artist" | "artists" => Ok(MediaType::Artist),
            other => Err(format!(
                "unknown media type '{other}', expected playlist, album or artist"
            )),
        }
    }
}

/// One playlist, album or artist to render a cover for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub name: String,
    pub media_type: MediaType,
    /// Comma-joined artist names; empty when unknown.
    pub artists: String,
    pub image_url: Option<String>,
}

impl From<Artist> for MediaItem {
    fn from(artist: Artist) -> Self {
        let image_url = artist.image_url();
        MediaItem {
            id: artist.id,
            artists: artist.name.clone(),
            name: artist.name,
            media_type: MediaType::Artist,
            image_url,
        }
    }
}

#[derive(Tabled)]
pub struct RenderTableRow {
    pub kind: String,
    pub name: String,
    pub result: String,
}
