//! Read-only access to the local media catalog.
//!
//! Three tables are read; only playlists need a join to collect their artists:
//!
//! ```text
//! playlists(id, name, image_url)
//! playlist_artists(playlist_id, artist_name)
//! albums(id, name, artists, image_url)     -- artists is comma-joined
//! artists(id, name, image_url)
//! ```

use std::str::FromStr;

use sqlx::{
    FromRow, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::types::{MediaItem, MediaType};

pub const PLAYLISTS_QUERY: &str = r#"
SELECT CAST(p.id AS TEXT) AS id,
       p.name AS name,
       COALESCE(GROUP_CONCAT(pa.artist_name, ', '), '') AS artists,
       p.image_url AS image_url
FROM playlists p
LEFT JOIN playlist_artists pa ON pa.playlist_id = p.id
GROUP BY p.id, p.name, p.image_url
ORDER BY p.name
"#;

pub const ALBUMS_QUERY: &str = r#"
SELECT CAST(id AS TEXT) AS id,
       name,
       COALESCE(artists, '') AS artists,
       image_url
FROM albums
ORDER BY name
"#;

pub const ARTISTS_QUERY: &str = r#"
SELECT CAST(id AS TEXT) AS id,
       name,
       name AS artists,
       image_url
FROM artists
ORDER BY name
"#;

#[derive(Debug, FromRow)]
struct MediaRow {
    id: String,
    name: String,
    artists: String,
    image_url: Option<String>,
}

impl MediaRow {
    fn into_item(self, media_type: MediaType) -> MediaItem {
        MediaItem {
            id: self.id,
            name: self.name,
            media_type,
            artists: self.artists,
            image_url: self.image_url.filter(|u| !u.trim().is_empty()),
        }
    }
}

/// Opens a single read-only connection to the catalog.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
}

pub async fn fetch(
    pool: &SqlitePool,
    media_type: MediaType,
) -> Result<Vec<MediaItem>, sqlx::Error> {
    let query = match media_type {
        MediaType::Playlist => PLAYLISTS_QUERY,
        MediaType::Album => ALBUMS_QUERY,
        MediaType::Artist => ARTISTS_QUERY,
    };

    let rows: Vec<MediaRow> = sqlx::query_as(query).fetch_all(pool).await?;
    Ok(rows.into_iter().map(|r| r.into_item(media_type)).collect())
}

/// Playlists, then albums, then artists; or just one kind when filtered.
pub async fn fetch_media_items(
    pool: &SqlitePool,
    filter: Option<MediaType>,
) -> Result<Vec<MediaItem>, sqlx::Error> {
    let kinds = match filter {
        Some(kind) => vec![kind],
        None => vec![MediaType::Playlist, MediaType::Album, MediaType::Artist],
    };

    let mut items = Vec::new();
    for kind in kinds {
        items.extend(fetch(pool, kind).await?);
    }
    Ok(items)
}
