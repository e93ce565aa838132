use std::path::PathBuf;

use crate::{types::Artist, utils};

/// JSON cache of the artists the user follows on Spotify.
pub struct FollowedArtistsManager {
    artists: Vec<Artist>,
}

impl FollowedArtistsManager {
    pub fn new(artists: Option<Vec<Artist>>) -> Self {
        let mut artists = artists.unwrap_or_default();
        utils::remove_duplicate_artists(&mut artists);
        Self { artists }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::cache_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let artists: Vec<Artist> = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self::new(Some(artists)))
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::cache_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.artists).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    pub fn count(&self) -> usize {
        self.artists.len()
    }

    pub fn into_artists(self) -> Vec<Artist> {
        self.artists
    }

    fn cache_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("wrapcover/cache/followed-artists.json");
        path
    }
}
