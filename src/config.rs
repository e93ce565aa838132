//! Configuration management for the cover generator.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, the catalog database, font
//! files and the output folder.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

/// Default folder (relative to the working directory) receiving rendered covers.
pub const DEFAULT_OUTPUT_DIR: &str = "covers";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `wrapcover/.env` in the platform-specific
/// local data directory. Variables already present in the process environment
/// are never overridden. A missing file is not an error, since every value
/// can also come from the environment itself.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/wrapcover/.env`
/// - macOS: `~/Library/Application Support/wrapcover/.env`
/// - Windows: `%LOCALAPPDATA%/wrapcover/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - The `.env` file exists but cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Location of the user's `.env` file.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("wrapcover/.env");
    path
}

fn required(key: &str) -> Result<String, String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{key} must be set")),
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the server address for the local OAuth callback server.
///
/// # Example
///
/// ```
/// let addr = server_addr()?; // e.g., "127.0.0.1:8888"
/// ```
pub fn server_addr() -> Result<String, String> {
    required("SERVER_ADDRESS")
}

/// Returns the Spotify API client ID for authentication.
pub fn spotify_client_id() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify OAuth redirect URI.
///
/// This must match the redirect URI registered in the Spotify application
/// settings, e.g. `http://127.0.0.1:8888/callback`.
pub fn spotify_redirect_uri() -> Result<String, String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Returns the Spotify API scope permissions.
///
/// Reading followed artists needs `user-follow-read`, which is also the
/// default when the variable is not set.
pub fn spotify_scope() -> String {
    optional("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| "user-follow-read".to_string())
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    optional("SPOTIFY_API_AUTH_URL")
        .unwrap_or_else(|| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL").unwrap_or_else(|| "https://api.spotify.com/v1".to_string())
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the connection string of the read-only catalog database.
///
/// # Example
///
/// ```
/// let url = database_url()?; // e.g., "sqlite:///home/me/music.db"
/// ```
pub fn database_url() -> Result<String, String> {
    required("DATABASE_URL")
}

/// Returns the folder receiving rendered covers.
pub fn output_dir() -> PathBuf {
    optional("COVER_OUTPUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

/// Returns the TrueType font used for names (medium weight).
pub fn font_medium() -> Result<PathBuf, String> {
    required("COVER_FONT_MEDIUM").map(PathBuf::from)
}

/// Returns the TrueType font used for labels and the spine (light weight).
pub fn font_light() -> Result<PathBuf, String> {
    required("COVER_FONT_LIGHT").map(PathBuf::from)
}

/// Returns the optional folder holding `texture.png` and `overlay.png`.
pub fn assets_dir() -> Option<PathBuf> {
    optional("COVER_ASSETS_DIR").map(PathBuf::from)
}
