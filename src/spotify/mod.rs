//! # Spotify Integration Module
//!
//! The Spotify Web API is an alternative source of media items: every artist
//! the user follows can get an ARTIST cover rendered from its profile image.
//!
//! ## Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow: verifier/challenge, local callback server,
//!   browser launch, code exchange and token refresh
//! - [`artists`] - Followed artists with cursor pagination and 502 retries
//!
//! ## API Coverage
//!
//! - `GET /me/following?type=artist` - followed artists, paginated by `after`
//! - `POST /api/token` - code exchange and refresh
//!
//! Only the `user-follow-read` scope is needed.
//!
//! ## Usage
//!
//! ```rust
//! let mut token_mgr = TokenManager::load().await?;
//! let client = reqwest::Client::new();
//! let artists = spotify::artists::get_all_followed_artists(&client, &mut token_mgr, |n| {
//!     println!("{n} artists so far");
//! })
//! .await?;
//! ```

pub mod artists;
pub mod auth;
