//! # CLI Module
//!
//! User-facing commands. Each command coordinates configuration, the data
//! sources (catalog database or Spotify), the cover renderer and console
//! feedback.
//!
//! ## Commands
//!
//! - [`auth`] - Spotify OAuth authentication with PKCE
//! - [`list_artists`] / [`update_artists`] - Followed-artist cache
//! - [`render`] - Covers for every item of a source
//! - [`cover`] - One cover from a local artwork file
//!
//! ## Error Handling
//!
//! Setup problems (no database, missing fonts, no token) end the program
//! through `error!`. Problems with a single media item are printed with
//! `warning!` and the run moves on to the next item.
//!
//! ## Usage
//!
//! ```bash
//! wrapcover render                         # every playlist, album and artist in the catalog
//! wrapcover render --type album --limit 5  # first five albums
//! wrapcover auth && wrapcover render --source spotify
//! wrapcover cover --name Gloria --type playlist --art ./playlist_cover_10.jpg
//! ```

mod artists;
mod auth;
mod cover;
mod render;

pub use artists::list_artists;
pub use artists::update_artists;
pub use auth::auth;
pub use cover::cover;
pub use render::{Source, render, render_item};
