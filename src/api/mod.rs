//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that completes the
//! Spotify OAuth 2.0 PKCE flow.
//!
//! - [`callback`] - Receives the authorization code from Spotify, exchanges it
//!   for a token and hands the token to the waiting `auth` command through
//!   shared state.
//! - [`health`] - Reports status, version and whether an authorization is
//!   idle, pending or complete.
//!
//! Both handlers read the shared PKCE state through an `Extension` layer; see
//! `server::router`.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
