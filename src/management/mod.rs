mod artist;
mod auth;

pub use artist::FollowedArtistsManager;
pub use auth::TokenManager;
