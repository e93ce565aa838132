use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    management::TokenManager,
    types::{Artist, FollowedArtistsResponse},
};

/// Largest page the followed-artists endpoint accepts.
pub const PAGE_LIMIT: u64 = 50;

async fn get_following(
    client: &Client,
    token: &str,
    api_url: &str,
) -> Result<FollowedArtistsResponse, reqwest::Error> {
    loop {
        let response = client.get(api_url).bearer_auth(token).send().await?;

        let response = match response.error_for_status() {
            Ok(valid_response) => valid_response,
            Err(err) => {
                if err.status() == Some(StatusCode::BAD_GATEWAY) {
                    sleep(Duration::from_secs(10)).await;
                    continue; // retry
                }
                return Err(err);
            }
        };

        return response.json::<FollowedArtistsResponse>().await;
    }
}

/// Retrieves one page of followed artists from the Spotify Web API.
///
/// Pagination is cursor based: pass the returned cursor as `after` to get the
/// next page. A `None` cursor means the last page was reached.
///
/// 502 Bad Gateway responses are retried after 10 seconds; other errors are
/// returned immediately.
///
/// # Example
///
/// ```
/// let (artists, next_cursor) = get_followed_artists(&client, token, 50, None).await?;
/// if let Some(cursor) = next_cursor {
///     let (more_artists, _) = get_followed_artists(&client, token, 50, Some(cursor)).await?;
/// }
/// ```
pub async fn get_followed_artists(
    client: &Client,
    token: &str,
    limit: u64,
    after: Option<String>,
) -> Result<(Vec<Artist>, Option<String>), reqwest::Error> {
    let mut api_url = format!(
        "{uri}/me/following?type=artist&limit={limit}",
        uri = crate::config::spotify_apiurl(),
        limit = limit.clamp(1, PAGE_LIMIT)
    );
    if let Some(after_val) = &after {
        api_url.push_str(&format!("&after={}", after_val));
    }

    let res = get_following(client, token, &api_url).await?;
    let next_after = if res.artists.next.is_some() {
        res.artists.cursors.and_then(|c| c.after)
    } else {
        None
    };

    Ok((res.artists.items, next_after))
}

/// Total number of followed artists, read from a single-item page.
pub async fn get_total_artist_count(
    client: &Client,
    token_mgr: &mut TokenManager,
) -> Result<u64, reqwest::Error> {
    let token = token_mgr.get_valid_token().await;
    let api_url = format!(
        "{uri}/me/following?type=artist&limit=1",
        uri = crate::config::spotify_apiurl()
    );

    let res = get_following(client, &token, &api_url).await?;
    Ok(res.artists.total.unwrap_or(0))
}

/// Walks every page of followed artists. `on_page` is told the running total
/// after each page.
pub async fn get_all_followed_artists(
    client: &Client,
    token_mgr: &mut TokenManager,
    mut on_page: impl FnMut(usize),
) -> Result<Vec<Artist>, reqwest::Error> {
    let mut all_artists: Vec<Artist> = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let token = token_mgr.get_valid_token().await;
        let (artists, next_after) = get_followed_artists(client, &token, PAGE_LIMIT, after).await?;
        if artists.is_empty() {
            break;
        }

        all_artists.extend(artists);
        on_page(all_artists.len());

        after = next_after;
        if after.is_none() {
            break;
        }
    }

    Ok(all_artists)
}
