use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use wrapcover::db;
use wrapcover::types::MediaType;

const SCHEMA: &str = r#"
CREATE TABLE playlists (id INTEGER PRIMARY KEY, name TEXT NOT NULL, image_url TEXT);
CREATE TABLE playlist_artists (playlist_id INTEGER NOT NULL, artist_name TEXT NOT NULL);
CREATE TABLE albums (id INTEGER PRIMARY KEY, name TEXT NOT NULL, artists TEXT, image_url TEXT);
CREATE TABLE artists (id INTEGER PRIMARY KEY, name TEXT NOT NULL, image_url TEXT);

INSERT INTO playlists (id, name, image_url) VALUES
    (1, 'Road Trip', 'https://img.example/road.jpg'),
    (2, 'Focus', 'https://img.example/focus.jpg'),
    (3, 'Nobody Here', NULL);
INSERT INTO playlist_artists (playlist_id, artist_name) VALUES
    (1, 'Tom Petty'),
    (1, 'Fleetwood Mac'),
    (2, 'Nils Frahm');

INSERT INTO albums (id, name, artists, image_url) VALUES
    (10, 'Heroes', 'David Bowie', 'https://img.example/heroes.jpg'),
    (11, 'Blank Cover', NULL, '');

INSERT INTO artists (id, name, image_url) VALUES
    (20, 'Queen', 'https://img.example/queen.jpg');
"#;

// Helper creating an in-memory catalog; one connection keeps the database alive
async fn catalog() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();
    pool
}

#[tokio::test]
async fn test_fetch_playlists_joins_artists() {
    let pool = catalog().await;
    let playlists = db::fetch(&pool, MediaType::Playlist).await.unwrap();

    let names: Vec<&str> = playlists.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Focus", "Nobody Here", "Road Trip"]);

    let focus = &playlists[0];
    assert_eq!(focus.id, "2");
    assert_eq!(focus.media_type, MediaType::Playlist);
    assert_eq!(focus.artists, "Nils Frahm");
    assert_eq!(focus.image_url.as_deref(), Some("https://img.example/focus.jpg"));

    // no linked artists and no artwork
    let empty = &playlists[1];
    assert_eq!(empty.artists, "");
    assert_eq!(empty.image_url, None);

    let road_trip = &playlists[2];
    assert!(road_trip.artists.contains("Tom Petty"));
    assert!(road_trip.artists.contains("Fleetwood Mac"));
    assert!(road_trip.artists.contains(", "));
}

#[tokio::test]
async fn test_fetch_albums() {
    let pool = catalog().await;
    let albums = db::fetch(&pool, MediaType::Album).await.unwrap();

    assert_eq!(albums.len(), 2);
    assert_eq!(albums[0].name, "Blank Cover");
    assert_eq!(albums[0].artists, "");
    // empty URLs count as missing artwork
    assert_eq!(albums[0].image_url, None);

    assert_eq!(albums[1].id, "10");
    assert_eq!(albums[1].artists, "David Bowie");
}

#[tokio::test]
async fn test_fetch_artists() {
    let pool = catalog().await;
    let artists = db::fetch(&pool, MediaType::Artist).await.unwrap();

    assert_eq!(artists.len(), 1);
    assert_eq!(artists[0].name, "Queen");
    assert_eq!(artists[0].artists, "Queen");
    assert_eq!(artists[0].media_type, MediaType::Artist);
}

#[tokio::test]
async fn test_fetch_media_items_order_and_filter() {
    let pool = catalog().await;

    let all = db::fetch_media_items(&pool, None).await.unwrap();
    let kinds: Vec<MediaType> = all.iter().map(|i| i.media_type).collect();
    assert_eq!(
        kinds,
        vec![
            MediaType::Playlist,
            MediaType::Playlist,
            MediaType::Playlist,
            MediaType::Album,
            MediaType::Album,
            MediaType::Artist,
        ]
    );

    let albums = db::fetch_media_items(&pool, Some(MediaType::Album))
        .await
        .unwrap();
    assert_eq!(albums.len(), 2);
    assert!(albums.iter().all(|i| i.media_type == MediaType::Album));
}

#[tokio::test]
async fn test_fetch_fails_without_tables() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    assert!(db::fetch(&pool, MediaType::Playlist).await.is_err());
}

#[tokio::test]
async fn test_connect_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("missing.db").display());

    assert!(db::connect(&url).await.is_err());
}

#[tokio::test]
async fn test_connect_existing_database_is_read_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");

    let writer = SqlitePoolOptions::new()
        .connect_with(
            sqlx::sqlite::SqliteConnectOptions::new()
                .filename(&path)
                .create_if_missing(true),
        )
        .await
        .unwrap();
    sqlx::raw_sql(SCHEMA).execute(&writer).await.unwrap();
    writer.close().await;

    let pool = db::connect(&format!("sqlite://{}", path.display()))
        .await
        .unwrap();
    assert_eq!(db::fetch_media_items(&pool, None).await.unwrap().len(), 6);
    assert!(
        sqlx::query("DELETE FROM artists")
            .execute(&pool)
            .await
            .is_err()
    );
    pool.close().await;
}
