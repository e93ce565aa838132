use std::io::Cursor;

use axum::{Router, http::StatusCode, routing::get};
use image::{ImageFormat, Rgb, RgbImage};
use reqwest::Client;
use wrapcover::download::{download_artwork, load_artwork};

fn png_bytes() -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbImage::from_pixel(8, 8, Rgb([10, 200, 30]))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

// Helper serving artwork on an ephemeral local port
async fn artwork_server() -> String {
    let app = Router::new()
        .route("/art.jpg", get(|| async { png_bytes() }))
        .route("/missing.jpg", get(|| async { StatusCode::NOT_FOUND }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_download_artwork_to_temp_file() {
    let base = artwork_server().await;
    let client = Client::new();

    let file = download_artwork(&client, &format!("{}/art.jpg", base))
        .await
        .unwrap();
    let path = file.path().to_path_buf();

    assert!(path.extension().is_some_and(|ext| ext == "jpg"));
    assert_eq!(std::fs::read(&path).unwrap(), png_bytes());

    // decoding goes by content, not by the .jpg suffix
    let image = load_artwork(&path).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (8, 8));
    assert_eq!(image.get_pixel(4, 4), &Rgb([10, 200, 30]));

    // the temp file goes away with its handle
    drop(file);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_download_artwork_http_error() {
    let base = artwork_server().await;
    let client = Client::new();

    let result = download_artwork(&client, &format!("{}/missing.jpg", base)).await;
    assert!(result.is_err());
}

#[test]
fn test_load_artwork_rejects_garbage() {
    let file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    std::fs::write(file.path(), b"definitely not an image").unwrap();

    assert!(load_artwork(file.path()).is_err());
    assert!(load_artwork(std::path::Path::new("/nonexistent/art.jpg")).is_err());
}
