use std::path::Path;

use image::{DynamicImage, ImageReader};
use reqwest::Client;
use tempfile::NamedTempFile;

use crate::{Res, cover::CoverError};

/// Downloads artwork into a temporary `.jpg` file that is deleted when the
/// returned handle is dropped. Non-success statuses are errors; there are no
/// retries.
pub async fn download_artwork(client: &Client, url: &str) -> Res<NamedTempFile> {
    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;

    let file = tempfile::Builder::new()
        .prefix("wrapcover-")
        .suffix(".jpg")
        .tempfile()?;
    async_fs::write(file.path(), &bytes).await?;
    Ok(file)
}

/// Decodes artwork, trusting the content over the file extension.
pub fn load_artwork(path: &Path) -> Result<DynamicImage, CoverError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
}
