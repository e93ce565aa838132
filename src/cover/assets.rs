use std::path::Path;

use image::{DynamicImage, GrayImage, RgbaImage, imageops::FilterType};

use super::CoverError;

pub const TEXTURE_FILE: &str = "texture.png";
pub const OVERLAY_FILE: &str = "overlay.png";

/// Optional decoration images read once per run.
///
/// - `texture.png`: grayscale texture, colorized with the vibrant color and
///   used as the spine background.
/// - `overlay.png`: RGBA image composited over the finished canvas, stretched
///   to the canvas size when it differs.
#[derive(Debug, Clone, Default)]
pub struct CoverAssets {
    pub texture: Option<GrayImage>,
    pub overlay: Option<RgbaImage>,
}

impl CoverAssets {
    /// Loads whichever asset files exist in `dir`. No folder means no assets.
    pub async fn load(dir: Option<&Path>) -> Result<Self, CoverError> {
        let Some(dir) = dir else {
            return Ok(Self::default());
        };

        let texture = read_image(&dir.join(TEXTURE_FILE))
            .await?
            .map(|image| image.to_luma8());
        let overlay = read_image(&dir.join(OVERLAY_FILE))
            .await?
            .map(|image| image.to_rgba8());

        Ok(Self { texture, overlay })
    }

    /// Texture scaled to exactly `width` x `height`.
    pub fn texture_sized(&self, width: u32, height: u32) -> Option<GrayImage> {
        self.texture.as_ref().map(|t| {
            if t.dimensions() == (width, height) {
                t.clone()
            } else {
                image::imageops::resize(t, width, height, FilterType::Triangle)
            }
        })
    }

    /// Overlay scaled to exactly `width` x `height`.
    pub fn overlay_sized(&self, width: u32, height: u32) -> Option<RgbaImage> {
        self.overlay.as_ref().map(|o| {
            if o.dimensions() == (width, height) {
                o.clone()
            } else {
                image::imageops::resize(o, width, height, FilterType::Triangle)
            }
        })
    }
}

/// Decodes `path` when it is a file; a missing file is not an error.
async fn read_image(path: &Path) -> Result<Option<DynamicImage>, CoverError> {
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = async_fs::read(path).await?;
    Ok(Some(image::load_from_memory(&bytes)?))
}
