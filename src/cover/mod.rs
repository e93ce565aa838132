//! # Cover Rendering Module
//!
//! Everything needed to turn one [`MediaItem`] and its artwork into a printable
//! wrap-around insert. The canvas is laid out left to right as back panel,
//! spine and front panel:
//!
//! ```text
//! 0            640  690           1330
//! +-------------+----+-------------+
//! |    back     | sp |    front    |  640
//! +-------------+----+-------------+
//! ```
//!
//! ## Submodules
//!
//! - [`color`] - HSV conversion, k-means clustering and vibrant color picking
//! - [`text`] - Font loading, text measurement, drawing and word wrapping
//! - [`paint`] - Low level pixel primitives (rectangles, blending, shadows)
//! - [`compose`] - Panel layout and the full cover composition
//! - [`assets`] - Optional texture and overlay images
//!
//! Rendering is synchronous and CPU bound; async callers run it on a blocking
//! thread (see `cli::render`).

pub mod assets;
pub mod color;
pub mod compose;
pub mod paint;
pub mod text;

use std::{
    fmt,
    path::{Path, PathBuf},
};

use image::{DynamicImage, RgbImage};

use crate::{config, types::MediaItem, utils};

pub use assets::CoverAssets;
pub use compose::render_cover;
pub use text::{CoverFonts, FontText, TextBox, TextRenderer};

#[derive(Debug)]
pub enum CoverError {
    IoError(std::io::Error),
    ImageError(image::ImageError),
    FontError(String),
    ConfigError(String),
    EmptyArtwork,
    MissingArtwork(String),
}

impl fmt::Display for CoverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoverError::IoError(e) => write!(f, "I/O error: {e}"),
            CoverError::ImageError(e) => write!(f, "image error: {e}"),
            CoverError::FontError(e) => write!(f, "font error: {e}"),
            CoverError::ConfigError(e) => write!(f, "configuration error: {e}"),
            CoverError::EmptyArtwork => f.write_str("artwork has no pixels"),
            CoverError::MissingArtwork(name) => write!(f, "no artwork URL for '{name}'"),
        }
    }
}

impl std::error::Error for CoverError {}

impl From<std::io::Error> for CoverError {
    fn from(err: std::io::Error) -> Self {
        CoverError::IoError(err)
    }
}

impl From<image::ImageError> for CoverError {
    fn from(err: image::ImageError) -> Self {
        CoverError::ImageError(err)
    }
}

/// Fonts, assets and output folder shared by every cover of a run.
pub struct CoverRenderer {
    fonts: CoverFonts,
    assets: CoverAssets,
    output_dir: PathBuf,
}

impl CoverRenderer {
    pub fn new(fonts: CoverFonts, assets: CoverAssets, output_dir: PathBuf) -> Self {
        Self {
            fonts,
            assets,
            output_dir,
        }
    }

    /// Builds a renderer from `COVER_FONT_*`, `COVER_ASSETS_DIR` and
    /// `COVER_OUTPUT_DIR`.
    pub async fn from_config() -> Result<Self, CoverError> {
        let medium = config::font_medium().map_err(CoverError::ConfigError)?;
        let light = config::font_light().map_err(CoverError::ConfigError)?;
        let fonts = CoverFonts::load(&medium, &light).await?;
        let assets = CoverAssets::load(config::assets_dir().as_deref()).await?;
        Ok(Self::new(fonts, assets, config::output_dir()))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn render(&self, item: &MediaItem, art: &DynamicImage) -> Result<RgbImage, CoverError> {
        render_cover(item, art, &self.fonts, &self.assets)
    }

    /// Renders the cover and writes it below the output folder.
    pub fn render_to_file(
        &self,
        item: &MediaItem,
        art: &DynamicImage,
    ) -> Result<PathBuf, CoverError> {
        let cover = self.render(item, art)?;
        save_cover(&cover, &self.output_dir, item)
    }
}

/// Saves a rendered cover as PNG in the per-type subfolder of `output_dir`,
/// creating folders as needed. Returns the written path.
pub fn save_cover(
    cover: &RgbImage,
    output_dir: &Path,
    item: &MediaItem,
) -> Result<PathBuf, CoverError> {
    let dir = output_dir.join(item.media_type.folder());
    std::fs::create_dir_all(&dir)?;

    let path = dir.join(utils::cover_file_name(&item.name));
    cover.save_with_format(&path, image::ImageFormat::Png)?;
    Ok(path)
}
