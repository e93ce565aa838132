//! Text measurement, drawing and wrapping.
//!
//! Text is positioned by its origin: the left edge of the pen and the top of
//! the line box (the font's ascender). [`TextBox`] coordinates are relative to
//! that origin, so the visible ink of `text` drawn at (x, y) covers
//! `x + left .. x + right` by `y + top .. y + bottom`.

use std::path::Path;

use fontdue::{
    Font, FontSettings,
    layout::{CoordinateSystem, GlyphPosition, Layout, LayoutSettings, TextStyle},
};
use image::{Rgb, RgbaImage};

use super::{CoverError, paint};

/// Ink bounds of a piece of text, relative to the text origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBox {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl TextBox {
    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }
}

/// Something that can measure and draw a line of text at a pixel size.
pub trait TextRenderer {
    fn measure(&self, text: &str, size: f32) -> TextBox;

    fn draw(&self, canvas: &mut RgbaImage, x: i64, y: i64, text: &str, size: f32, color: Rgb<u8>);
}

/// A TrueType font rasterized with fontdue.
pub struct FontText {
    font: Font,
}

impl FontText {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, CoverError> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| CoverError::FontError(e.to_string()))?;
        Ok(Self { font })
    }

    pub async fn load(path: &Path) -> Result<Self, CoverError> {
        let bytes = async_fs::read(path).await.map_err(|e| {
            CoverError::FontError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_bytes(bytes)
    }

    fn layout(&self, text: &str, size: f32) -> Vec<GlyphPosition> {
        let mut layout: Layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(std::slice::from_ref(&self.font), &TextStyle::new(text, size, 0));
        layout.glyphs().clone()
    }
}

impl TextRenderer for FontText {
    fn measure(&self, text: &str, size: f32) -> TextBox {
        self.layout(text, size)
            .iter()
            .filter(|g| g.width > 0 && g.height > 0)
            .map(|g| TextBox {
                left: g.x.floor() as i64,
                top: g.y.floor() as i64,
                right: g.x.floor() as i64 + g.width as i64,
                bottom: g.y.floor() as i64 + g.height as i64,
            })
            .reduce(|a, b| TextBox {
                left: a.left.min(b.left),
                top: a.top.min(b.top),
                right: a.right.max(b.right),
                bottom: a.bottom.max(b.bottom),
            })
            .unwrap_or_default()
    }

    fn draw(&self, canvas: &mut RgbaImage, x: i64, y: i64, text: &str, size: f32, color: Rgb<u8>) {
        for glyph in self.layout(text, size) {
            if glyph.width == 0 || glyph.height == 0 {
                continue;
            }

            let (metrics, coverage) = self.font.rasterize_config(glyph.key);
            let gx = x + glyph.x.floor() as i64;
            let gy = y + glyph.y.floor() as i64;
            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let alpha = coverage[row * metrics.width + col];
                    paint::blend_pixel(canvas, gx + col as i64, gy + row as i64, color, alpha);
                }
            }
        }
    }
}

/// The two weights every cover uses.
pub struct CoverFonts {
    pub medium: Box<dyn TextRenderer + Send + Sync>,
    pub light: Box<dyn TextRenderer + Send + Sync>,
}

impl CoverFonts {
    pub fn new(
        medium: Box<dyn TextRenderer + Send + Sync>,
        light: Box<dyn TextRenderer + Send + Sync>,
    ) -> Self {
        Self { medium, light }
    }

    pub async fn load(medium: &Path, light: &Path) -> Result<Self, CoverError> {
        Ok(Self::new(
            Box::new(FontText::load(medium).await?),
            Box::new(FontText::load(light).await?),
        ))
    }
}

/// Greedy word wrap into at most `max_lines` lines whose ink ends before
/// `max_width`. Words that do not fit on the last permitted line are appended
/// to it anyway so nothing is lost.
pub fn wrap_lines(
    renderer: &dyn TextRenderer,
    text: &str,
    size: f32,
    max_width: i64,
    max_lines: usize,
) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        let last_line = lines.len() + 1 >= max_lines.max(1);
        if renderer.measure(&candidate, size).right <= max_width || last_line {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
