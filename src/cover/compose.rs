//! Panel layout and cover composition.
//!
//! Each panel is drawn into its own image and then placed on the 1330x640
//! canvas, so nothing drawn for one panel can reach another. Positions inside
//! a panel are relative to that panel's top-left corner.

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage, imageops, imageops::FilterType};

use super::{
    CoverAssets, CoverError, CoverFonts,
    color::{text_color_for, vibrant_color},
    paint::{self, Rect},
    text::{TextRenderer, wrap_lines},
};
use crate::types::{MediaItem, MediaType};

pub const PANEL_SIZE: u32 = 640;
pub const SPINE_WIDTH: u32 = 50;
pub const CANVAS_WIDTH: u32 = PANEL_SIZE * 2 + SPINE_WIDTH;
pub const CANVAS_HEIGHT: u32 = PANEL_SIZE;

pub const BACK_X: i64 = 0;
pub const SPINE_X: i64 = PANEL_SIZE as i64;
pub const FRONT_X: i64 = (PANEL_SIZE + SPINE_WIDTH) as i64;

pub const FRONT_NAME_SIZE: f32 = 40.0;
pub const FRONT_NAME_MIN_SIZE: f32 = 20.0;
pub const FRONT_NAME_MAX_WIDTH: i64 = 560;
pub const FRONT_BOX_PADDING: i64 = 10;
pub const FRONT_BOX_BORDER: i64 = 2;
pub const SHADOW_OFFSET: i64 = 6;
pub const SHADOW_SIGMA: f32 = 4.0;

pub const SPINE_TEXT_SIZE: f32 = 40.0;
pub const SPINE_TEXT_INDENT: i64 = 50;

pub const BACK_BLUR_SIGMA: f32 = 15.0;
pub const BACK_ART_OPACITY: u8 = 128;
pub const BACK_TEXT_SIZE: f32 = 60.0;
pub const BACK_MARGIN: i64 = 30;
pub const BACK_TYPE_Y: i64 = 10;
pub const BACK_DIVIDER_GAP: i64 = 25;
pub const BACK_DIVIDER_INSET: i64 = 7;
pub const BACK_NAME_MAX_RIGHT: i64 = 600;
pub const BACK_NAME_LINE_HEIGHT: i64 = 60;
pub const BACK_ARTISTS_SIZE: f32 = 28.0;
pub const BACK_ARTISTS_LINE_HEIGHT: i64 = 34;
pub const BACK_ARTISTS_MAX_LINES: usize = 3;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Where the front-panel name goes and how large it is drawn, relative to
/// the front panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontLabel {
    pub size: f32,
    /// Text origin to draw at.
    pub x: i64,
    pub y: i64,
    /// Colored box behind the text, without border.
    pub background: Rect,
}

/// Centers the name's ink inside the front panel, stepping the font size
/// down until the text fits `FRONT_NAME_MAX_WIDTH`. Names still too wide at
/// `FRONT_NAME_MIN_SIZE` are cut at the panel edges.
pub fn front_label(font: &dyn TextRenderer, name: &str) -> FrontLabel {
    let mut size = FRONT_NAME_SIZE;
    let mut ink = font.measure(name, size);
    while ink.width() > FRONT_NAME_MAX_WIDTH && size > FRONT_NAME_MIN_SIZE {
        size -= 2.0;
        ink = font.measure(name, size);
    }

    let panel = PANEL_SIZE as i64;
    let ink_x = (panel - ink.width()) / 2;
    let ink_y = (panel - ink.height()) / 2;

    FrontLabel {
        size,
        x: ink_x - ink.left,
        y: ink_y - ink.top,
        background: Rect::new(ink_x, ink_y, ink_x + ink.width(), ink_y + ink.height())
            .inflate(FRONT_BOX_PADDING),
    }
}

pub fn spine_label(item: &MediaItem) -> String {
    format!("{}   •   {}", item.media_type, item.name)
}

/// Splits the back-panel name over two lines once it would run past
/// `BACK_NAME_MAX_RIGHT`.
pub fn back_name_lines(font: &dyn TextRenderer, name: &str) -> Vec<String> {
    if font.measure(name, BACK_TEXT_SIZE).right < BACK_NAME_MAX_RIGHT {
        return vec![name.to_string()];
    }
    wrap_lines(font, name, BACK_TEXT_SIZE, BACK_NAME_MAX_RIGHT, 2)
}

/// Artist names are printed for playlists and albums; an artist cover would
/// only repeat its own name.
pub fn back_artist_lines(font: &dyn TextRenderer, item: &MediaItem) -> Vec<String> {
    if item.media_type == MediaType::Artist || item.artists.trim().is_empty() {
        return Vec::new();
    }
    wrap_lines(
        font,
        &item.artists,
        BACK_ARTISTS_SIZE,
        PANEL_SIZE as i64 - BACK_MARGIN * 2,
        BACK_ARTISTS_MAX_LINES,
    )
}

fn draw_front(
    art: &RgbaImage,
    item: &MediaItem,
    fonts: &CoverFonts,
    fill: Rgb<u8>,
    text_color: Rgb<u8>,
) -> RgbaImage {
    let mut panel = art.clone();

    let label = front_label(fonts.medium.as_ref(), &item.name);
    let border = label.background.inflate(FRONT_BOX_BORDER);

    paint::drop_shadow(&mut panel, border, SHADOW_OFFSET, SHADOW_SIGMA, 128);
    paint::fill_rect(&mut panel, border, BLACK);
    paint::fill_rect(&mut panel, label.background, fill);
    fonts.medium.draw(
        &mut panel,
        label.x,
        label.y,
        &item.name,
        label.size,
        text_color,
    );
    panel
}

fn draw_spine(
    item: &MediaItem,
    fonts: &CoverFonts,
    assets: &CoverAssets,
    fill: Rgb<u8>,
    text_color: Rgb<u8>,
) -> RgbaImage {
    // laid out horizontally, then turned to read top to bottom
    let mut strip = match assets.texture_sized(PANEL_SIZE, SPINE_WIDTH) {
        Some(texture) => paint::colorize(&texture, BLACK, fill),
        None => RgbaImage::from_pixel(
            PANEL_SIZE,
            SPINE_WIDTH,
            Rgba([fill[0], fill[1], fill[2], 255]),
        ),
    };

    let label = spine_label(item);
    let ink = fonts.light.measure(&label, SPINE_TEXT_SIZE);
    let y = (SPINE_WIDTH as i64 - ink.height()) / 2 - ink.top;
    fonts.light.draw(
        &mut strip,
        SPINE_TEXT_INDENT,
        y,
        &label,
        SPINE_TEXT_SIZE,
        text_color,
    );

    imageops::rotate90(&strip)
}

fn draw_back(art: &RgbaImage, item: &MediaItem, fonts: &CoverFonts) -> RgbaImage {
    let mut panel = RgbaImage::from_pixel(PANEL_SIZE, PANEL_SIZE, Rgba([0, 0, 0, 255]));
    let blurred = imageops::blur(art, BACK_BLUR_SIGMA);
    paint::paste_with_opacity(&mut panel, &blurred, 0, 0, BACK_ART_OPACITY);

    let type_label = item.media_type.as_str();
    let type_ink = fonts.light.measure(type_label, BACK_TEXT_SIZE);
    let name_ink = fonts.medium.measure(&item.name, BACK_TEXT_SIZE);

    fonts.light.draw(
        &mut panel,
        BACK_MARGIN,
        BACK_TYPE_Y,
        type_label,
        BACK_TEXT_SIZE,
        WHITE,
    );

    let divider_y = BACK_TYPE_Y + type_ink.height() + BACK_DIVIDER_GAP;
    let divider_end = (BACK_MARGIN + (type_ink.width() + name_ink.width()) / 2)
        .min(PANEL_SIZE as i64 - BACK_MARGIN);
    paint::draw_hline(
        &mut panel,
        BACK_MARGIN + BACK_DIVIDER_INSET,
        divider_end,
        divider_y,
        2,
        WHITE,
    );

    for (i, line) in back_name_lines(fonts.medium.as_ref(), &item.name)
        .iter()
        .enumerate()
    {
        fonts.medium.draw(
            &mut panel,
            BACK_MARGIN,
            divider_y + i as i64 * BACK_NAME_LINE_HEIGHT,
            line,
            BACK_TEXT_SIZE,
            WHITE,
        );
    }

    let artists = back_artist_lines(fonts.light.as_ref(), item);
    let first_y =
        PANEL_SIZE as i64 - BACK_MARGIN - artists.len() as i64 * BACK_ARTISTS_LINE_HEIGHT;
    for (i, line) in artists.iter().enumerate() {
        fonts.light.draw(
            &mut panel,
            BACK_MARGIN,
            first_y + i as i64 * BACK_ARTISTS_LINE_HEIGHT,
            line,
            BACK_ARTISTS_SIZE,
            WHITE,
        );
    }
    panel
}

/// Composites the full wrap-around cover for `item` from its artwork.
pub fn render_cover(
    item: &MediaItem,
    art: &DynamicImage,
    fonts: &CoverFonts,
    assets: &CoverAssets,
) -> Result<RgbImage, CoverError> {
    let fill = vibrant_color(art)?;
    let text_color = text_color_for(fill);

    let art = if (art.width(), art.height()) == (PANEL_SIZE, PANEL_SIZE) {
        art.to_rgba8()
    } else {
        art.resize_exact(PANEL_SIZE, PANEL_SIZE, FilterType::Lanczos3)
            .to_rgba8()
    };

    let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, Rgba([0, 0, 0, 255]));
    imageops::replace(&mut canvas, &draw_back(&art, item, fonts), BACK_X, 0);
    imageops::replace(
        &mut canvas,
        &draw_spine(item, fonts, assets, fill, text_color),
        SPINE_X,
        0,
    );
    imageops::replace(
        &mut canvas,
        &draw_front(&art, item, fonts, fill, text_color),
        FRONT_X,
        0,
    );

    if let Some(overlay) = assets.overlay_sized(CANVAS_WIDTH, CANVAS_HEIGHT) {
        imageops::overlay(&mut canvas, &overlay, 0, 0);
    }

    Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
}
