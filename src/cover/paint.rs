//! Pixel primitives on RGBA canvases.
//!
//! Coordinates are signed so callers can position things partly outside the
//! canvas; anything out of bounds is clipped. Rectangles are half-open:
//! `x1..x2` by `y1..y2`.

use image::{GrayImage, Rgb, Rgba, RgbaImage, imageops};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Rect {
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i64 {
        (self.x2 - self.x1).max(0)
    }

    pub fn height(&self) -> i64 {
        (self.y2 - self.y1).max(0)
    }

    /// Grows the rectangle by `amount` on every side.
    pub fn inflate(&self, amount: i64) -> Self {
        Self::new(
            self.x1 - amount,
            self.y1 - amount,
            self.x2 + amount,
            self.y2 + amount,
        )
    }

    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.x1 + dx, self.y1 + dy, self.x2 + dx, self.y2 + dy)
    }
}

fn mix(src: u8, dst: u8, alpha: u32) -> u8 {
    ((u32::from(src) * alpha + u32::from(dst) * (255 - alpha) + 127) / 255) as u8
}

/// Blends `color` over one pixel with the given coverage. The destination
/// alpha saturates towards opaque.
pub fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgb<u8>, alpha: u8) {
    if alpha == 0 || x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }

    let a = u32::from(alpha);
    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    let Rgba([r, g, b, da]) = *dst;
    *dst = Rgba([
        mix(color[0], r, a),
        mix(color[1], g, a),
        mix(color[2], b, a),
        (a + u32::from(da) * (255 - a) / 255).min(255) as u8,
    ]);
}

pub fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: Rgb<u8>) {
    let x1 = rect.x1.max(0);
    let y1 = rect.y1.max(0);
    let x2 = rect.x2.min(canvas.width() as i64);
    let y2 = rect.y2.min(canvas.height() as i64);

    for y in y1..y2 {
        for x in x1..x2 {
            canvas.put_pixel(x as u32, y as u32, Rgba([color[0], color[1], color[2], 255]));
        }
    }
}

/// Horizontal line of `thickness` pixels whose top edge is `y`.
pub fn draw_hline(
    canvas: &mut RgbaImage,
    x1: i64,
    x2: i64,
    y: i64,
    thickness: i64,
    color: Rgb<u8>,
) {
    fill_rect(canvas, Rect::new(x1.min(x2), y, x1.max(x2) + 1, y + thickness), color);
}

/// Composites `src` onto `canvas` at (`x`, `y`), scaling the source alpha by
/// `opacity` (255 keeps it as is).
pub fn paste_with_opacity(canvas: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64, opacity: u8) {
    for (sx, sy, pixel) in src.enumerate_pixels() {
        let alpha = u32::from(pixel[3]) * u32::from(opacity) / 255;
        blend_pixel(
            canvas,
            x + i64::from(sx),
            y + i64::from(sy),
            Rgb([pixel[0], pixel[1], pixel[2]]),
            alpha as u8,
        );
    }
}

/// Soft black shadow of `rect`, shifted by `offset` and blurred with `sigma`.
pub fn drop_shadow(canvas: &mut RgbaImage, rect: Rect, offset: i64, sigma: f32, opacity: u8) {
    if rect.width() == 0 || rect.height() == 0 {
        return;
    }

    let margin = (sigma * 3.0).ceil().max(1.0) as i64;
    let width = (rect.width() + margin * 2) as u32;
    let height = (rect.height() + margin * 2) as u32;

    let mut shape = RgbaImage::new(width, height);
    for y in margin..margin + rect.height() {
        for x in margin..margin + rect.width() {
            shape.put_pixel(x as u32, y as u32, Rgba([0, 0, 0, 255]));
        }
    }
    let shadow = imageops::blur(&shape, sigma);

    let origin = rect.offset(offset, offset);
    paste_with_opacity(canvas, &shadow, origin.x1 - margin, origin.y1 - margin, opacity);
}

/// Maps a grayscale texture onto a gradient from `dark` (black texels) to
/// `light` (white texels).
pub fn colorize(texture: &GrayImage, dark: Rgb<u8>, light: Rgb<u8>) -> RgbaImage {
    RgbaImage::from_fn(texture.width(), texture.height(), |x, y| {
        let level = u32::from(texture.get_pixel(x, y)[0]);
        Rgba([
            mix(light[0], dark[0], level),
            mix(light[1], dark[1], level),
            mix(light[2], dark[2], level),
            255,
        ])
    })
}
