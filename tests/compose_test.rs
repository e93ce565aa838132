use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use wrapcover::cover::{
    CoverAssets, CoverFonts, CoverRenderer, TextBox, TextRenderer,
    compose::*,
    paint::{self, Rect},
    render_cover, save_cover,
    text::wrap_lines,
};
use wrapcover::types::{MediaItem, MediaType};

/// Every glyph is a solid block half as wide as the font size.
struct BlockText;

impl TextRenderer for BlockText {
    fn measure(&self, text: &str, size: f32) -> TextBox {
        if text.is_empty() {
            return TextBox::default();
        }
        TextBox {
            left: 0,
            top: 0,
            right: (text.chars().count() as f32 * size / 2.0) as i64,
            bottom: size as i64,
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, x: i64, y: i64, text: &str, size: f32, color: Rgb<u8>) {
        let ink = self.measure(text, size);
        paint::fill_rect(
            canvas,
            Rect::new(x + ink.left, y + ink.top, x + ink.right, y + ink.bottom),
            color,
        );
    }
}

fn block_fonts() -> CoverFonts {
    CoverFonts::new(Box::new(BlockText), Box::new(BlockText))
}

fn test_item(name: &str, media_type: MediaType, artists: &str) -> MediaItem {
    MediaItem {
        id: "1".to_string(),
        name: name.to_string(),
        media_type,
        artists: artists.to_string(),
        image_url: None,
    }
}

fn solid_art(color: Rgb<u8>) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(PANEL_SIZE, PANEL_SIZE, color))
}

fn assert_close(actual: &Rgb<u8>, expected: Rgb<u8>, tolerance: i32) {
    for c in 0..3 {
        let diff = (i32::from(actual[c]) - i32::from(expected[c])).abs();
        assert!(diff <= tolerance, "{:?} vs {:?}", actual, expected);
    }
}

#[test]
fn test_wrap_lines_greedy() {
    // 30px per character at size 60
    let lines = wrap_lines(&BlockText, "one two three four", 60.0, 300, 2);
    assert_eq!(lines, vec!["one two", "three four"]);

    let lines = wrap_lines(&BlockText, "one two three four", 60.0, 250, 3);
    assert_eq!(lines, vec!["one two", "three", "four"]);
}

#[test]
fn test_wrap_lines_overflow_goes_to_last_line() {
    let lines = wrap_lines(&BlockText, "one two three four", 60.0, 250, 2);
    assert_eq!(lines, vec!["one two", "three four"]);

    let lines = wrap_lines(&BlockText, "one two three", 60.0, 10, 1);
    assert_eq!(lines, vec!["one two three"]);
}

#[test]
fn test_wrap_lines_empty_text() {
    assert!(wrap_lines(&BlockText, "   ", 60.0, 300, 2).is_empty());
}

#[test]
fn test_front_label_is_centered() {
    let label = front_label(&BlockText, "Gloria");

    // relative to the front panel
    assert_eq!(label.size, FRONT_NAME_SIZE);
    assert_eq!((label.x, label.y), (260, 300));
    assert_eq!(label.background, Rect::new(250, 290, 390, 350));
}

#[test]
fn test_front_label_shrinks_long_names() {
    let name = "x".repeat(40);
    let label = front_label(&BlockText, &name);

    assert_eq!(label.size, 28.0);
    assert_eq!(label.background.width(), 560 + 2 * FRONT_BOX_PADDING);

    // never below the minimum, even if it still overflows
    let label = front_label(&BlockText, &"x".repeat(200));
    assert_eq!(label.size, FRONT_NAME_MIN_SIZE);
}

#[test]
fn test_spine_label() {
    let item = test_item("Gloria", MediaType::Playlist, "");
    assert_eq!(spine_label(&item), "PLAYLIST   •   Gloria");
}

#[test]
fn test_back_name_lines() {
    assert_eq!(back_name_lines(&BlockText, "Gloria"), vec!["Gloria"]);
    assert_eq!(
        back_name_lines(&BlockText, "A very long playlist name here"),
        vec!["A very long playlist", "name here"]
    );
}

#[test]
fn test_back_artist_lines() {
    let album = test_item("Heroes", MediaType::Album, "David Bowie, Brian Eno");
    assert_eq!(
        back_artist_lines(&BlockText, &album),
        vec!["David Bowie, Brian Eno"]
    );

    let artist = test_item("Queen", MediaType::Artist, "Queen");
    assert!(back_artist_lines(&BlockText, &artist).is_empty());

    let lonely = test_item("Empty", MediaType::Playlist, "  ");
    assert!(back_artist_lines(&BlockText, &lonely).is_empty());

    let crowded = test_item("Mix", MediaType::Playlist, &"Artist ".repeat(60));
    assert_eq!(
        back_artist_lines(&BlockText, &crowded).len(),
        BACK_ARTISTS_MAX_LINES
    );
}

#[test]
fn test_render_cover_layout() {
    let fill = Rgb([200, 30, 30]);
    let item = test_item("Gloria", MediaType::Playlist, "");
    let cover = render_cover(&item, &solid_art(fill), &block_fonts(), &CoverAssets::default())
        .unwrap();

    assert_eq!(cover.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));

    // front artwork untouched away from the label
    assert_eq!(cover.get_pixel(700, 5), &fill);
    // name box and its black border
    assert_close(cover.get_pixel(945, 295), fill, 1);
    assert_eq!(cover.get_pixel(939, 289), &Rgb([0, 0, 0]));
    // white text inside the box
    assert_eq!(cover.get_pixel(1000, 320), &Rgb([255, 255, 255]));

    // spine strip in the vibrant color
    assert_close(cover.get_pixel(641, 5), fill, 1);

    // blurred artwork at half strength over black
    assert_close(cover.get_pixel(320, 320), Rgb([100, 15, 15]), 2);
    // white type label in the top left
    assert_eq!(cover.get_pixel(40, 20), &Rgb([255, 255, 255]));
}

#[test]
fn test_render_cover_back_divider() {
    let item = test_item("Gloria", MediaType::Playlist, "");
    let cover = render_cover(
        &item,
        &solid_art(Rgb([200, 30, 30])),
        &block_fonts(),
        &CoverAssets::default(),
    )
    .unwrap();
    let white = Rgb([255, 255, 255]);

    // "PLAYLIST" is 240x60 and "Gloria" 180x60 at 60px: the divider sits at
    // y = 10 + 60 + 25 and ends at x = 30 + (240 + 180) / 2
    assert_eq!(cover.get_pixel(225, 95), &white);
    assert_eq!(cover.get_pixel(240, 96), &white);
    assert_ne!(cover.get_pixel(241, 95), &white);
    assert_ne!(cover.get_pixel(225, 97), &white);
    assert_ne!(cover.get_pixel(225, 94), &white);
}

#[test]
fn test_render_cover_spine_text() {
    let fill = Rgb([200, 30, 30]);
    let item = test_item("Gloria", MediaType::Playlist, "");
    let cover = render_cover(&item, &solid_art(fill), &block_fonts(), &CoverAssets::default())
        .unwrap();
    let white = Rgb([255, 255, 255]);

    // "PLAYLIST   •   Gloria" is 420x40 at 40px, starting 50px down the
    // spine and centered across its width
    assert_eq!(cover.get_pixel(665, 100), &white);
    assert_eq!(cover.get_pixel(645, 50), &white);
    assert_eq!(cover.get_pixel(684, 469), &white);
    assert_close(cover.get_pixel(665, 30), fill, 1);
    assert_close(cover.get_pixel(665, 480), fill, 1);
    assert_close(cover.get_pixel(643, 100), fill, 1);
    assert_close(cover.get_pixel(686, 100), fill, 1);
}

#[test]
fn test_render_cover_keeps_long_names_in_their_panel() {
    let fill = Rgb([200, 30, 30]);
    // 99 characters: 990px on the front even at the smallest size, and a
    // second back line far wider than the panel
    let name = "abcdefghi ".repeat(10).trim().to_string();
    let item = test_item(&name, MediaType::Playlist, "");
    let cover = render_cover(&item, &solid_art(fill), &block_fonts(), &CoverAssets::default())
        .unwrap();

    assert_eq!(
        back_name_lines(&BlockText, &name)[1].len(),
        name.len() - "abcdefghi abcdefghi ".len()
    );

    // the front name box does not reach the back panel
    assert_close(cover.get_pixel(620, 320), Rgb([100, 15, 15]), 2);
    // the second back line stops at the spine and the front artwork
    assert_close(cover.get_pixel(641, 180), fill, 1);
    assert_close(cover.get_pixel(700, 180), fill, 1);
    assert_eq!(cover.get_pixel(600, 180), &Rgb([255, 255, 255]));
    // the front box is cut at the front panel's left edge, above the text
    assert_close(cover.get_pixel(690, 305), fill, 1);
    assert_eq!(cover.get_pixel(690, 320), &Rgb([255, 255, 255]));
}

#[test]
fn test_render_cover_resizes_artwork() {
    let fill = Rgb([20, 120, 220]);
    let art = DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 200, fill));
    let item = test_item("Small", MediaType::Album, "Somebody");

    let cover = render_cover(&item, &art, &block_fonts(), &CoverAssets::default()).unwrap();

    assert_eq!(cover.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
    assert_close(cover.get_pixel(1320, 630), fill, 2);
}

#[test]
fn test_render_cover_dark_text_on_light_color() {
    let fill = Rgb([250, 240, 120]);
    let item = test_item("Gloria", MediaType::Playlist, "");
    let cover = render_cover(&item, &solid_art(fill), &block_fonts(), &CoverAssets::default())
        .unwrap();

    assert_eq!(cover.get_pixel(1000, 320), &Rgb([0, 0, 0]));
}

#[test]
fn test_render_cover_with_assets() {
    let item = test_item("Gloria", MediaType::Playlist, "");
    let art = solid_art(Rgb([200, 30, 30]));

    // a black texture colorizes to black
    let assets = CoverAssets {
        texture: Some(GrayImage::from_pixel(10, 10, Luma([0]))),
        overlay: None,
    };
    let cover = render_cover(&item, &art, &block_fonts(), &assets).unwrap();
    assert_eq!(cover.get_pixel(641, 5), &Rgb([0, 0, 0]));

    // an opaque overlay hides everything below it
    let assets = CoverAssets {
        texture: None,
        overlay: Some(RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 255]))),
    };
    let cover = render_cover(&item, &art, &block_fonts(), &assets).unwrap();
    assert_eq!(cover.get_pixel(5, 5), &Rgb([0, 0, 255]));
    assert_eq!(cover.get_pixel(1000, 320), &Rgb([0, 0, 255]));
}

#[test]
fn test_save_cover_uses_type_folder() {
    let dir = tempfile::tempdir().unwrap();
    let item = test_item("Heroes / Live", MediaType::Album, "");
    let cover = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));

    let path = save_cover(&cover, dir.path(), &item).unwrap();

    assert_eq!(path, dir.path().join("albums").join("Heroes _ Live_cover.png"));
    let saved = image::open(&path).unwrap().to_rgb8();
    assert_eq!(saved.get_pixel(0, 0), &Rgb([1, 2, 3]));
}

#[test]
fn test_renderer_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let renderer = CoverRenderer::new(
        block_fonts(),
        CoverAssets::default(),
        dir.path().to_path_buf(),
    );
    let item = test_item("Queen", MediaType::Artist, "Queen");

    let path = renderer
        .render_to_file(&item, &solid_art(Rgb([90, 40, 160])))
        .unwrap();

    assert!(path.starts_with(renderer.output_dir().join("artists")));
    let saved = image::open(&path).unwrap();
    assert_eq!((saved.width(), saved.height()), (CANVAS_WIDTH, CANVAS_HEIGHT));
}

#[tokio::test]
async fn test_load_assets() {
    assert!(CoverAssets::load(None).await.unwrap().texture.is_none());

    let dir = tempfile::tempdir().unwrap();
    let empty = CoverAssets::load(Some(dir.path())).await.unwrap();
    assert!(empty.texture.is_none());
    assert!(empty.overlay.is_none());

    GrayImage::from_pixel(8, 4, Luma([77]))
        .save(dir.path().join("texture.png"))
        .unwrap();
    let assets = CoverAssets::load(Some(dir.path())).await.unwrap();
    assert!(assets.overlay.is_none());

    let texture = assets.texture_sized(16, 8).unwrap();
    assert_eq!(texture.dimensions(), (16, 8));
    assert!(texture.get_pixel(3, 3)[0].abs_diff(77) <= 1);
}

#[test]
fn test_fill_rect_clips() {
    let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
    paint::fill_rect(&mut canvas, Rect::new(-5, -5, 3, 3), Rgb([9, 9, 9]));

    assert_eq!(canvas.get_pixel(0, 0), &Rgba([9, 9, 9, 255]));
    assert_eq!(canvas.get_pixel(2, 2), &Rgba([9, 9, 9, 255]));
    assert_eq!(canvas.get_pixel(3, 3), &Rgba([0, 0, 0, 255]));

    // entirely outside is a no-op
    paint::fill_rect(&mut canvas, Rect::new(20, 20, 30, 30), Rgb([9, 9, 9]));
}

#[test]
fn test_blend_pixel() {
    let mut canvas = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
    paint::blend_pixel(&mut canvas, 0, 0, Rgb([255, 255, 255]), 128);
    paint::blend_pixel(&mut canvas, 1, 1, Rgb([255, 255, 255]), 255);
    paint::blend_pixel(&mut canvas, -1, 5, Rgb([255, 255, 255]), 255);

    assert_eq!(canvas.get_pixel(0, 0), &Rgba([128, 128, 128, 255]));
    assert_eq!(canvas.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
    assert_eq!(canvas.get_pixel(1, 0), &Rgba([0, 0, 0, 255]));
}

#[test]
fn test_draw_hline() {
    let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
    paint::draw_hline(&mut canvas, 2, 6, 4, 2, Rgb([255, 255, 255]));

    assert_eq!(canvas.get_pixel(2, 4)[0], 255);
    assert_eq!(canvas.get_pixel(6, 5)[0], 255);
    assert_eq!(canvas.get_pixel(7, 4)[0], 0);
    assert_eq!(canvas.get_pixel(4, 6)[0], 0);
}

#[test]
fn test_colorize() {
    let mut texture = GrayImage::new(2, 1);
    texture.put_pixel(0, 0, Luma([0]));
    texture.put_pixel(1, 0, Luma([255]));

    let colored = paint::colorize(&texture, Rgb([0, 0, 0]), Rgb([200, 30, 30]));
    assert_eq!(colored.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    assert_eq!(colored.get_pixel(1, 0), &Rgba([200, 30, 30, 255]));
}

#[test]
fn test_drop_shadow_darkens_offset_area() {
    let mut canvas = RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]));
    paint::drop_shadow(&mut canvas, Rect::new(20, 20, 40, 40), 6, 4.0, 128);

    assert!(canvas.get_pixel(36, 36)[0] < 200);
    assert_eq!(canvas.get_pixel(90, 90), &Rgba([255, 255, 255, 255]));
}
