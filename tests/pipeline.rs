//! End-to-end runs of every tool through the public library API.
//!
//! Photos are synthesized and encoded as JPEG/PNG so each test starts from
//! bytes, the way an upload would.

use image::{DynamicImage, ImageEncoder, Rgb, RgbImage, RgbaImage};
use photo_tools::color::Color;
use photo_tools::config::{self, AppConfig};
use photo_tools::imaging::{
    self, MaskSegmenter, SegmentError, Segmenter, calculations::calculate_grid_geometry,
};
use photo_tools::tools::{self, Operation, OperationKind};
use std::cell::Cell;

/// Keeps a centered disc as the subject and drops everything else.
struct DiscSegmenter {
    calls: Cell<usize>,
}

impl DiscSegmenter {
    fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

impl Segmenter for DiscSegmenter {
    fn segment(&self, image: &DynamicImage) -> Result<RgbaImage, SegmentError> {
        self.calls.set(self.calls.get() + 1);
        let mut rgba = image.to_rgba8();
        let (w, h) = rgba.dimensions();
        let (cx, cy, r) = (w as f64 / 2.0, h as f64 / 2.0, w.min(h) as f64 / 4.0);
        for (x, y, p) in rgba.enumerate_pixels_mut() {
            let d = ((x as f64 - cx).powi(2) + (y as f64 - cy).powi(2)).sqrt();
            p[3] = if d <= r { 255 } else { 0 };
        }
        Ok(rgba)
    }
}

fn jpeg_upload(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 160])
    });
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 95)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

#[test]
fn passport_from_800x600_upload() {
    let photo = imaging::decode(&jpeg_upload(800, 600)).unwrap();
    let outcome = tools::run(
        &Operation::Passport,
        &photo,
        &AppConfig::default(),
        Some(&DiscSegmenter::new()),
    )
    .unwrap();

    let export = &outcome.export;
    assert_eq!(export.file_name, "passport.jpg");
    assert_eq!(export.mime(), "image/jpeg");

    let decoded = imaging::decode(&export.bytes).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (571, 689));
    // JPEG is lossy; the border is flat white so it survives almost exactly.
    let corner = decoded.get_pixel(5, 5);
    assert!(corner.0.iter().all(|&c| c >= 250), "corner = {corner:?}");
}

#[test]
fn layout_sheet_has_six_cells_and_dpi() {
    let photo = imaging::decode(&jpeg_upload(640, 480)).unwrap();
    let segmenter = DiscSegmenter::new();
    let outcome =
        tools::run(&Operation::Layout, &photo, &AppConfig::default(), Some(&segmenter)).unwrap();

    assert_eq!(segmenter.calls.get(), 0);
    assert_eq!(outcome.export.dimensions, (1200, 1800));
    assert_eq!(outcome.export.dpi, Some(300));

    let geometry = calculate_grid_geometry((1200, 1800), (2, 3), 10).unwrap();
    let positions: Vec<_> = geometry.positions().collect();
    assert_eq!(positions.len(), 6);
    assert_eq!(positions[5], (605, 1206));

    // Preview of a 1200px sheet is scaled to the 500px display width.
    assert_eq!(outcome.preview.width(), 500);
    assert_eq!(outcome.preview.height(), 750);
}

#[test]
fn remove_background_keeps_transparency() {
    let photo = imaging::decode(&jpeg_upload(200, 200)).unwrap();
    let outcome = tools::run(
        &Operation::RemoveBackground,
        &photo,
        &AppConfig::default(),
        Some(&DiscSegmenter::new()),
    )
    .unwrap();

    assert_eq!(outcome.export.file_name, "no_bg.png");
    let decoded = imaging::decode(&outcome.export.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0)[3], 0);
    assert_eq!(decoded.get_pixel(100, 100)[3], 255);
}

#[test]
fn background_color_replaces_outside_of_subject() {
    let photo = imaging::decode(&jpeg_upload(200, 200)).unwrap();
    let color: Color = "yellow".parse().unwrap();
    let outcome = tools::run(
        &Operation::BackgroundColor { color },
        &photo,
        &AppConfig::default(),
        Some(&DiscSegmenter::new()),
    )
    .unwrap();

    assert_eq!(outcome.export.file_name, "bg_yellow.jpg");
    // Preview is the unencoded result at full size.
    let rgb = outcome.preview.to_rgb8();
    assert_eq!(rgb.get_pixel(2, 2).0, [255, 255, 0]);
    assert_eq!(rgb.get_pixel(100, 100).0, photo.to_rgb8().get_pixel(100, 100).0);
}

#[test]
fn mask_segmenter_drives_background_color() {
    let photo = imaging::decode(&jpeg_upload(60, 40)).unwrap();
    let mask =
        image::GrayImage::from_fn(60, 40, |x, _| image::Luma([if x < 30 { 0 } else { 255 }]));
    let outcome = tools::run(
        &Operation::BackgroundColor {
            color: Color::rgb(0, 0, 0),
        },
        &photo,
        &AppConfig::default(),
        Some(&MaskSegmenter::new(mask)),
    )
    .unwrap();

    let rgb = outcome.preview.to_rgb8();
    assert_eq!(rgb.get_pixel(10, 20).0, [0, 0, 0]);
    assert_eq!(rgb.get_pixel(50, 20).0, photo.to_rgb8().get_pixel(50, 20).0);
}

#[test]
fn config_file_changes_outputs() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("tools.toml");
    std::fs::write(
        &path,
        r##"
[passport]
target_width = 100
target_height = 120
border = 5
border_color = "black"

[display]
menu = ["layout", "passport"]
"##,
    )
    .unwrap();
    let config = config::load_config(Some(path.as_path())).unwrap();
    assert_eq!(
        config.display.menu,
        vec![OperationKind::Layout, OperationKind::Passport]
    );

    let photo = imaging::decode(&jpeg_upload(300, 300)).unwrap();
    let outcome =
        tools::run(&Operation::Passport, &photo, &config, None).unwrap();
    assert_eq!(outcome.export.dimensions, (110, 130));
    assert_eq!(outcome.preview.to_rgb8().get_pixel(0, 0).0, [0, 0, 0]);
}

#[test]
fn undecodable_upload_fails() {
    assert!(imaging::decode(b"GIF89a but not really").is_err());
}
