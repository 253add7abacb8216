//! High-level image operations.
//!
//! Every function takes its input by reference and returns a new buffer;
//! nothing the caller holds is modified.

use super::calculations::{bordered_dimensions, calculate_grid_geometry, preview_dimensions};
use super::params::{LayoutParams, PassportParams};
use super::segment::{Segmenter, ensure_same_size};
use super::{ImagingError, Result};
use crate::color::Color;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage, RgbaImage};
use tracing::debug;

/// "Over" blend of one channel, rounded to nearest.
#[inline]
fn blend_channel(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
}

/// Composite an RGBA foreground over an opaque solid `background`.
///
/// Per channel: `out = fg·α + bg·(1−α)`. The background's own alpha is
/// ignored, so the result is always fully opaque.
pub fn composite_over(foreground: &RgbaImage, background: Color) -> RgbImage {
    let bg = [background.r, background.g, background.b];
    let mut out = RgbImage::new(foreground.width(), foreground.height());
    for (dst, src) in out.pixels_mut().zip(foreground.pixels()) {
        let alpha = src[3];
        *dst = Rgb([
            blend_channel(src[0], bg[0], alpha),
            blend_channel(src[1], bg[1], alpha),
            blend_channel(src[2], bg[2], alpha),
        ]);
    }
    out
}

/// Drop transparency by compositing over `background`. Opaque images are
/// only converted.
pub fn flatten(image: &DynamicImage, background: Color) -> RgbImage {
    if image.color().has_alpha() {
        composite_over(&image.to_rgba8(), background)
    } else {
        image.to_rgb8()
    }
}

/// Resize to the passport size and pad with a solid border.
///
/// The photo is stretched to exactly `target_width × target_height` (no
/// aspect preservation), then pasted at `(border, border)` on a canvas of the
/// border color. Transparent sources are flattened onto the border color
/// first.
pub fn format_passport(image: &DynamicImage, params: &PassportParams) -> RgbImage {
    let (width, height) =
        bordered_dimensions((params.target_width, params.target_height), params.border);
    let mut canvas = RgbImage::from_pixel(width, height, params.border_color.to_rgb());

    let has_area = params.target_width > 0 && params.target_height > 0;
    if has_area && image.width() > 0 && image.height() > 0 {
        let flat = flatten(image, params.border_color);
        let resized = imageops::resize(
            &flat,
            params.target_width,
            params.target_height,
            FilterType::Lanczos3,
        );
        imageops::replace(
            &mut canvas,
            &resized,
            params.border as i64,
            params.border as i64,
        );
    }

    debug!(
        source = ?(image.width(), image.height()),
        output = ?(width, height),
        "formatted passport photo"
    );
    canvas
}

/// Tile one photo into a grid on a fixed-size print canvas.
///
/// The photo is resized once to the cell size and the same buffer is pasted
/// into every cell. Fails when the grid does not fit the canvas or the
/// source is empty.
pub fn compose_grid(image: &DynamicImage, params: &LayoutParams) -> Result<RgbImage> {
    let geometry = calculate_grid_geometry(
        (params.canvas_width, params.canvas_height),
        (params.columns, params.rows),
        params.gap,
    )
    .ok_or_else(|| {
        ImagingError::InvalidGeometry(format!(
            "{}x{} grid with gap {} does not fit a {}x{} canvas",
            params.columns, params.rows, params.gap, params.canvas_width, params.canvas_height
        ))
    })?;
    if image.width() == 0 || image.height() == 0 {
        return Err(ImagingError::InvalidGeometry(
            "cannot lay out an empty image".into(),
        ));
    }

    let cell = imageops::resize(
        &flatten(image, params.background),
        geometry.cell_width,
        geometry.cell_height,
        FilterType::Lanczos3,
    );

    let mut canvas = RgbImage::from_pixel(
        params.canvas_width,
        params.canvas_height,
        params.background.to_rgb(),
    );
    for (x, y) in geometry.positions() {
        imageops::replace(&mut canvas, &cell, x as i64, y as i64);
    }

    debug!(
        cells = geometry.cell_count(),
        cell = ?(geometry.cell_width, geometry.cell_height),
        "composed print layout"
    );
    Ok(canvas)
}

/// Downscale for on-screen display, never wider than `max_width`.
///
/// Only for previews; exports always use the full-size raster.
pub fn preview_resize(image: &DynamicImage, max_width: u32) -> DynamicImage {
    match preview_dimensions((image.width(), image.height()), max_width) {
        Some((width, height)) => image.resize_exact(width, height, FilterType::Lanczos3),
        None => image.clone(),
    }
}

/// Cut the subject out with `segmenter`, keeping the transparency.
pub fn remove_background(image: &DynamicImage, segmenter: &dyn Segmenter) -> Result<RgbaImage> {
    let segmented = segmenter.segment(image)?;
    ensure_same_size(image, &segmented)?;
    Ok(segmented)
}

/// Cut the subject out and put it in front of a solid `color`.
pub fn replace_background(
    image: &DynamicImage,
    color: Color,
    segmenter: &dyn Segmenter,
) -> Result<RgbImage> {
    let foreground = remove_background(image, segmenter)?;
    Ok(composite_over(&foreground, color))
}
