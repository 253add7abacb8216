//! Parameter types for image operations.
//!
//! These structs describe *what* to produce, not *how*. They are the interface
//! between the caller (the [`tools`](crate::tools) runner, which reads them out
//! of the config) and the pixel work in [`operations`](super::operations) and
//! [`codec`](super::codec). Each operation gets its own explicit parameter set;
//! nothing is read from ambient state.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`PassportParams`] — Target photo size, border width and border color.
//! - [`LayoutParams`] — Print canvas size, grid shape, gap and background.
//! - [`EncodeOptions`] — Quality plus an optional print-resolution tag.

use crate::color::Color;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Passport photo: stretch to `target_width × target_height`, then pad by
/// `border` pixels of `border_color` on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassportParams {
    pub target_width: u32,
    pub target_height: u32,
    pub border: u32,
    pub border_color: Color,
}

impl Default for PassportParams {
    fn default() -> Self {
        Self {
            target_width: 531,
            target_height: 649,
            border: 20,
            border_color: Color::WHITE,
        }
    }
}

/// Print sheet: `columns × rows` copies of one photo on a fixed canvas.
///
/// The defaults are a 4×6 inch sheet at 300 DPI holding six photos.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub gap: u32,
    pub background: Color,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            canvas_width: 1200,
            canvas_height: 1800,
            columns: 2,
            rows: 3,
            gap: 10,
            background: Color::WHITE,
        }
    }
}

/// Encoder settings shared by all export formats.
///
/// `quality` only affects JPEG. `dpi` is written as JFIF pixel density and is
/// ignored for PNG.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub quality: Quality,
    pub dpi: Option<u16>,
}
