//! Image processing — pure Rust on top of the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` with format sniffing |
//! | **Passport** | `imageops::resize` (Lanczos3) + `imageops::replace` onto a bordered canvas |
//! | **Grid layout** | one Lanczos3 resize, pasted into every cell |
//! | **Background color** | [`Segmenter`] + per-pixel "over" blend |
//! | **Encode** | PNG / JPEG (with JFIF DPI) into memory |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for geometry (unit testable)
//! - **Parameters**: Data structures describing each operation
//! - **Segment**: [`Segmenter`] trait + [`CommandSegmenter`] / [`MaskSegmenter`]
//! - **Operations**: Pixel transforms combining calculations + segmentation
//! - **Codec**: Decoding uploads, encoding exports

pub mod calculations;
pub mod codec;
pub mod operations;
mod params;
pub mod segment;
pub mod segmenters;

use thiserror::Error;

pub use codec::{ExportFormat, decode, encode, load};
pub use operations::{
    compose_grid, composite_over, flatten, format_passport, preview_resize, remove_background,
    replace_background,
};
pub use params::{EncodeOptions, LayoutParams, PassportParams, Quality};
pub use segment::{SegmentError, Segmenter};
pub use segmenters::{CommandSegmenter, MaskSegmenter};

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error(transparent)]
    Segmentation(#[from] SegmentError),
}

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ImagingError>;
