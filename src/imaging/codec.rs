//! Decoding uploads and encoding exports.
//!
//! Decoding sniffs the container from the bytes, so file extensions don't
//! matter. Encoding writes into memory: the caller decides where the bytes
//! go (a file for the CLI, a download response for a web host).
//!
//! | Export | Encoder | Notes |
//! |---|---|---|
//! | PNG | `image::codecs::png::PngEncoder` | Lossless, keeps alpha |
//! | JPEG | `image::codecs::jpeg::JpegEncoder` | Flattened to RGB8, optional JFIF DPI |

use super::params::EncodeOptions;
use super::{ImagingError, Result};
use image::codecs::jpeg::{JpegEncoder, PixelDensity};
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Container format of an exported image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Jpeg,
}

impl ExportFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Jpeg => "JPEG",
        }
    }
}

/// Decode an uploaded image from memory.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage> {
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()
        .map_err(|e| ImagingError::Decode(e.to_string()))?;
    debug!(
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "decoded image"
    );
    Ok(image)
}

/// Read and decode an image file.
pub fn load(path: &Path) -> Result<DynamicImage> {
    let bytes = std::fs::read(path)?;
    decode(&bytes).map_err(|e| match e {
        ImagingError::Decode(msg) => {
            ImagingError::Decode(format!("Failed to decode {}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Encode `image` into an in-memory buffer.
pub fn encode(image: &DynamicImage, format: ExportFormat, options: &EncodeOptions) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match format {
        ExportFormat::Png => {
            image
                .write_with_encoder(PngEncoder::new(&mut buf))
                .map_err(|e| ImagingError::Encode(format!("PNG: {}", e)))?;
        }
        ExportFormat::Jpeg => {
            // JPEG has no alpha; an RGBA source would otherwise be rejected.
            let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
            let mut encoder = JpegEncoder::new_with_quality(&mut buf, options.quality.value());
            if let Some(dpi) = options.dpi {
                encoder.set_pixel_density(PixelDensity::dpi(dpi));
            }
            rgb.write_with_encoder(encoder)
                .map_err(|e| ImagingError::Encode(format!("JPEG: {}", e)))?;
        }
    }
    debug!(format = format.name(), bytes = buf.len(), "encoded image");
    Ok(buf)
}
