//! The four photo tools as one entry point.
//!
//! A host (the CLI in `main.rs`, or a web front end) picks an [`Operation`],
//! hands over a decoded photo, and gets back an [`Outcome`]: encoded bytes
//! ready for download plus a display-sized preview. Each call is one
//! synchronous transform with no state kept between calls.
//!
//! | Tool | Pipeline | Export |
//! |---|---|---|
//! | Remove background | segment | `no_bg.png` |
//! | Add background color | segment → composite | `bg_<color>.jpg` |
//! | Passport size | resize → border | `passport.jpg` |
//! | 4x6 layout | resize → border → grid | `4x6_layout.jpg` (300 DPI) |

use crate::color::Color;
use crate::config::AppConfig;
use crate::imaging::{
    self, ExportFormat, SegmentError, Segmenter, compose_grid, format_passport, preview_resize,
    remove_background, replace_background,
};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Tool identifiers, as used in config menus and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    RemoveBg,
    BgColor,
    Passport,
    Layout,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::RemoveBg,
        OperationKind::BgColor,
        OperationKind::Passport,
        OperationKind::Layout,
    ];

    pub fn key(self) -> &'static str {
        match self {
            OperationKind::RemoveBg => "remove-bg",
            OperationKind::BgColor => "bg-color",
            OperationKind::Passport => "passport",
            OperationKind::Layout => "layout",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OperationKind::RemoveBg => "Remove Background",
            OperationKind::BgColor => "Add Background Color",
            OperationKind::Passport => "Passport Size",
            OperationKind::Layout => "4x6 Layout",
        }
    }

    /// Whether the tool needs a [`Segmenter`].
    pub fn uses_segmentation(self) -> bool {
        matches!(self, OperationKind::RemoveBg | OperationKind::BgColor)
    }
}

/// One tool invocation with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    RemoveBackground,
    BackgroundColor { color: Color },
    Passport,
    Layout,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::RemoveBackground => OperationKind::RemoveBg,
            Operation::BackgroundColor { .. } => OperationKind::BgColor,
            Operation::Passport => OperationKind::Passport,
            Operation::Layout => OperationKind::Layout,
        }
    }

    /// Transparency only survives in PNG; everything else ships as JPEG.
    pub fn format(&self) -> ExportFormat {
        match self {
            Operation::RemoveBackground => ExportFormat::Png,
            _ => ExportFormat::Jpeg,
        }
    }

    /// Suggested download name.
    pub fn file_name(&self) -> String {
        match self {
            Operation::RemoveBackground => "no_bg.png".to_string(),
            Operation::BackgroundColor { color } => format!("bg_{}.jpg", color.label()),
            Operation::Passport => "passport.jpg".to_string(),
            Operation::Layout => "4x6_layout.jpg".to_string(),
        }
    }
}

/// Encoded result, ready to hand to whatever offers the download.
#[derive(Debug, Clone)]
pub struct Export {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
    pub file_name: String,
    /// Pixel size of the encoded image.
    pub dimensions: (u32, u32),
    pub dpi: Option<u16>,
}

impl Export {
    pub fn mime(&self) -> &'static str {
        self.format.mime()
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub export: Export,
    /// Display-sized copy of the result; never used for the export.
    pub preview: DynamicImage,
}

/// Run one tool on `image`.
///
/// `segmenter` is only called for the background tools, which fail with
/// [`SegmentError::Missing`] when it is `None`.
pub fn run(
    operation: &Operation,
    image: &DynamicImage,
    config: &AppConfig,
    segmenter: Option<&dyn Segmenter>,
) -> imaging::Result<Outcome> {
    info!(tool = operation.kind().key(), "running tool");
    let segmenter = || segmenter.ok_or(SegmentError::Missing(operation.kind().label()));

    let (result, dpi) = match operation {
        Operation::RemoveBackground => (
            DynamicImage::ImageRgba8(remove_background(image, segmenter()?)?),
            None,
        ),
        Operation::BackgroundColor { color } => (
            DynamicImage::ImageRgb8(replace_background(image, *color, segmenter()?)?),
            None,
        ),
        Operation::Passport => (
            DynamicImage::ImageRgb8(format_passport(image, &config.passport.params())),
            None,
        ),
        Operation::Layout => {
            let passport = format_passport(image, &config.passport.params());
            let sheet = compose_grid(
                &DynamicImage::ImageRgb8(passport),
                &config.layout.params(),
            )?;
            (DynamicImage::ImageRgb8(sheet), config.layout.dpi())
        }
    };

    let format = operation.format();
    let bytes = imaging::encode(&result, format, &config.export.options(dpi))?;
    let preview = preview_resize(&result, config.display.max_width);

    Ok(Outcome {
        export: Export {
            bytes,
            format,
            file_name: operation.file_name(),
            dimensions: (result.width(), result.height()),
            dpi,
        },
        preview,
    })
}
