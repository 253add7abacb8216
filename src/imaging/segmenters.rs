//! Concrete segmenters.
//!
//! | Segmenter | Source of the alpha mask |
//! |---|---|
//! | [`CommandSegmenter`] | External program (e.g. `rembg i {input} {output}`) run on scratch PNG files |
//! | [`MaskSegmenter`] | Precomputed grayscale mask, resized to the photo when needed |

use super::segment::{SegmentError, Segmenter, ensure_same_size};
use crate::config::SegmentationConfig;
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageFormat, RgbaImage};
use std::borrow::Cow;
use std::path::Path;
use std::process::Command;
use tracing::debug;

const INPUT_PLACEHOLDER: &str = "{input}";
const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Runs an external background-removal program.
///
/// The photo is written as RGBA PNG to a scratch directory, the program is
/// invoked with `{input}` and `{output}` replaced by the scratch paths, and
/// the PNG it leaves at `{output}` is read back. The call blocks until the
/// program exits; there is no timeout.
#[derive(Debug, Clone)]
pub struct CommandSegmenter {
    program: String,
    args: Vec<String>,
}

impl CommandSegmenter {
    /// Build from a full command line; the first element is the program.
    pub fn new(command: &[String]) -> Result<Self, SegmentError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| SegmentError::Failed("segmentation command is empty".into()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    pub fn from_config(config: &SegmentationConfig) -> Result<Self, SegmentError> {
        Self::new(&config.command)
    }

    fn expand_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(INPUT_PLACEHOLDER, &input)
                    .replace(OUTPUT_PLACEHOLDER, &output)
            })
            .collect()
    }
}

impl Segmenter for CommandSegmenter {
    fn segment(&self, image: &DynamicImage) -> Result<RgbaImage, SegmentError> {
        let scratch = tempfile::TempDir::new()?;
        let input = scratch.path().join("input.png");
        let output = scratch.path().join("output.png");

        DynamicImage::ImageRgba8(image.to_rgba8()).save_with_format(&input, ImageFormat::Png)?;

        let args = self.expand_args(&input, &output);
        debug!(program = %self.program, ?args, "running segmentation command");
        let result = Command::new(&self.program).args(&args).output()?;
        if !result.status.success() {
            return Err(SegmentError::CommandFailed {
                status: result.status.to_string(),
                stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
            });
        }

        let segmented = image::open(&output)?.to_rgba8();
        ensure_same_size(image, &segmented)?;
        Ok(segmented)
    }
}

/// Applies a precomputed mask as the alpha channel.
///
/// White keeps the subject, black removes it. A mask of a different size is
/// stretched to the photo first.
#[derive(Debug, Clone)]
pub struct MaskSegmenter {
    mask: GrayImage,
}

impl MaskSegmenter {
    pub fn new(mask: GrayImage) -> Self {
        Self { mask }
    }

    /// Load a mask image from disk, converting it to grayscale.
    pub fn open(path: &Path) -> Result<Self, SegmentError> {
        Ok(Self::new(image::open(path)?.to_luma8()))
    }
}

impl Segmenter for MaskSegmenter {
    fn segment(&self, image: &DynamicImage) -> Result<RgbaImage, SegmentError> {
        let mut rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Ok(rgba);
        }

        let mask = if self.mask.dimensions() == (width, height) {
            Cow::Borrowed(&self.mask)
        } else {
            debug!(
                mask = ?self.mask.dimensions(),
                image = ?(width, height),
                "resizing mask to photo"
            );
            Cow::Owned(image::imageops::resize(
                &self.mask,
                width,
                height,
                FilterType::Triangle,
            ))
        };

        for (pixel, m) in rgba.pixels_mut().zip(mask.pixels()) {
            pixel[3] = m[0];
        }
        Ok(rgba)
    }
}
