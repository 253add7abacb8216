//! Background segmentation trait and shared types.
//!
//! Background removal is not done here: it is delegated to a pretrained
//! model living outside this crate. The [`Segmenter`] trait is the single
//! capability the rest of the code relies on: take a raster, hand back a
//! same-size raster whose alpha channel masks out the background.
//!
//! Implementations live in [`segmenters`](super::segmenters):
//! [`CommandSegmenter`](super::segmenters::CommandSegmenter) runs an external
//! model program and [`MaskSegmenter`](super::segmenters::MaskSegmenter)
//! applies a precomputed mask. Tests use the recording mock in this module.

use image::{DynamicImage, RgbaImage};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Segmentation command failed ({status}): {stderr}")]
    CommandFailed { status: String, stderr: String },
    #[error("Segmentation returned {actual:?}, expected {expected:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("Segmentation failed: {0}")]
    Failed(String),
    #[error("{0} needs a segmenter")]
    Missing(&'static str),
}

/// Something that can cut a subject out of its background.
pub trait Segmenter {
    /// Return `image` as RGBA with the background made transparent.
    ///
    /// The result must have the same dimensions as the input.
    fn segment(&self, image: &DynamicImage) -> Result<RgbaImage, SegmentError>;
}

/// Check the segmenter kept the input size.
pub(crate) fn ensure_same_size(
    image: &DynamicImage,
    segmented: &RgbaImage,
) -> Result<(), SegmentError> {
    let expected = (image.width(), image.height());
    let actual = segmented.dimensions();
    if expected != actual {
        return Err(SegmentError::SizeMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock segmenter that records calls and stamps a fixed alpha.
    ///
    /// Color channels pass through unchanged so compositing results stay
    /// predictable.
    #[derive(Default)]
    pub struct MockSegmenter {
        pub alpha: u8,
        pub fail: bool,
        /// Overrides the returned size to simulate a misbehaving model.
        pub output_size: Option<(u32, u32)>,
        pub calls: Mutex<Vec<(u32, u32)>>,
    }

    impl MockSegmenter {
        pub fn with_alpha(alpha: u8) -> Self {
            Self {
                alpha,
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Segmenter for MockSegmenter {
        fn segment(&self, image: &DynamicImage) -> Result<RgbaImage, SegmentError> {
            self.calls
                .lock()
                .unwrap()
                .push((image.width(), image.height()));

            if self.fail {
                return Err(SegmentError::Failed("mock model unavailable".into()));
            }

            let mut out = image.to_rgba8();
            for pixel in out.pixels_mut() {
                pixel[3] = self.alpha;
            }
            if let Some((w, h)) = self.output_size {
                out = image::imageops::resize(&out, w, h, image::imageops::FilterType::Nearest);
            }
            Ok(out)
        }
    }

    #[test]
    fn mock_records_input_size() {
        let seg = MockSegmenter::with_alpha(0);
        let img = DynamicImage::new_rgb8(40, 30);
        let out = seg.segment(&img).unwrap();
        assert_eq!(out.dimensions(), (40, 30));
        assert_eq!(*seg.calls.lock().unwrap(), vec![(40, 30)]);
    }

    #[test]
    fn mock_stamps_alpha() {
        let seg = MockSegmenter::with_alpha(77);
        let out = seg.segment(&DynamicImage::new_rgb8(3, 3)).unwrap();
        assert!(out.pixels().all(|p| p[3] == 77));
    }

    #[test]
    fn mock_failure_propagates() {
        let seg = MockSegmenter::failing();
        let result = seg.segment(&DynamicImage::new_rgb8(3, 3));
        assert!(matches!(result, Err(SegmentError::Failed(_))));
        assert_eq!(seg.call_count(), 1);
    }

    #[test]
    fn ensure_same_size_detects_mismatch() {
        let img = DynamicImage::new_rgb8(10, 10);
        let ok = RgbaImage::new(10, 10);
        let bad = RgbaImage::new(10, 9);
        assert!(ensure_same_size(&img, &ok).is_ok());
        assert!(matches!(
            ensure_same_size(&img, &bad),
            Err(SegmentError::SizeMismatch {
                expected: (10, 10),
                actual: (10, 9)
            })
        ));
    }
}
