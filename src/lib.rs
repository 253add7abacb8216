//! # Photo Tools
//!
//! Four everyday photo chores in one binary: cut out the background, put the
//! subject in front of a solid color, make a bordered passport photo, and
//! tile that passport photo six times onto a 4×6 inch print sheet.
//!
//! # Architecture: One Transform per Request
//!
//! ```text
//! bytes ─decode─▶ photo ─┬─ segment ─────────────────────▶ PNG  (no_bg.png)
//!                        ├─ segment ─▶ composite ─────────▶ JPEG (bg_<color>.jpg)
//!                        ├─ resize ─▶ border ─────────────▶ JPEG (passport.jpg)
//!                        └─ resize ─▶ border ─▶ grid ─────▶ JPEG (4x6_layout.jpg, 300 DPI)
//! ```
//!
//! Each request runs exactly one path to completion. The tool and its
//! parameters are passed in explicitly ([`tools::Operation`] plus
//! [`config::AppConfig`]); there is no session state.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tools`] | Entry point: run one tool, get encoded bytes + preview |
//! | [`imaging`] | Pixel work: passport, grid, compositing, preview, codecs, segmentation adapters |
//! | [`color`] | Palette names and hex parsing |
//! | [`config`] | `config.toml` loading, validation, merging |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Segmentation Is Someone Else's Job
//!
//! Cutting a person out of a photo needs a pretrained model. This crate does
//! not ship one; it talks to one through the [`imaging::Segmenter`] trait.
//! The stock adapter runs an external program (`rembg` by default) on scratch
//! files, and a mask adapter applies a precomputed mask. Everything else is
//! deterministic and tested without a model.
//!
//! ## Stretch, Don't Crop
//!
//! Passport photos are resized to exactly the target size. Users are
//! expected to upload a photo already framed for the purpose.
//!
//! ## Flatten Before Resizing
//!
//! A transparent source given to the passport or layout tools is composited
//! onto the border/background color first, so the output never depends on
//! how a paste primitive treats alpha.

pub mod color;
pub mod config;
pub mod imaging;
pub mod output;
pub mod tools;
