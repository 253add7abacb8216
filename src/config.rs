//! Tool configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! reproduce the classic tool: 531×649 passport photos with a 20px white
//! border, six of them on a 4×6 inch sheet at 300 DPI.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [passport]
//! target_width = 531        # Photo width before the border
//! target_height = 649       # Photo height before the border
//! border = 20               # Border width on every side
//! border_color = "white"    # Palette name or hex
//!
//! [layout]
//! canvas_width = 1200       # 4in at 300 DPI
//! canvas_height = 1800      # 6in at 300 DPI
//! columns = 2
//! rows = 3
//! gap = 10                  # Pixels between photos
//! background = "white"
//! dpi = 300                 # Written into the JPEG; 0 = omit
//!
//! [display]
//! max_width = 500           # Preview width
//! menu = ["passport", "remove-bg", "layout", "bg-color"]
//!
//! [export]
//! jpeg_quality = 90         # 1-100 (PIL defaults to 75)
//!
//! [segmentation]
//! command = ["rembg", "i", "{input}", "{output}"]
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [passport]
//! border_color = "#eeeeee"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::color::Color;
use crate::imaging::calculations::calculate_grid_geometry;
use crate::imaging::{EncodeOptions, LayoutParams, PassportParams, Quality};
use crate::tools::OperationKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Passport photo size and border.
    pub passport: PassportConfig,
    /// Print sheet geometry.
    pub layout: LayoutConfig,
    /// Preview width and menu order.
    pub display: DisplayConfig,
    /// Encoder settings.
    pub export: ExportConfig,
    /// External background-removal program.
    pub segmentation: SegmentationConfig,
}

impl AppConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.export.jpeg_quality) {
            return Err(ConfigError::Validation(
                "export.jpeg_quality must be 1-100".into(),
            ));
        }
        let layout = &self.layout;
        if layout.columns == 0 || layout.rows == 0 {
            return Err(ConfigError::Validation(
                "layout.columns and layout.rows must be at least 1".into(),
            ));
        }
        if calculate_grid_geometry(
            (layout.canvas_width, layout.canvas_height),
            (layout.columns, layout.rows),
            layout.gap,
        )
        .is_none()
        {
            return Err(ConfigError::Validation(format!(
                "layout: {}x{} grid with gap {} leaves no room on a {}x{} canvas",
                layout.columns, layout.rows, layout.gap, layout.canvas_width, layout.canvas_height
            )));
        }
        if self.display.max_width == 0 {
            return Err(ConfigError::Validation(
                "display.max_width must be at least 1".into(),
            ));
        }
        for (i, kind) in self.display.menu.iter().enumerate() {
            if self.display.menu[..i].contains(kind) {
                return Err(ConfigError::Validation(format!(
                    "display.menu lists '{}' more than once",
                    kind.key()
                )));
            }
        }
        let command = &self.segmentation.command;
        if command.is_empty() {
            return Err(ConfigError::Validation(
                "segmentation.command must not be empty".into(),
            ));
        }
        for placeholder in ["{input}", "{output}"] {
            if !command[1..].iter().any(|arg| arg.contains(placeholder)) {
                return Err(ConfigError::Validation(format!(
                    "segmentation.command must pass {placeholder} to the program"
                )));
            }
        }
        Ok(())
    }
}

/// Passport photo settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PassportConfig {
    pub target_width: u32,
    pub target_height: u32,
    /// Border width in pixels on every side.
    pub border: u32,
    pub border_color: Color,
}

impl Default for PassportConfig {
    fn default() -> Self {
        let p = PassportParams::default();
        Self {
            target_width: p.target_width,
            target_height: p.target_height,
            border: p.border,
            border_color: p.border_color,
        }
    }
}

impl PassportConfig {
    pub fn params(&self) -> PassportParams {
        PassportParams {
            target_width: self.target_width,
            target_height: self.target_height,
            border: self.border,
            border_color: self.border_color,
        }
    }
}

/// Print sheet settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub columns: u32,
    pub rows: u32,
    /// Pixels between neighbouring photos.
    pub gap: u32,
    pub background: Color,
    /// Print resolution written into the exported JPEG. 0 writes none.
    pub dpi: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let l = LayoutParams::default();
        Self {
            canvas_width: l.canvas_width,
            canvas_height: l.canvas_height,
            columns: l.columns,
            rows: l.rows,
            gap: l.gap,
            background: l.background,
            dpi: 300,
        }
    }
}

impl LayoutConfig {
    pub fn params(&self) -> LayoutParams {
        LayoutParams {
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            columns: self.columns,
            rows: self.rows,
            gap: self.gap,
            background: self.background,
        }
    }

    pub fn dpi(&self) -> Option<u16> {
        (self.dpi > 0).then_some(self.dpi)
    }
}

/// Presentation settings.
///
/// Covers what used to differ between page variants: preview width and the
/// order tools are offered in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Previews wider than this are scaled down proportionally.
    pub max_width: u32,
    /// Tools in the order they are listed.
    pub menu: Vec<OperationKind>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_width: 500,
            menu: vec![
                OperationKind::Passport,
                OperationKind::RemoveBg,
                OperationKind::Layout,
                OperationKind::BgColor,
            ],
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// JPEG quality (1 = worst, 100 = best).
    pub jpeg_quality: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { jpeg_quality: 90 }
    }
}

impl ExportConfig {
    pub fn options(&self, dpi: Option<u16>) -> EncodeOptions {
        EncodeOptions {
            quality: Quality::new(self.jpeg_quality),
            dpi,
        }
    }
}

/// External background-removal program.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmentationConfig {
    /// Program and arguments. `{input}` and `{output}` are replaced by PNG
    /// paths in a scratch directory.
    pub command: Vec<String>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            command: ["rembg", "i", "{input}", "{output}"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(AppConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<AppConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: AppConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective config: stock defaults, overridden by `path` if given.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let overlay = path.map(load_raw_config).transpose()?;
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Photo Tools Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
#
# Colors are palette names (white, black, red, green, blue, gray, yellow)
# or hex strings: "#RGB", "#RRGGBB", "#RRGGBBAA".

# ---------------------------------------------------------------------------
# Passport photo
# ---------------------------------------------------------------------------
[passport]
# Photo size before the border. The source is stretched to exactly this size.
target_width = 531
target_height = 649

# Border width in pixels, added on every side.
border = 20
border_color = "white"

# ---------------------------------------------------------------------------
# Print layout (4x6 inch sheet at 300 DPI)
# ---------------------------------------------------------------------------
[layout]
canvas_width = 1200
canvas_height = 1800
columns = 2
rows = 3

# Pixels between neighbouring photos.
gap = 10
background = "white"

# Resolution written into the exported JPEG. 0 writes none.
dpi = 300

# ---------------------------------------------------------------------------
# Display
# ---------------------------------------------------------------------------
[display]
# Previews wider than this are scaled down proportionally.
max_width = 500

# Order tools are listed in: passport, remove-bg, layout, bg-color.
menu = ["passport", "remove-bg", "layout", "bg-color"]

# ---------------------------------------------------------------------------
# Export
# ---------------------------------------------------------------------------
[export]
# JPEG quality (1 = worst, 100 = best). Background removal is always PNG.
# PIL-based tools default to 75, which gives smaller files.
jpeg_quality = 90

# ---------------------------------------------------------------------------
# Background removal
# ---------------------------------------------------------------------------
[segmentation]
# Program that cuts the subject out. {input} and {output} are replaced by
# PNG paths; the program must write an RGBA PNG of the same size to {output}.
command = ["rembg", "i", "{input}", "{output}"]
"##
}
