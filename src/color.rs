//! Fill and background colors.
//!
//! A [`Color`] is four 8-bit channels. It can be written as one of the palette
//! names offered by the background-color tool (`white`, `black`, `red`,
//! `green`, `blue`, `gray`, `yellow`) or as a hex string: `#RGB`, `#RRGGBB`
//! or `#RRGGBBAA`. The leading `#` is optional and digits are
//! case-insensitive.
//!
//! Named colors keep their name, so `bg_red.jpg` reads better than
//! `bg_ff0000.jpg`. Equality only compares channels.

use image::{Rgb, Rgba};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("unknown color name '{0}' (expected one of: {names})", names = PALETTE_NAMES.join(", "))]
    UnknownName(String),
    #[error("invalid hex color '{0}' (expected #RGB, #RRGGBB or #RRGGBBAA)")]
    InvalidHex(String),
}

/// An RGBA color with an optional palette name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    #[serde(skip)]
    name: Option<&'static str>,
}

const PALETTE: &[(&str, [u8; 3])] = &[
    ("white", [255, 255, 255]),
    ("black", [0, 0, 0]),
    ("red", [255, 0, 0]),
    ("green", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("gray", [128, 128, 128]),
    ("yellow", [255, 255, 0]),
];

const PALETTE_NAMES: &[&str] = &["white", "black", "red", "green", "blue", "gray", "yellow"];

impl Color {
    pub const WHITE: Color = Color::named("white", 255, 255, 255);

    const fn named(name: &'static str, r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            a: 255,
            name: Some(name),
        }
    }

    /// Opaque color from three channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            a,
            name: None,
        }
    }

    /// Look up a palette color by name. `grey` is accepted for `gray`.
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let lookup = if lower == "grey" { "gray" } else { lower.as_str() };
        PALETTE
            .iter()
            .find(|(n, _)| *n == lookup)
            .map(|(n, [r, g, b])| Self::named(n, *r, *g, *b))
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let short = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::rgb(short(0)?, short(1)?, short(2)?))
            }
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(invalid()),
        }
    }

    /// Palette name, or lowercase hex digits without `#` (alpha only when not opaque).
    ///
    /// Used to build export file names such as `bg_red.jpg`.
    pub fn label(&self) -> String {
        match self.name {
            Some(name) => name.to_string(),
            None if self.a == 255 => format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b),
            None => format!(
                "{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            ),
        }
    }

    pub fn to_rgb(self) -> Rgb<u8> {
        Rgb([self.r, self.g, self.b])
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        (self.r, self.g, self.b, self.a) == (other.r, other.g, other.b, other.a)
    }
}

impl Eq for Color {}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(color) = Self::from_name(s) {
            return Ok(color);
        }
        let trimmed = s.trim();
        if trimmed.starts_with('#') || trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            Self::from_hex(trimmed)
        } else {
            Err(ColorError::UnknownName(trimmed.to_string()))
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "#{}", self.label()),
        }
    }
}
