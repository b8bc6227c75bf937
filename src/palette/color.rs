use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ChartError, Result};

/// An opaque 8-bit RGB color.
///
/// Parses `#RRGGBB`, `#RGB` and a handful of CSS color names, and always prints as
/// uppercase `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED: &[(&str, Rgb)] = &[
    ("black", Rgb::hex(0x000000)),
    ("white", Rgb::hex(0xFFFFFF)),
    ("red", Rgb::hex(0xFF0000)),
    ("green", Rgb::hex(0x008000)),
    ("blue", Rgb::hex(0x0000FF)),
    ("yellow", Rgb::hex(0xFFFF00)),
    ("orange", Rgb::hex(0xFFA500)),
    ("purple", Rgb::hex(0x800080)),
    ("gray", Rgb::hex(0x808080)),
    ("grey", Rgb::hex(0x808080)),
    ("lightgray", Rgb::hex(0xD3D3D3)),
    ("lightgrey", Rgb::hex(0xD3D3D3)),
    ("whitesmoke", Rgb::hex(0xF5F5F5)),
];

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` literal.
    pub const fn hex(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Some(digits) = trimmed.strip_prefix('#') {
            return Self::parse_digits(digits).ok_or_else(|| ChartError::InvalidColor(s.to_string()));
        }
        let lower = trimmed.to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, c)| *c)
            .ok_or_else(|| ChartError::InvalidColor(s.to_string()))
    }

    fn parse_digits(digits: &str) -> Option<Self> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::hex),
            3 => {
                let v = u32::from_str_radix(digits, 16).ok()?;
                let expand = |n: u32| (n * 17) as u8;
                Some(Self::new(expand((v >> 8) & 0xF), expand((v >> 4) & 0xF), expand(v & 0xF)))
            }
            _ => None,
        }
    }

    /// Linear interpolation in RGB space; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Relative luminance in `[0, 1]`, used to pick readable text over a fill.
    pub fn luminance(self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::parse(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = ChartError;

    fn try_from(s: String) -> Result<Self> {
        Rgb::parse(&s)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

impl From<Rgb> for plotters::style::RGBColor {
    fn from(c: Rgb) -> Self {
        plotters::style::RGBColor(c.r, c.g, c.b)
    }
}
