//! Color palettes: the built-in catalog, custom color lists, shuffling and gradients.

mod color;
mod gradient;
mod registry;

pub use color::Rgb;
pub use gradient::Gradient;
pub use registry::{
    build_gradient, shuffle, shuffle_with, PaletteRegistry, DEFAULT_CYCLE, DEFAULT_PALETTE,
};

use serde::{Deserialize, Serialize};

/// Either the name of a catalog palette or an explicit list of colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteSpec {
    Named(String),
    Custom(Vec<Rgb>),
}

impl Default for PaletteSpec {
    fn default() -> Self {
        PaletteSpec::Named(DEFAULT_PALETTE.to_string())
    }
}

impl From<&str> for PaletteSpec {
    fn from(name: &str) -> Self {
        PaletteSpec::Named(name.to_string())
    }
}

impl From<String> for PaletteSpec {
    fn from(name: String) -> Self {
        PaletteSpec::Named(name)
    }
}

impl From<Vec<Rgb>> for PaletteSpec {
    fn from(colors: Vec<Rgb>) -> Self {
        PaletteSpec::Custom(colors)
    }
}
