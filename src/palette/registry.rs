use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

use super::{Gradient, PaletteSpec, Rgb};
use crate::error::{ChartError, Result};

/// Name of the palette used when a chart call does not ask for one.
pub const DEFAULT_PALETTE: &str = "vnstock";

/// Fallback color cycle used when a requested palette cannot be resolved.
pub const DEFAULT_CYCLE: &[Rgb] = &[
    Rgb::hex(0x1F77B4),
    Rgb::hex(0xFF7F0E),
    Rgb::hex(0x2CA02C),
    Rgb::hex(0xD62728),
    Rgb::hex(0x9467BD),
    Rgb::hex(0x8C564B),
    Rgb::hex(0xE377C2),
    Rgb::hex(0x7F7F7F),
    Rgb::hex(0xBCBD22),
    Rgb::hex(0x17BECF),
];

const BUILTIN: &[(&str, &[Rgb])] = &[
    (
        "percentage",
        &[
            Rgb::hex(0xD45F5F),
            Rgb::hex(0xF3C301),
            Rgb::hex(0xFEE3A2),
            Rgb::hex(0xADCACB),
            Rgb::hex(0x87C159),
            Rgb::hex(0x058240),
        ],
    ),
    (
        // light neutrals through deep ocean blue, for growing amounts
        "amount",
        &[
            Rgb::hex(0xE8EDE7),
            Rgb::hex(0xC4D3D5),
            Rgb::hex(0x81BECE),
            Rgb::hex(0xAEDCEA),
            Rgb::hex(0x378BA4),
            Rgb::hex(0x2B6C8A),
            Rgb::hex(0x6297B5),
            Rgb::hex(0x036280),
            Rgb::hex(0x012E4A),
            Rgb::hex(0x001D35),
        ],
    ),
    (
        "category",
        &[
            Rgb::hex(0x000000),
            Rgb::hex(0x8B0000),
            Rgb::hex(0xF8492E),
            Rgb::hex(0xFFC107),
            Rgb::hex(0x4CAF50),
            Rgb::hex(0x00F9F0),
            Rgb::hex(0x0072BB),
            Rgb::hex(0x00457E),
            Rgb::hex(0x5CAEFF),
            Rgb::hex(0xFB4C69),
        ],
    ),
    (
        "trend",
        &[
            Rgb::hex(0x017C5E),
            Rgb::hex(0x7D916A),
            Rgb::hex(0x1496BB),
            Rgb::hex(0xCF90B9),
            Rgb::hex(0x789BBA),
            Rgb::hex(0xD4C1CC),
            Rgb::hex(0x4D5C6F),
            Rgb::hex(0xF6DDB7),
            Rgb::hex(0xFCAF9F),
            Rgb::hex(0xE45332),
            Rgb::hex(0xBB191F),
        ],
    ),
    (
        // up, down, ceiling, floor
        "stock",
        &[
            Rgb::hex(0x70DB8F),
            Rgb::hex(0xFF4D4D),
            Rgb::hex(0xC44DFF),
            Rgb::hex(0x4DDBFF),
        ],
    ),
    (
        "flatui",
        &[
            Rgb::hex(0xFEDD78),
            Rgb::hex(0x348DC1),
            Rgb::hex(0xBA516B),
            Rgb::hex(0x4FA487),
            Rgb::hex(0x9B59B6),
            Rgb::hex(0x613F66),
        ],
    ),
    (
        "vnstock",
        &[
            Rgb::hex(0x2EB855),
            Rgb::hex(0x257CFF),
            Rgb::hex(0xDD390D),
            Rgb::hex(0x7A7A7A),
            Rgb::hex(0xFFFFFF),
        ],
    ),
    (
        "learn_anything",
        &[
            Rgb::hex(0x002E5D),
            Rgb::hex(0x00FF84),
            Rgb::hex(0xFFD700),
            Rgb::hex(0x808080),
        ],
    ),
    (
        "beach",
        &[
            Rgb::hex(0x217074),
            Rgb::hex(0x37745B),
            Rgb::hex(0x8B9D77),
            Rgb::hex(0xE7EAEF),
            Rgb::hex(0xEDC5AB),
        ],
    ),
    (
        "forest",
        &[
            Rgb::hex(0x162E1A),
            Rgb::hex(0x437A38),
            Rgb::hex(0x97B261),
            Rgb::hex(0xC5D7D7),
            Rgb::hex(0x536B69),
        ],
    ),
];

static SHARED: Lazy<PaletteRegistry> = Lazy::new(PaletteRegistry::builtin);

/// Read-only catalog of named palettes.
///
/// Built once and passed by reference; tests can construct their own catalogs with
/// [`PaletteRegistry::new`] and [`PaletteRegistry::with_palette`].
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    palettes: BTreeMap<String, Vec<Rgb>>,
}

impl PaletteRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in brand and thematic palettes.
    pub fn builtin() -> Self {
        let palettes = BUILTIN
            .iter()
            .map(|(name, colors)| (name.to_string(), colors.to_vec()))
            .collect();
        Self { palettes }
    }

    /// Process-wide instance of [`PaletteRegistry::builtin`], built on first use.
    pub fn shared() -> &'static PaletteRegistry {
        &SHARED
    }

    pub fn with_palette(mut self, name: impl Into<String>, colors: Vec<Rgb>) -> Self {
        self.insert(name, colors);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, colors: Vec<Rgb>) {
        self.palettes.insert(name.into(), colors);
    }

    pub fn get(&self, name: &str) -> Option<&[Rgb]> {
        self.palettes.get(name).map(Vec::as_slice)
    }

    /// Palette names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.palettes.keys().map(String::as_str).collect()
    }

    /// Resolve a palette name or pass a custom color list through unchanged.
    pub fn resolve(&self, spec: &PaletteSpec) -> Result<Vec<Rgb>> {
        match spec {
            PaletteSpec::Named(name) => {
                self.get(name)
                    .map(<[Rgb]>::to_vec)
                    .ok_or_else(|| ChartError::UnknownPalette {
                        name: name.clone(),
                        available: self.names().into_iter().map(str::to_string).collect(),
                    })
            }
            PaletteSpec::Custom(colors) => Ok(colors.clone()),
        }
    }

    /// Resolve `spec` and turn it into a continuous gradient called `name`.
    pub fn gradient_for(&self, spec: &PaletteSpec, name: &str) -> Result<Gradient> {
        build_gradient(self.resolve(spec)?, name)
    }
}

/// Randomly permute `colors` when `enabled`, otherwise return them untouched.
pub fn shuffle(colors: Vec<Rgb>, enabled: bool) -> Vec<Rgb> {
    shuffle_with(colors, enabled, &mut rand::thread_rng())
}

/// [`shuffle`] with a caller-provided random source.
pub fn shuffle_with<R: Rng + ?Sized>(mut colors: Vec<Rgb>, enabled: bool, rng: &mut R) -> Vec<Rgb> {
    if enabled {
        colors.shuffle(rng);
    }
    colors
}

/// Build a continuous gradient from discrete colors spread evenly over `[0, 1]`.
pub fn build_gradient(colors: Vec<Rgb>, name: &str) -> Result<Gradient> {
    Gradient::new(name, colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_builtin_palettes_resolve() {
        let registry = PaletteRegistry::builtin();
        for name in registry.names() {
            let spec = PaletteSpec::from(name);
            let first = registry.resolve(&spec).unwrap();
            let second = registry.resolve(&spec).unwrap();
            assert!(!first.is_empty(), "{name} is empty");
            assert_eq!(first, second);
        }
        assert_eq!(registry.names().len(), 10);
    }

    #[test]
    fn test_vnstock_colors() {
        let colors = PaletteRegistry::shared().resolve(&"vnstock".into()).unwrap();
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0].to_hex(), "#2EB855");
        assert_eq!(colors[4].to_hex(), "#FFFFFF");
    }

    #[test]
    fn test_unknown_palette_lists_keys() {
        let registry = PaletteRegistry::builtin();
        let err = registry.resolve(&"neon".into()).unwrap_err();
        match &err {
            ChartError::UnknownPalette { name, available } => {
                assert_eq!(name, "neon");
                assert!(available.iter().any(|k| k == "forest"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("Available palettes"));
    }

    #[test]
    fn test_custom_palette_passes_through() {
        let custom = vec![Rgb::hex(0x111111), Rgb::hex(0x222222)];
        let registry = PaletteRegistry::new();
        assert_eq!(
            registry.resolve(&PaletteSpec::Custom(custom.clone())).unwrap(),
            custom
        );
    }

    #[test]
    fn test_injected_catalog() {
        let registry = PaletteRegistry::new().with_palette("mono", vec![Rgb::hex(0x333333)]);
        assert_eq!(registry.names(), vec!["mono"]);
        assert!(registry.resolve(&"vnstock".into()).is_err());
    }

    #[test]
    fn test_shuffle_disabled_preserves_order() {
        let colors = PaletteRegistry::shared().get("trend").unwrap().to_vec();
        assert_eq!(shuffle(colors.clone(), false), colors);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let colors = PaletteRegistry::shared().get("category").unwrap().to_vec();
        let mut rng = StdRng::seed_from_u64(7);
        let mut shuffled = shuffle_with(colors.clone(), true, &mut rng);
        assert_eq!(shuffled.len(), colors.len());
        let mut expected = colors;
        expected.sort_by_key(|c| c.to_hex());
        shuffled.sort_by_key(|c| c.to_hex());
        assert_eq!(shuffled, expected);
    }

    #[test]
    fn test_gradient_for_named_palette() {
        let g = PaletteRegistry::shared()
            .gradient_for(&"stock".into(), "custom")
            .unwrap();
        assert_eq!(g.name(), "custom");
        assert_eq!(g.at(0.0).to_hex(), "#70DB8F");
        assert_eq!(g.at(1.0).to_hex(), "#4DDBFF");
        assert!(matches!(build_gradient(vec![], "empty"), Err(ChartError::EmptyPalette)));
    }
}
