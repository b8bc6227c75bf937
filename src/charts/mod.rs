//! # Chart Entry Points
//!
//! Every entry point runs the same pipeline: resolve the palette (falling back to the default
//! color cycle when the name is unknown), optionally shuffle it, build the chart elements, apply
//! the style config scoped to the chart kind, and hand the chart back to the caller.

mod basic;
pub mod layout;
mod matrix;
mod special;

#[cfg(test)]
mod tests;

pub use matrix::HeatmapOptions;
pub use special::{TableOptions, TitleLoc, WordCloudOptions};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::chart::Chart;
use crate::error::Result;
use crate::palette::{build_gradient, shuffle, Gradient, PaletteRegistry, PaletteSpec, Rgb, DEFAULT_CYCLE};
use crate::style::{StyleApplier, StyleConfig, StyleField};

/// Options shared by every entry point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotOptions {
    pub palette: PaletteSpec,
    pub palette_shuffle: bool,
    pub style: StyleConfig,
}

impl PlotOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palette(mut self, palette: impl Into<PaletteSpec>) -> Self {
        self.palette = palette.into();
        self
    }

    pub fn shuffled(mut self, on: bool) -> Self {
        self.palette_shuffle = on;
        self
    }

    pub fn style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }
}

/// The chart kinds this crate can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Bar,
    Hist,
    Pie,
    Timeseries,
    Heatmap,
    Scatter,
    Treemap,
    Boxplot,
    Wordcloud,
    Pairplot,
    Table,
    Combo,
}

impl ChartKind {
    pub const ALL: &'static [ChartKind] = &[
        ChartKind::Bar,
        ChartKind::Hist,
        ChartKind::Pie,
        ChartKind::Timeseries,
        ChartKind::Heatmap,
        ChartKind::Scatter,
        ChartKind::Treemap,
        ChartKind::Boxplot,
        ChartKind::Wordcloud,
        ChartKind::Pairplot,
        ChartKind::Table,
        ChartKind::Combo,
    ];

    /// Name of the entry point building this kind.
    pub fn name(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Hist => "hist",
            ChartKind::Pie => "pie",
            ChartKind::Timeseries => "timeseries",
            ChartKind::Heatmap => "heatmap",
            ChartKind::Scatter => "scatter",
            ChartKind::Treemap => "treemap",
            ChartKind::Boxplot => "boxplot",
            ChartKind::Wordcloud => "wordcloud",
            ChartKind::Pairplot => "pairplot",
            ChartKind::Table => "table",
            ChartKind::Combo => "combo_chart",
        }
    }

    /// Style fields honored by this kind. Word clouds and tables take their own option
    /// structs and ignore the shared style config.
    pub fn style_fields(self) -> &'static [StyleField] {
        match self {
            ChartKind::Bar | ChartKind::Hist | ChartKind::Timeseries => StyleField::ALL,
            ChartKind::Pie => StyleField::PIE,
            ChartKind::Heatmap => StyleField::HEATMAP,
            ChartKind::Scatter | ChartKind::Boxplot => StyleField::NO_DATA_LABELS,
            ChartKind::Pairplot => StyleField::PAIRPLOT,
            ChartKind::Combo => StyleField::COMBO,
            ChartKind::Treemap => StyleField::SUPTITLE,
            ChartKind::Wordcloud | ChartKind::Table => &[],
        }
    }

    pub fn from_name(name: &str) -> Option<ChartKind> {
        ChartKind::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds charts from a palette registry and a style applier.
///
/// Both collaborators are injected so tests can run against a custom catalog; the default
/// plotter uses the built-in palettes.
#[derive(Debug, Clone)]
pub struct Plotter {
    registry: PaletteRegistry,
    applier: StyleApplier,
}

impl Default for Plotter {
    fn default() -> Self {
        Self::new(PaletteRegistry::builtin(), StyleApplier::default())
    }
}

impl Plotter {
    pub fn new(registry: PaletteRegistry, applier: StyleApplier) -> Self {
        Self { registry, applier }
    }

    pub fn registry(&self) -> &PaletteRegistry {
        &self.registry
    }

    pub fn applier(&self) -> &StyleApplier {
        &self.applier
    }

    /// Resolve and optionally shuffle the palette. Never fails: unknown names and empty
    /// custom lists fall back to the default color cycle with a warning.
    pub fn colors(&self, palette: &PaletteSpec, shuffle_colors: bool) -> Vec<Rgb> {
        let colors = match self.registry.resolve(palette) {
            Ok(colors) if !colors.is_empty() => colors,
            Ok(_) => {
                warn!("Empty custom palette, using the default color cycle");
                DEFAULT_CYCLE.to_vec()
            }
            Err(e) => {
                warn!("{}; using the default color cycle", e);
                DEFAULT_CYCLE.to_vec()
            }
        };
        shuffle(colors, shuffle_colors)
    }

    fn gradient(&self, opts: &PlotOptions, name: &str) -> Result<Gradient> {
        build_gradient(self.colors(&opts.palette, opts.palette_shuffle), name)
    }

    /// Apply `opts.style`, scoped to the fields `kind` honors, to the primary axes.
    fn finish(&self, kind: ChartKind, mut chart: Chart, opts: &PlotOptions) -> Chart {
        let config = opts.style.retain(kind.style_fields());
        self.applier.apply(&mut chart, &config);
        debug!("Built {} chart with {} axes", kind, chart.axes().len());
        chart
    }
}

/// Palette color for series `i`, cycling when there are more series than colors.
fn color_at(colors: &[Rgb], i: usize) -> Rgb {
    if colors.is_empty() {
        return DEFAULT_CYCLE[i % DEFAULT_CYCLE.len()];
    }
    colors[i % colors.len()]
}

/// Numeric pass-through option with a fallback.
fn extra_or(style: &StyleConfig, key: &str, default: f64) -> f64 {
    style.extra_f64(key).unwrap_or(default)
}
