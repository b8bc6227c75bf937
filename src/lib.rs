//! # Opinionated Chart Helpers
//!
//! `ezchart` builds common business and finance charts with one call each and applies a
//! consistent look on top of `plotters`: branded color palettes, titles, legends, readable
//! data labels and tick formats.
//!
//! ## Features
//!
//! - Bar, histogram, pie, time series, heatmap, scatter, treemap, box plot, word cloud, pair
//!   plot, table and bar-plus-line combo charts
//! - Built-in palette catalog with custom color lists, shuffling and gradients
//! - Style options scoped to each chart, loadable from JSON
//! - PNG, JPEG, BMP and SVG output, plus async PNG rendering
//! - Local font cache
//!
//! ## Example
//!
//! ```no_run
//! use ezchart::{DataFrame, PlotOptions, Plotter, StyleConfig};
//!
//! let data = DataFrame::new(vec!["Q1".into(), "Q2".into(), "Q3".into()])
//!     .with_column("revenue", vec![1_200_000.0, 1_450_000.0, 1_380_000.0])?;
//! let opts = PlotOptions::new()
//!     .palette("vnstock")
//!     .style(StyleConfig::new().title("Revenue").data_labels(true));
//!
//! let chart = Plotter::default().bar(&data, &opts)?;
//! chart.save("revenue.png")?;
//! # Ok::<(), ezchart::ChartError>(())
//! ```

pub mod chart;
pub mod charts;
pub mod error;
pub mod fonts;
pub mod help;
pub mod palette;
pub mod plotting;
pub mod style;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use chart::Chart;
pub use charts::{ChartKind, HeatmapOptions, PlotOptions, Plotter, TableOptions, TitleLoc, WordCloudOptions};
pub use error::{ChartError, Result};
pub use fonts::{DirectoryFontSource, FontSource, FontStore};
pub use help::{help, print_help};
pub use palette::{PaletteRegistry, PaletteSpec, Rgb};
pub use plotting::{render_png_async, Renderer};
pub use style::{readable_format, NumberFormat, StyleConfig};
pub use types::{DataFrame, Series};
