use log::debug;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::{color_at, extra_or, ChartKind, PlotOptions, Plotter};
use crate::chart::{Annotation, Chart, Label, Markers, Patch, PatchKind, Ticks};
use crate::error::{ChartError, Result};
use crate::palette::Rgb;
use crate::style::NumberFormat;
use crate::types::{finite_min_max, DataFrame};
use crate::utils::histogram;

const PAIRPLOT_CELL_INCHES: f64 = 2.5;
const PAIRPLOT_BINS: usize = 10;

/// Heatmap-specific options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapOptions {
    /// Write each cell's value inside it
    pub annotate: bool,
    /// Template for annotations; two decimals when unset
    pub annot_format: Option<NumberFormat>,
}

impl Plotter {
    /// Heatmap of a matrix: row 0 at the top, cells colored by a gradient of the palette over
    /// the finite data range. Empty label slices fall back to the row and column numbers.
    pub fn heatmap(
        &self,
        data: &Array2<f64>,
        row_labels: &[String],
        col_labels: &[String],
        heat: &HeatmapOptions,
        opts: &PlotOptions,
    ) -> Result<Chart> {
        let (n_rows, n_cols) = data.dim();
        if n_rows == 0 || n_cols == 0 {
            return Err(ChartError::EmptyData("heatmap needs a non-empty matrix".into()));
        }
        let rows = labels_or_positions(row_labels, n_rows)?;
        let cols = labels_or_positions(col_labels, n_cols)?;
        let values: Vec<f64> = data.iter().copied().collect();
        let (min, max) = finite_min_max(&values).unwrap_or((0.0, 1.0));
        let gradient = self.gradient(opts, "heatmap")?;

        let mut chart = Chart::new();
        let axes = chart.primary_mut();
        for ((i, j), &value) in data.indexed_iter() {
            if !value.is_finite() {
                continue;
            }
            let fill = gradient.map(value, min, max);
            let (x, y) = (j as f64, (n_rows - 1 - i) as f64);
            axes.patches.push(Patch::new(PatchKind::Cell, (x - 0.5, y - 0.5), (x + 0.5, y + 0.5), fill, value));
            if heat.annotate {
                let text = match &heat.annot_format {
                    Some(fmt) => fmt.format(value),
                    None => format!("{:.2}", value),
                };
                let ink = if fill.luminance() < 0.5 { Rgb::hex(0xFFFFFF) } else { Rgb::hex(0x000000) };
                axes.annotations.push(Annotation::new(text, (x, y), 9.0, ink));
            }
        }
        axes.x.ticks = Ticks::Categories(cols);
        // Row 0 sits at the top, so the y categories run bottom-up.
        axes.y.ticks = Ticks::Categories(rows.into_iter().rev().collect());
        axes.x.tick_rotation = 90.0;
        debug!("Heatmap value range [{}, {}]", min, max);

        Ok(self.finish(ChartKind::Heatmap, chart, opts))
    }

    /// Grid of pairwise relationships: histograms on the diagonal, scatter plots elsewhere.
    pub fn pairplot(&self, data: &DataFrame, opts: &PlotOptions) -> Result<Chart> {
        if data.is_empty() {
            return Err(ChartError::EmptyData("pair plot needs at least one row and column".into()));
        }
        let k = data.n_columns();
        let columns: Vec<(&str, &[f64])> = data.columns().collect();
        let colors = self.colors(&opts.palette, opts.palette_shuffle);
        let color = color_at(&colors, 0);
        let marker_size = extra_or(&opts.style, "marker_size", 3.0).max(1.0) as u32;
        let alpha = extra_or(&opts.style, "alpha", 0.8);

        let mut chart = Chart::with_grid(k, k);
        let side = PAIRPLOT_CELL_INCHES * k as f64;
        chart.figure.size = (side, side);
        for (r, &(row_name, row_values)) in columns.iter().enumerate() {
            for (c, &(col_name, col_values)) in columns.iter().enumerate() {
                let axes = &mut chart.axes_mut()[r * k + c];
                if r == c {
                    let (edges, counts) = histogram(&[row_values], PAIRPLOT_BINS);
                    for (b, &count) in counts[0].iter().enumerate() {
                        let mut patch = Patch::new(
                            PatchKind::Bin,
                            (edges[b], 0.0),
                            (edges[b + 1], count as f64),
                            color,
                            count as f64,
                        );
                        patch.edge = Some(Rgb::hex(0xFFFFFF));
                        axes.patches.push(patch);
                    }
                } else {
                    let points = col_values
                        .iter()
                        .zip(row_values)
                        .filter(|(x, y)| x.is_finite() && y.is_finite())
                        .map(|(x, y)| (*x, *y))
                        .collect();
                    axes.markers.push(Markers {
                        points,
                        color,
                        size: marker_size,
                        alpha,
                    });
                }
                if r == k - 1 {
                    axes.x.label = Some(col_name.to_string());
                }
                if c == 0 {
                    axes.y.label = Some(row_name.to_string());
                }
            }
        }

        let mut config = opts.style.retain(ChartKind::Pairplot.style_fields());
        if let Some(title) = config.title.take() {
            let size = config.title_fontsize.unwrap_or(self.applier().defaults().title_size);
            chart.figure.suptitle = Some(Label::new(title, size).bold());
        }
        for index in 0..chart.axes().len() {
            if let Some((figure, axes)) = chart.split_mut(index) {
                self.applier().apply_axes(figure, axes, &config);
            }
        }
        debug!("Built {} chart with {}x{} cells", ChartKind::Pairplot, k, k);
        Ok(chart)
    }
}

fn labels_or_positions(labels: &[String], n: usize) -> Result<Vec<String>> {
    if labels.is_empty() {
        return Ok((0..n).map(|i| i.to_string()).collect());
    }
    if labels.len() != n {
        return Err(ChartError::LengthMismatch {
            expected: n,
            found: labels.len(),
        });
    }
    Ok(labels.to_vec())
}
