use chrono::{NaiveDate, NaiveDateTime, Timelike};
use log::{debug, warn};
use statrs::statistics::{Data, OrderStatistics};

use super::{color_at, extra_or, ChartKind, PlotOptions, Plotter};
use crate::chart::{Anchor, Annotation, Chart, LegendKind, Line, Markers, Patch, PatchKind, Ticks, Wedge};
use crate::error::{ChartError, Result};
use crate::palette::Rgb;
use crate::types::{DataFrame, Series};
use crate::utils::{aggregate_points, histogram};

/// Time series longer than this are averaged down before drawing.
const TIMESERIES_TARGET_POINTS: usize = 500;
const DEFAULT_BAR_WIDTH: f64 = 0.8;
const DEFAULT_LINE_WIDTH: f64 = 2.0;
const PIE_LABEL_RADIUS: f64 = 1.1;
const PIE_PCT_RADIUS: f64 = 0.6;
const PIE_TEXT_SIZE: f64 = 10.0;

impl Plotter {
    /// Grouped bar chart: one bar per row and column, one color per column.
    pub fn bar(&self, data: &DataFrame, opts: &PlotOptions) -> Result<Chart> {
        if data.is_empty() {
            return Err(ChartError::EmptyData("bar chart needs at least one row and column".into()));
        }
        let colors = self.colors(&opts.palette, opts.palette_shuffle);
        let group_width = extra_or(&opts.style, "width", DEFAULT_BAR_WIDTH);
        let alpha = extra_or(&opts.style, "alpha", 1.0);
        let n = data.n_columns();
        let bar_width = group_width / n as f64;

        let mut chart = Chart::new();
        let axes = chart.primary_mut();
        for (j, (name, values)) in data.columns().enumerate() {
            let color = color_at(&colors, j);
            for (i, v) in values.iter().enumerate().filter(|(_, v)| v.is_finite()) {
                let left = i as f64 - group_width / 2.0 + bar_width * j as f64;
                let mut patch = Patch::new(PatchKind::Bar, (left, 0.0), (left + bar_width, *v), color, *v);
                patch.alpha = alpha;
                axes.patches.push(patch);
            }
            axes.legend.push(name, color, LegendKind::Swatch);
        }
        axes.x.ticks = Ticks::Categories(data.index().to_vec());
        axes.x.tick_rotation = 90.0;
        axes.legend.visible = n > 1;

        Ok(self.finish(ChartKind::Bar, chart, opts))
    }

    /// Histogram with `bins` equal-width bins shared by every column.
    pub fn hist(&self, data: &DataFrame, bins: usize, opts: &PlotOptions) -> Result<Chart> {
        if bins == 0 {
            return Err(ChartError::InvalidInput("histogram needs at least one bin".into()));
        }
        if data.is_empty() {
            return Err(ChartError::EmptyData("histogram needs at least one value".into()));
        }
        let colors = self.colors(&opts.palette, opts.palette_shuffle);
        let n = data.n_columns();
        let alpha = extra_or(&opts.style, "alpha", if n > 1 { 0.5 } else { 1.0 });
        let columns: Vec<&[f64]> = data.columns().map(|(_, v)| v).collect();
        let (edges, counts) = histogram(&columns, bins);

        let mut chart = Chart::new();
        let axes = chart.primary_mut();
        for (j, (name, _)) in data.columns().enumerate() {
            let color = color_at(&colors, j);
            for (k, &count) in counts[j].iter().enumerate() {
                let mut patch = Patch::new(
                    PatchKind::Bin,
                    (edges[k], 0.0),
                    (edges[k + 1], count as f64),
                    color,
                    count as f64,
                );
                patch.alpha = alpha;
                axes.patches.push(patch);
            }
            axes.legend.push(name, color, LegendKind::Swatch);
        }
        axes.y.label = Some("Frequency".to_string());
        axes.legend.visible = n > 1;

        Ok(self.finish(ChartKind::Hist, chart, opts))
    }

    /// Pie chart of a series; wedges follow the index order counter-clockwise from 3 o'clock.
    pub fn pie(&self, data: &Series, opts: &PlotOptions) -> Result<Chart> {
        if let Some(bad) = data.values.iter().find(|v| v.is_nan() || **v < 0.0) {
            return Err(ChartError::InvalidInput(format!("pie values must be non-negative, got {}", bad)));
        }
        let total: f64 = data.values.iter().sum();
        if data.is_empty() || total <= 0.0 {
            return Err(ChartError::EmptyData("pie values sum to zero".into()));
        }
        let colors = self.colors(&opts.palette, opts.palette_shuffle);
        let text_color = self.applier().defaults().text_color;

        let mut chart = Chart::new();
        let axes = chart.primary_mut();
        let mut start = 0.0;
        for (i, (label, value)) in data.index.iter().zip(&data.values).enumerate() {
            let share = value / total;
            let wedge = Wedge {
                start,
                end: start + share * 360.0,
                color: color_at(&colors, i),
                label: label.clone(),
                value: *value,
            };
            start = wedge.end;

            let (lx, _) = wedge.point_at(PIE_LABEL_RADIUS);
            let mut name = Annotation::new(label.clone(), wedge.point_at(PIE_LABEL_RADIUS), PIE_TEXT_SIZE, text_color);
            name.anchor = if lx >= 0.0 { Anchor::Left } else { Anchor::Right };
            axes.annotations.push(name);
            axes.annotations.push(Annotation::new(
                format!("{:.1}%", share * 100.0),
                wedge.point_at(PIE_PCT_RADIUS),
                PIE_TEXT_SIZE,
                text_color,
            ));
            axes.legend.push(label.clone(), wedge.color, LegendKind::Swatch);
            axes.wedges.push(wedge);
        }
        axes.x.visible = false;
        axes.y.visible = false;
        axes.frame_on = false;

        Ok(self.finish(ChartKind::Pie, chart, opts))
    }

    /// One line per column over a date index (`%Y-%m-%d` or `%Y-%m-%d %H:%M:%S`).
    pub fn timeseries(&self, data: &DataFrame, opts: &PlotOptions) -> Result<Chart> {
        if data.is_empty() {
            return Err(ChartError::EmptyData("time series needs at least one row and column".into()));
        }
        let dates = data
            .index()
            .iter()
            .map(String::as_str)
            .map(parse_date)
            .collect::<Result<Vec<_>>>()?;
        let origin = dates.iter().min().copied().ok_or_else(|| ChartError::EmptyData("no dates".into()))?;
        let xs: Vec<f64> = dates
            .iter()
            .map(|d| (*d - origin).num_seconds() as f64 / 86_400.0)
            .collect();
        let has_time = dates.iter().any(|d| d.num_seconds_from_midnight() != 0);

        let colors = self.colors(&opts.palette, opts.palette_shuffle);
        let width = extra_or(&opts.style, "linewidth", DEFAULT_LINE_WIDTH).max(1.0) as u32;
        let mut chart = Chart::new();
        let axes = chart.primary_mut();
        for (j, (name, values)) in data.columns().enumerate() {
            let color = color_at(&colors, j);
            let mut points: Vec<(f64, f64)> = xs.iter().copied().zip(values.iter().copied()).collect();
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            let points = aggregate_points(&points, TIMESERIES_TARGET_POINTS);
            debug!("Column '{}' drawn with {} points", name, points.len());
            axes.lines.push(Line { points, color, width });
            axes.legend.push(name, color, LegendKind::Line);
        }
        axes.x.ticks = Ticks::Dates {
            origin,
            format: if has_time { "%Y-%m-%d %H:%M" } else { "%Y-%m-%d" }.to_string(),
        };
        axes.legend.visible = data.n_columns() > 1;

        Ok(self.finish(ChartKind::Timeseries, chart, opts))
    }

    /// Scatter plot of column `y` against column `x`.
    pub fn scatter(&self, data: &DataFrame, x: &str, y: &str, opts: &PlotOptions) -> Result<Chart> {
        let xs = data.column(x)?;
        let ys = data.column(y)?;
        let colors = self.colors(&opts.palette, opts.palette_shuffle);
        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(ys)
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(|(a, b)| (*a, *b))
            .collect();
        if points.len() < xs.len() {
            debug!("Dropped {} non-finite points", xs.len() - points.len());
        }

        let mut chart = Chart::new();
        let axes = chart.primary_mut();
        axes.markers.push(Markers {
            points,
            color: color_at(&colors, 0),
            size: extra_or(&opts.style, "marker_size", 4.0).max(1.0) as u32,
            alpha: extra_or(&opts.style, "alpha", 1.0),
        });
        axes.legend.push(format!("{} vs {}", y, x), color_at(&colors, 0), LegendKind::Marker);
        axes.x.label = Some(x.to_string());
        axes.y.label = Some(y.to_string());

        Ok(self.finish(ChartKind::Scatter, chart, opts))
    }

    /// Box plot per column: quartile box, median line, whiskers at the furthest points within
    /// 1.5 IQR, and outliers as markers.
    pub fn boxplot(&self, data: &DataFrame, opts: &PlotOptions) -> Result<Chart> {
        let colors = self.colors(&opts.palette, opts.palette_shuffle);
        let alpha = extra_or(&opts.style, "alpha", 1.0);
        let dark = Rgb::hex(0x000000);

        let mut chart = Chart::new();
        let axes = chart.primary_mut();
        let mut drawn = 0;
        for (j, (name, values)) in data.columns().enumerate() {
            let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
            if finite.is_empty() {
                warn!("Column '{}' has no finite values, skipping its box", name);
                continue;
            }
            let stats = BoxStats::compute(finite);
            let color = color_at(&colors, j);
            let x = j as f64;
            let half = 0.25;

            let mut body = Patch::new(PatchKind::Box, (x - half, stats.q1), (x + half, stats.q3), color, stats.median);
            body.alpha = alpha;
            body.edge = Some(dark);
            axes.patches.push(body);

            let segment = |a: (f64, f64), b: (f64, f64), width: u32| Line { points: vec![a, b], color: dark, width };
            axes.lines.push(segment((x - half, stats.median), (x + half, stats.median), 2));
            axes.lines.push(segment((x, stats.q1), (x, stats.low), 1));
            axes.lines.push(segment((x, stats.q3), (x, stats.high), 1));
            axes.lines.push(segment((x - half / 2.0, stats.low), (x + half / 2.0, stats.low), 1));
            axes.lines.push(segment((x - half / 2.0, stats.high), (x + half / 2.0, stats.high), 1));
            if !stats.outliers.is_empty() {
                axes.markers.push(Markers {
                    points: stats.outliers.iter().map(|v| (x, *v)).collect(),
                    color: dark,
                    size: extra_or(&opts.style, "marker_size", 3.0).max(1.0) as u32,
                    alpha: 1.0,
                });
            }
            axes.legend.push(name, color, LegendKind::Swatch);
            drawn += 1;
        }
        if drawn == 0 {
            return Err(ChartError::EmptyData("box plot needs at least one finite value".into()));
        }
        axes.x.ticks = Ticks::Categories(data.column_names().into_iter().map(str::to_string).collect());

        Ok(self.finish(ChartKind::Boxplot, chart, opts))
    }

    /// Bars on the primary axes and a line on a twin axes sharing x, with one merged legend.
    pub fn combo_chart(
        &self,
        bars: &Series,
        line: &Series,
        left_ylabel: &str,
        right_ylabel: &str,
        opts: &PlotOptions,
    ) -> Result<Chart> {
        if bars.len() != line.len() {
            return Err(ChartError::LengthMismatch {
                expected: bars.len(),
                found: line.len(),
            });
        }
        if bars.is_empty() {
            return Err(ChartError::EmptyData("combo chart needs at least one row".into()));
        }
        let colors = self.colors(&opts.palette, opts.palette_shuffle);
        let (bar_color, line_color) = (color_at(&colors, 0), color_at(&colors, 1));
        let width = extra_or(&opts.style, "width", DEFAULT_BAR_WIDTH);
        let line_width = extra_or(&opts.style, "linewidth", DEFAULT_LINE_WIDTH).max(1.0) as u32;

        let mut chart = Chart::new();
        {
            let primary = chart.primary_mut();
            for (i, v) in bars.values.iter().enumerate().filter(|(_, v)| v.is_finite()) {
                let x = i as f64;
                primary.patches.push(Patch::new(
                    PatchKind::Bar,
                    (x - width / 2.0, 0.0),
                    (x + width / 2.0, *v),
                    bar_color,
                    *v,
                ));
            }
            primary.x.ticks = Ticks::Categories(bars.index.clone());
            primary.y.label = Some(left_ylabel.to_string());
        }

        let twin = chart.twin_x(0);
        {
            let points: Vec<(f64, f64)> = line
                .values
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, v)| (i as f64, *v))
                .collect();
            let secondary = &mut chart.axes_mut()[twin];
            secondary.lines.push(Line {
                points,
                color: line_color,
                width: line_width,
            });
            secondary.y.label = Some(right_ylabel.to_string());
        }

        // Entries of both axes, bars first, on the primary legend.
        let legend = &mut chart.primary_mut().legend;
        legend.push(bars.name.clone().unwrap_or_else(|| "bars".into()), bar_color, LegendKind::Swatch);
        legend.push(line.name.clone().unwrap_or_else(|| "line".into()), line_color, LegendKind::Line);
        legend.visible = true;

        let config = opts.style.retain(ChartKind::Combo.style_fields());
        let applier = self.applier();
        for index in [0, twin] {
            if let Some((figure, axes)) = chart.split_mut(index) {
                applier.apply_axes(figure, axes, &config);
                // Both y labels are set here, not through the style's ylabel.
                if opts.style.label_fontsize.is_some() {
                    axes.y.label_size = opts.style.label_fontsize;
                }
            }
        }
        debug!("Built {} chart", ChartKind::Combo);
        Ok(chart)
    }
}

fn parse_date(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| ChartError::InvalidDate(s.to_string()))
}

/// Five-number summary of one box.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub low: f64,
    pub high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summary of non-empty finite `values`.
    pub(crate) fn compute(values: Vec<f64>) -> Self {
        let mut data = Data::new(values.clone());
        let q1 = data.quantile(0.25);
        let median = data.quantile(0.5);
        let q3 = data.quantile(0.75);
        let iqr = q3 - q1;
        let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside = values.iter().copied().filter(|v| *v >= lo_fence && *v <= hi_fence);
        let low = inside.clone().fold(f64::INFINITY, f64::min).min(q1);
        let high = inside.fold(f64::NEG_INFINITY, f64::max).max(q3);
        let outliers = values.into_iter().filter(|v| *v < lo_fence || *v > hi_fence).collect();
        Self {
            q1,
            median,
            q3,
            low,
            high,
            outliers,
        }
    }
}
