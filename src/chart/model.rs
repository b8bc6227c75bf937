use chrono::{Duration, NaiveDateTime};

use super::elements::{Anchor, Annotation, Legend, Line, Markers, Patch, Table, Wedge};
use crate::palette::Rgb;
use crate::style::NumberFormat;
use crate::types::finite_min_max;

/// Default figure size in inches.
pub const DEFAULT_FIGSIZE: (f64, f64) = (6.4, 4.8);
pub const DEFAULT_DPI: u32 = 100;
pub const DEFAULT_FONT: &str = "sans-serif";

/// Styled text: titles and suptitles.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub size: f64,
    pub bold: bool,
    pub color: Rgb,
    pub align: Anchor,
}

impl Label {
    pub fn new(text: impl Into<String>, size: f64) -> Self {
        Self {
            text: text.into(),
            size,
            bold: false,
            color: Rgb::hex(0x000000),
            align: Anchor::Center,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Figure-level properties shared by every axes of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Width and height in inches
    pub size: (f64, f64),
    pub dpi: u32,
    pub facecolor: Rgb,
    /// Font family used for every text element of this chart
    pub font_family: String,
    pub suptitle: Option<Label>,
    /// Subplot grid as (rows, columns)
    pub grid: (usize, usize),
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            size: DEFAULT_FIGSIZE,
            dpi: DEFAULT_DPI,
            facecolor: Rgb::hex(0xFFFFFF),
            font_family: DEFAULT_FONT.to_string(),
            suptitle: None,
            grid: (1, 1),
        }
    }
}

impl Figure {
    /// Output size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f64| ((inches * self.dpi as f64).round() as u32).max(1);
        (px(self.size.0), px(self.size.1))
    }
}

/// How tick positions along an axis are labeled.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Ticks {
    #[default]
    Numeric,
    /// One label per integer position `0..n`
    Categories(Vec<String>),
    /// Positions are days since `origin`, labeled with a chrono format string
    Dates { origin: NaiveDateTime, format: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub label: Option<String>,
    pub label_size: Option<f64>,
    pub visible: bool,
    pub limits: Option<(f64, f64)>,
    pub tick_format: Option<NumberFormat>,
    pub tick_label_size: Option<f64>,
    /// Tick label rotation in degrees
    pub tick_rotation: f64,
    pub ticks: Ticks,
}

impl Default for Axis {
    fn default() -> Self {
        Self {
            label: None,
            label_size: None,
            visible: true,
            limits: None,
            tick_format: None,
            tick_label_size: None,
            tick_rotation: 0.0,
            ticks: Ticks::Numeric,
        }
    }
}

impl Axis {
    /// Text for the tick at `value`. Categorical axes only label integer positions.
    pub fn tick_label(&self, value: f64) -> String {
        match &self.ticks {
            Ticks::Categories(names) => {
                let pos = value.round();
                if (value - pos).abs() > 1e-6 || pos < 0.0 {
                    return String::new();
                }
                names.get(pos as usize).cloned().unwrap_or_default()
            }
            Ticks::Dates { origin, format } => {
                // Values are days from the origin; out-of-range ticks stay blank.
                let seconds = (value * 86_400.0).round();
                if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
                    return String::new();
                }
                Duration::try_seconds(seconds as i64)
                    .and_then(|offset| origin.checked_add_signed(offset))
                    .map(|at| at.format(format).to_string())
                    .unwrap_or_default()
            }
            Ticks::Numeric => match &self.tick_format {
                Some(fmt) => fmt.format(value),
                None => default_tick_label(value),
            },
        }
    }
}

fn default_tick_label(value: f64) -> String {
    if value.abs() >= 1e6 || (value != 0.0 && value.abs() < 1e-3) {
        format!("{:.1e}", value)
    } else if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        let s = format!("{:.3}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// One plotting area and everything drawn on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    /// Position in the figure grid as (row, column)
    pub cell: (usize, usize),
    /// Index of the axes whose x axis this one shares, drawn with a secondary y axis
    pub twin_of: Option<usize>,
    pub title: Option<Label>,
    pub x: Axis,
    pub y: Axis,
    pub grid: bool,
    pub facecolor: Option<Rgb>,
    pub frame_on: bool,
    pub legend: Legend,
    pub patches: Vec<Patch>,
    pub lines: Vec<Line>,
    pub markers: Vec<Markers>,
    pub wedges: Vec<Wedge>,
    pub annotations: Vec<Annotation>,
    pub table: Option<Table>,
}

impl Axes {
    pub fn new(cell: (usize, usize)) -> Self {
        Self {
            cell,
            twin_of: None,
            title: None,
            x: Axis::default(),
            y: Axis::default(),
            grid: false,
            facecolor: None,
            frame_on: true,
            legend: Legend::default(),
            patches: Vec::new(),
            lines: Vec::new(),
            markers: Vec::new(),
            wedges: Vec::new(),
            annotations: Vec::new(),
            table: None,
        }
    }

    /// Patches that data labels apply to.
    pub fn bar_patches(&self) -> impl Iterator<Item = &Patch> {
        self.patches.iter().filter(|p| p.kind.is_bar_shaped())
    }

    /// Whether this axes draws in pixel-free layout space (pies, tables) rather than on a mesh.
    pub fn is_decorative(&self) -> bool {
        !self.wedges.is_empty() || self.table.is_some()
    }

    /// Current x bounds: explicit limits if set, otherwise autoscaled from the data.
    pub fn x_bounds(&self) -> (f64, f64) {
        if let Some(limits) = self.x.limits {
            return limits;
        }
        if let Ticks::Categories(names) = &self.x.ticks {
            return (-0.5, names.len().max(1) as f64 - 0.5);
        }
        self.auto_bounds(true)
    }

    pub fn y_bounds(&self) -> (f64, f64) {
        if let Some(limits) = self.y.limits {
            return limits;
        }
        if let Ticks::Categories(names) = &self.y.ticks {
            return (-0.5, names.len().max(1) as f64 - 0.5);
        }
        self.auto_bounds(false)
    }

    fn auto_bounds(&self, horizontal: bool) -> (f64, f64) {
        if !self.wedges.is_empty() {
            return (-1.25, 1.25);
        }
        if self.table.is_some() {
            return (0.0, 1.0);
        }
        let pick = |p: (f64, f64)| if horizontal { p.0 } else { p.1 };
        let mut values: Vec<f64> = Vec::new();
        for p in &self.patches {
            values.push(pick((p.x0, p.y0)));
            values.push(pick((p.x1, p.y1)));
        }
        for l in &self.lines {
            values.extend(l.points.iter().map(|&pt| pick(pt)));
        }
        for m in &self.markers {
            values.extend(m.points.iter().map(|&pt| pick(pt)));
        }
        let Some((lo, hi)) = finite_min_max(&values) else {
            return (0.0, 1.0);
        };
        // Patches fill their cells exactly; everything else gets a 5% margin.
        let tight = self.lines.is_empty()
            && self.markers.is_empty()
            && self.patches.iter().all(|p| !p.kind.is_bar_shaped());
        let (mut lo_pad, mut hi_pad) = padded(lo, hi, if tight { 0.0 } else { 0.05 });
        // Bars grow from the zero baseline, which stays on the edge of the view.
        if !horizontal && self.bar_patches().next().is_some() {
            if lo >= 0.0 {
                lo_pad = 0.0;
            }
            if hi <= 0.0 {
                hi_pad = 0.0;
            }
        }
        (lo_pad, hi_pad)
    }
}

fn padded(lo: f64, hi: f64, margin: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        let pad = if lo == 0.0 { 0.5 } else { lo.abs() * 0.05 };
        return (lo - pad, hi + pad);
    }
    (lo - span * margin, hi + span * margin)
}

/// The chart handle: a figure plus its axes, built by the chart entry points and mutated by
/// the style applier before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub figure: Figure,
    axes: Vec<Axes>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new()
    }
}

impl Chart {
    /// A figure with a single axes.
    pub fn new() -> Self {
        Self::with_grid(1, 1)
    }

    /// A figure with `rows * cols` axes in row-major order.
    pub fn with_grid(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let axes = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| Axes::new((r, c))))
            .collect();
        Self {
            figure: Figure {
                grid: (rows, cols),
                ..Figure::default()
            },
            axes,
        }
    }

    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut [Axes] {
        &mut self.axes
    }

    pub fn primary(&self) -> &Axes {
        &self.axes[0]
    }

    pub fn primary_mut(&mut self) -> &mut Axes {
        &mut self.axes[0]
    }

    /// Figure and one axes borrowed together, for stylers that touch both.
    pub fn split_mut(&mut self, index: usize) -> Option<(&mut Figure, &mut Axes)> {
        let axes = self.axes.get_mut(index)?;
        Some((&mut self.figure, axes))
    }

    /// Add an axes sharing the x axis of `parent`; returns its index.
    pub fn twin_x(&mut self, parent: usize) -> usize {
        let mut twin = Axes::new(self.axes[parent].cell);
        twin.twin_of = Some(parent);
        twin.x.ticks = self.axes[parent].x.ticks.clone();
        twin.frame_on = self.axes[parent].frame_on;
        self.axes.push(twin);
        self.axes.len() - 1
    }

    /// Twin axes attached to `parent`, if any.
    pub fn twin_of(&self, parent: usize) -> Option<&Axes> {
        self.axes.iter().find(|a| a.twin_of == Some(parent))
    }
}
