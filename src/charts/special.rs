use log::{debug, warn};
use std::path::PathBuf;

use super::layout::{pad_rects, place_words, squarify, word_frequencies, Rect};
use super::{color_at, ChartKind, PlotOptions, Plotter};
use crate::chart::{Align, Anchor, Annotation, Axes, Chart, Edges, Label, Patch, PatchKind, Table};
use crate::error::{ChartError, Result};
use crate::palette::Rgb;
use crate::style::NumberFormat;
use crate::types::{DataFrame, Series};

const TREEMAP_CANVAS: f64 = 100.0;
const TREEMAP_PAD: f64 = 1.0;
const TREEMAP_FIGSIZE: (f64, f64) = (10.0, 8.0);
const TILE_TEXT_SIZE: f64 = 10.0;
const SUPTITLE_SIZE: f64 = 14.0;

/// Word cloud options.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudOptions {
    pub title: String,
    pub max_words: usize,
    /// Canvas size in pixels
    pub width: u32,
    pub height: u32,
    pub figsize: (f64, f64),
    pub font_name: Option<String>,
    /// Also write the chart to this path
    pub savefig: Option<PathBuf>,
}

impl Default for WordCloudOptions {
    fn default() -> Self {
        Self {
            title: "Word Cloud".to_string(),
            max_words: 100,
            width: 800,
            height: 400,
            figsize: (10.0, 8.0),
            font_name: None,
            savefig: None,
        }
    }
}

/// Horizontal placement of a table title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleLoc {
    #[default]
    Left,
    Center,
    Right,
}

impl From<TitleLoc> for Anchor {
    fn from(loc: TitleLoc) -> Self {
        match loc {
            TitleLoc::Left => Anchor::Left,
            TitleLoc::Center => Anchor::Center,
            TitleLoc::Right => Anchor::Right,
        }
    }
}

/// Table options. `vertical` orientation puts the emphasis on the first column.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Replacement column names, applied in order
    pub columns: Option<Vec<String>>,
    pub title: String,
    pub title_loc: TitleLoc,
    /// Use the column names as the header row
    pub header: bool,
    /// Column widths as fractions of the figure width
    pub col_widths: Option<Vec<f64>>,
    pub row_align: Align,
    pub col_align: Align,
    /// Header row used when `header` is off
    pub col_labels: Option<Vec<String>>,
    pub edges: Edges,
    pub vertical: bool,
    pub figsize: (f64, f64),
    pub savefig: Option<PathBuf>,
    /// Cell text template; plain display form when unset
    pub float_format: Option<NumberFormat>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            columns: None,
            title: String::new(),
            title_loc: TitleLoc::Left,
            header: true,
            col_widths: None,
            row_align: Align::Right,
            col_align: Align::Right,
            col_labels: None,
            edges: Edges::Horizontal,
            vertical: false,
            figsize: (5.5, 6.0),
            savefig: None,
            float_format: None,
        }
    }
}

impl Plotter {
    /// Squarified treemap of the positive values of `data`, largest first, labeled in white.
    /// The style title becomes the figure suptitle; figsize defaults to 10x8 inches.
    pub fn treemap(&self, data: &Series, opts: &PlotOptions) -> Result<Chart> {
        let mut items: Vec<(&str, f64)> = data
            .index
            .iter()
            .map(String::as_str)
            .zip(data.values.iter().copied())
            .filter(|(_, v)| v.is_finite() && *v > 0.0)
            .collect();
        if items.len() < data.len() {
            warn!("Treemap dropped {} non-positive values", data.len() - items.len());
        }
        if items.is_empty() {
            return Err(ChartError::EmptyData("treemap needs at least one positive value".into()));
        }
        items.sort_by(|a, b| b.1.total_cmp(&a.1));

        let sizes: Vec<f64> = items.iter().map(|(_, v)| *v).collect();
        let canvas = Rect {
            x: 0.0,
            y: 0.0,
            dx: TREEMAP_CANVAS,
            dy: TREEMAP_CANVAS,
        };
        let mut rects = squarify(&sizes, canvas);
        pad_rects(&mut rects, TREEMAP_PAD);

        let colors = self.colors(&opts.palette, opts.palette_shuffle);
        let mut chart = Chart::new();
        chart.figure.size = TREEMAP_FIGSIZE;
        let axes = chart.primary_mut();
        for (i, ((label, value), rect)) in items.iter().zip(&rects).enumerate() {
            let tile = Patch::new(
                PatchKind::Tile,
                (rect.x, rect.y),
                (rect.x + rect.dx, rect.y + rect.dy),
                color_at(&colors, i),
                *value,
            );
            axes.patches.push(tile);
            axes.annotations.push(Annotation::new(*label, rect.center(), TILE_TEXT_SIZE, Rgb::hex(0xFFFFFF)));
        }
        axes.x.limits = Some((0.0, TREEMAP_CANVAS));
        axes.y.limits = Some((0.0, TREEMAP_CANVAS));
        hide_axes(axes);

        self.suptitle_chart(ChartKind::Treemap, &mut chart, opts);
        Ok(chart)
    }

    /// Word cloud of `text`: stop words dropped, the `max_words` most frequent words sized by
    /// frequency and colored along the palette gradient.
    pub fn wordcloud(&self, text: &str, wc: &WordCloudOptions, opts: &PlotOptions) -> Result<Chart> {
        let freqs = word_frequencies(text);
        if freqs.is_empty() {
            return Err(ChartError::EmptyData("word cloud text has no words".into()));
        }
        let (width, height) = (f64::from(wc.width.max(1)), f64::from(wc.height.max(1)));
        let placed = place_words(&freqs, wc.max_words, width, height);
        debug!("Placed {} of {} distinct words", placed.len(), freqs.len());
        let gradient = self.gradient(opts, "wordcloud")?;

        let mut chart = Chart::new();
        chart.figure.size = wc.figsize;
        if let Some(font) = &wc.font_name {
            chart.figure.font_family = font.clone();
        }
        // Canvas pixels to points, fitting the canvas inside the figure.
        let (fig_w, fig_h) = chart.figure.pixel_size();
        let scale = (f64::from(fig_w) / width).min(f64::from(fig_h) / height) * 72.0 / f64::from(chart.figure.dpi);
        if !wc.title.is_empty() {
            chart.figure.suptitle = Some(Label::new(wc.title.clone(), SUPTITLE_SIZE).bold());
        }

        let axes = chart.primary_mut();
        for word in &placed {
            let color = gradient.at(1.0 - word.weight);
            axes.annotations.push(Annotation::new(
                word.text.clone(),
                word.bounds.center(),
                word.font_size * scale,
                color,
            ));
        }
        axes.x.limits = Some((0.0, width));
        axes.y.limits = Some((0.0, height));
        axes.facecolor = Some(Rgb::hex(0xFFFFFF));
        hide_axes(axes);

        if let Some(path) = &wc.savefig {
            chart.save(path)?;
        }
        Ok(chart)
    }

    /// Text table of a frame's values, with an optional bold header row.
    pub fn table(&self, data: &DataFrame, tbl: &TableOptions) -> Result<Chart> {
        let mut data = data.clone();
        if let Some(columns) = &tbl.columns {
            data.rename_columns(columns);
        }
        let n_cols = data.n_columns();
        if n_cols == 0 {
            return Err(ChartError::EmptyData("table needs at least one column".into()));
        }
        let col_widths = match &tbl.col_widths {
            Some(widths) if widths.len() != n_cols => {
                return Err(ChartError::LengthMismatch {
                    expected: n_cols,
                    found: widths.len(),
                })
            }
            Some(widths) => widths.clone(),
            None => vec![1.0 / n_cols as f64; n_cols],
        };
        let header = if tbl.header {
            Some(data.column_names().into_iter().map(str::to_string).collect())
        } else {
            tbl.col_labels.clone()
        };
        let cell_text = |v: f64| match &tbl.float_format {
            Some(fmt) => fmt.format(v),
            None => v.to_string(),
        };
        let rows: Vec<Vec<String>> = (0..data.n_rows())
            .filter_map(|i| data.row(i))
            .map(|row| row.into_iter().map(&cell_text).collect())
            .collect();

        let mut chart = Chart::new();
        chart.figure.size = tbl.figsize;
        let axes = chart.primary_mut();
        if !tbl.title.is_empty() {
            axes.title = Some(Label {
                align: tbl.title_loc.into(),
                ..Label::new(tbl.title.clone(), SUPTITLE_SIZE).bold()
            });
        }
        axes.table = Some(Table {
            header,
            rows,
            col_widths,
            cell_align: tbl.row_align,
            header_align: tbl.col_align,
            edges: tbl.edges,
            emphasize_first_column: tbl.vertical,
            font_size: 12.0,
            row_height: 0.08,
            header_fill: Rgb::hex(0x000000),
            header_text: Rgb::hex(0xFFFFFF),
            edge_color: Rgb::hex(0xDDDDDD),
        });
        hide_axes(axes);
        debug!("Built {} chart with {} rows", ChartKind::Table, data.n_rows());

        if let Some(path) = &tbl.savefig {
            chart.save(path)?;
        }
        Ok(chart)
    }

    /// Style a chart drawn without axes: the title goes to the figure suptitle.
    fn suptitle_chart(&self, kind: ChartKind, chart: &mut Chart, opts: &PlotOptions) {
        let mut config = opts.style.retain(kind.style_fields());
        if let Some(title) = config.title.take() {
            let size = config.title_fontsize.unwrap_or(SUPTITLE_SIZE);
            chart.figure.suptitle = Some(Label::new(title, size).bold());
        }
        self.applier().apply(chart, &config);
        debug!("Built {} chart", kind);
    }
}

fn hide_axes(axes: &mut Axes) {
    axes.x.visible = false;
    axes.y.visible = false;
    axes.frame_on = false;
    axes.grid = false;
}
