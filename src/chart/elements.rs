use crate::palette::Rgb;

/// What a rectangular patch represents; data labels only go on bar-shaped patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchKind {
    Bar,
    Bin,
    Box,
    Tile,
    Cell,
}

impl PatchKind {
    pub fn is_bar_shaped(self) -> bool {
        matches!(self, PatchKind::Bar | PatchKind::Bin)
    }
}

/// An axis-aligned rectangle in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub kind: PatchKind,
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub fill: Rgb,
    pub alpha: f64,
    pub edge: Option<Rgb>,
    /// The value the patch stands for (bar height, bin count, cell value, tile size)
    pub value: f64,
}

impl Patch {
    pub fn new(kind: PatchKind, (x0, y0): (f64, f64), (x1, y1): (f64, f64), fill: Rgb, value: f64) -> Self {
        Self {
            kind,
            x0,
            y0,
            x1,
            y1,
            fill,
            alpha: 1.0,
            edge: None,
            value,
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Signed height; negative for bars below the baseline.
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    pub width: u32,
}

/// A set of scatter points sharing one color.
#[derive(Debug, Clone, PartialEq)]
pub struct Markers {
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    pub size: u32,
    pub alpha: f64,
}

/// A pie slice centered on the origin with unit radius; angles in degrees, counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub end: f64,
    pub color: Rgb,
    pub label: String,
    pub value: f64,
}

impl Wedge {
    pub fn mid_angle(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Point at `radius` along the wedge bisector.
    pub fn point_at(&self, radius: f64) -> (f64, f64) {
        let theta = self.mid_angle().to_radians();
        (radius * theta.cos(), radius * theta.sin())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    Left,
    #[default]
    Center,
    Right,
}

/// Text placed at a data coordinate, shifted by a pixel offset (positive y is up).
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub at: (f64, f64),
    pub offset: (i32, i32),
    pub size: f64,
    pub color: Rgb,
    pub anchor: Anchor,
    pub bold: bool,
}

impl Annotation {
    pub fn new(text: impl Into<String>, at: (f64, f64), size: f64, color: Rgb) -> Self {
        Self {
            text: text.into(),
            at,
            offset: (0, 0),
            size,
            color,
            anchor: Anchor::Center,
            bold: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendKind {
    Swatch,
    Line,
    Marker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
    pub kind: LegendKind,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Legend {
    pub visible: bool,
    pub title: Option<String>,
    pub entries: Vec<LegendEntry>,
    pub font_size: Option<f64>,
}

impl Legend {
    /// Whether the legend would actually be drawn.
    pub fn is_shown(&self) -> bool {
        self.visible && !self.entries.is_empty()
    }

    pub fn push(&mut self, label: impl Into<String>, color: Rgb, kind: LegendKind) {
        self.entries.push(LegendEntry {
            label: label.into(),
            color,
            kind,
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    Center,
    #[default]
    Right,
}

/// Which cell borders a table draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edges {
    #[default]
    Horizontal,
    Vertical,
    Closed,
    Open,
}

/// A grid of text cells laid out in axes-fraction coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
    /// Column widths as fractions of the axes width
    pub col_widths: Vec<f64>,
    pub cell_align: Align,
    pub header_align: Align,
    pub edges: Edges,
    /// Bold first column (vertical orientation)
    pub emphasize_first_column: bool,
    pub font_size: f64,
    pub row_height: f64,
    pub header_fill: Rgb,
    pub header_text: Rgb,
    pub edge_color: Rgb,
}

impl Table {
    pub fn n_columns(&self) -> usize {
        self.header
            .as_ref()
            .map(Vec::len)
            .into_iter()
            .chain(self.rows.iter().map(Vec::len))
            .max()
            .unwrap_or(0)
    }

    /// Number of drawn rows including the header.
    pub fn n_rows(&self) -> usize {
        self.rows.len() + usize::from(self.header.is_some())
    }
}
