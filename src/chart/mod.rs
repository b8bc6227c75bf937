//! The retained chart model.
//!
//! `plotters` draws immediately, so charts are first assembled as plain data (figure, axes,
//! patches, lines, ...) that the style applier can adjust and read back, and are only turned
//! into pixels by [`crate::plotting`].

mod elements;
mod model;

pub use elements::{
    Align, Anchor, Annotation, Edges, Legend, LegendEntry, LegendKind, Line, Markers, Patch,
    PatchKind, Table, Wedge,
};
pub use model::{
    Axes, Axis, Chart, Figure, Label, Ticks, DEFAULT_DPI, DEFAULT_FIGSIZE, DEFAULT_FONT,
};
