//! # Rendering
//!
//! Draws the chart model with plotters: bitmaps through `BitMapBackend` encoded by `image`,
//! vector output through `SVGBackend`.

mod chart;
mod styles;


pub use chart::{render_png_async, Renderer};
pub use styles::{ChartStyle, ChartTheme};
