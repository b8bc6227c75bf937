//! Chart styling: the option record, number formats and the applier.

mod apply;
mod config;
mod format;

pub use apply::{StyleApplier, StyleDefaults};
pub use config::{StyleConfig, StyleField};
pub use format::{readable_format, LabelFormat, NumberFormat};
