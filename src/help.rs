//! Documentation lookup for the chart entry points and helpers.
//!
//! Topics are matched by their last dotted segment, so `"Plotter.bar"`, `"charts.bar"` and
//! `"bar"` all resolve to the same text.

use log::warn;

use crate::error::{ChartError, Result};

const TOPICS: &[(&str, &str)] = &[
    (
        "bar",
        "bar(data, opts): grouped bar chart. One bar per row and column, one palette color per \
         column, category x axis from the index. The legend shows when there is more than one \
         column. `extra` keys: width (group width, default 0.8), alpha.",
    ),
    (
        "hist",
        "hist(data, bins, opts): histogram with `bins` equal-width bins shared by every column. \
         bins must be at least 1. `extra` keys: alpha (0.5 for several columns).",
    ),
    (
        "pie",
        "pie(series, opts): pie chart in index order with a percentage inside each wedge. Values \
         must be non-negative and sum to more than zero. Honors title, legend fields, font_name \
         and figsize only.",
    ),
    (
        "timeseries",
        "timeseries(data, opts): one line per column over a date index (%Y-%m-%d or \
         %Y-%m-%d %H:%M:%S). Long series are averaged down to 500 points. `extra` keys: linewidth.",
    ),
    (
        "heatmap",
        "heatmap(matrix, row_labels, col_labels, heat, opts): one cell per value colored along a \
         gradient of the palette. Empty label lists fall back to positions. Set heat.annotate to \
         write each value inside its cell.",
    ),
    (
        "scatter",
        "scatter(data, x, y, opts): column `y` against column `x`. Both columns must exist. \
         `extra` keys: marker_size, alpha.",
    ),
    (
        "treemap",
        "treemap(series, opts): squarified treemap of the positive values, largest first, with \
         white tile labels. The style title becomes the figure title.",
    ),
    (
        "boxplot",
        "boxplot(data, opts): quartile box per column, median line, whiskers at the furthest \
         points within 1.5 IQR and outliers as points.",
    ),
    (
        "wordcloud",
        "wordcloud(text, options, opts): the max_words most frequent words without stop words, \
         sized by frequency and colored along the palette gradient. options.savefig also writes \
         the chart to disk.",
    ),
    (
        "pairplot",
        "pairplot(data, opts): grid of pairwise relationships with histograms on the diagonal and \
         scatter plots elsewhere.",
    ),
    (
        "table",
        "table(data, options): text table with optional header, title location, column widths, \
         alignment and edge mode (horizontal, vertical, closed, open).",
    ),
    (
        "combo_chart",
        "combo_chart(bars, line, left_ylabel, right_ylabel, opts): bars on the left axis and a \
         line on a twin right axis sharing x, with one merged legend.",
    ),
    (
        "apply_style",
        "StyleApplier::apply(chart, config): set titles, labels, grid, data labels, legend, font, \
         figure size, axis visibility, tick formats, limits and colors on a chart. Only the \
         fields that are set are applied, and only to that chart.",
    ),
    (
        "resolve",
        "PaletteRegistry::resolve(spec): colors of a named palette, or a custom color list \
         unchanged. Unknown names are an error listing the available palettes.",
    ),
    (
        "shuffle",
        "shuffle(colors, enabled): random permutation of the colors when enabled.",
    ),
    (
        "build_gradient",
        "build_gradient(colors, name): continuous color scale over [0, 1] through evenly spaced \
         colors.",
    ),
    (
        "gradient_for",
        "PaletteRegistry::gradient_for(spec, name): resolve a palette and build a gradient from it.",
    ),
    (
        "readable_format",
        "readable_format(value): one decimal with a K, M, B or T suffix, e.g. 1234567 -> 1.2M.",
    ),
    (
        "list_fonts",
        "FontStore::list_fonts(): font families installed in the font cache.",
    ),
    (
        "install",
        "FontStore::install(family): copy a family's font files from a FontSource into the cache.",
    ),
];

/// Aliases kept for callers used to the older helper names.
const ALIASES: &[(&str, &str)] = &[
    ("create_cmap", "gradient_for"),
    ("apply_chart_style", "apply_style"),
    ("list_font", "list_fonts"),
    ("download_font", "install"),
];

/// Documentation text for `topic`.
pub fn help(topic: &str) -> Result<&'static str> {
    let name = topic.trim().rsplit('.').next().unwrap_or_default();
    let name = ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, target)| *target);
    TOPICS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, doc)| *doc)
        .ok_or_else(|| ChartError::UnknownTopic(topic.to_string()))
}

/// Names of every documented topic.
pub fn topics() -> impl Iterator<Item = &'static str> {
    TOPICS.iter().map(|(key, _)| *key)
}

/// Print the documentation for `topic`, or the lookup error.
pub fn print_help(topic: &str) {
    match help(topic) {
        Ok(doc) => println!("{}", doc),
        Err(e) => {
            warn!("{}", e);
            println!("{}", e);
        }
    }
}
