use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use super::format::{LabelFormat, NumberFormat};
use crate::error::Result;
use crate::palette::Rgb;

/// Presentational options shared by every chart kind.
///
/// Every field is optional; `None` leaves the chart's default untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub title: Option<String>,
    pub title_fontsize: Option<f64>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub label_fontsize: Option<f64>,
    pub grid: Option<bool>,
    pub data_labels: Option<bool>,
    pub data_label_format: Option<LabelFormat>,
    pub legend_title: Option<String>,
    pub series_names: Option<Vec<String>>,
    pub show_legend: Option<bool>,
    pub legend_fontsize: Option<f64>,
    pub font_name: Option<String>,
    /// Width and height in inches.
    pub figsize: Option<(f64, f64)>,
    pub show_xaxis: Option<bool>,
    pub show_yaxis: Option<bool>,
    pub tick_labelsize: Option<f64>,
    /// Rotation of the x tick labels, in degrees.
    pub tick_rotation: Option<f64>,
    pub xtick_format: Option<NumberFormat>,
    pub ytick_format: Option<NumberFormat>,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub background_color: Option<Rgb>,
    pub bar_edge_color: Option<Rgb>,
    /// Opaque options handed to the element builders rather than the styler
    /// (`alpha`, `width`, `linewidth`, `marker_size`).
    pub extra: Map<String, Value>,
}

/// Names of the individual [`StyleConfig`] fields, used to scope a config to a chart kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleField {
    Title,
    TitleFontsize,
    Xlabel,
    Ylabel,
    LabelFontsize,
    Grid,
    DataLabels,
    DataLabelFormat,
    LegendTitle,
    SeriesNames,
    ShowLegend,
    LegendFontsize,
    FontName,
    Figsize,
    ShowXaxis,
    ShowYaxis,
    TickLabelsize,
    TickRotation,
    XtickFormat,
    YtickFormat,
    Xlim,
    Ylim,
    BackgroundColor,
    BarEdgeColor,
}

impl StyleField {
    pub const ALL: &'static [StyleField] = &[
        StyleField::Title,
        StyleField::TitleFontsize,
        StyleField::Xlabel,
        StyleField::Ylabel,
        StyleField::LabelFontsize,
        StyleField::Grid,
        StyleField::DataLabels,
        StyleField::DataLabelFormat,
        StyleField::LegendTitle,
        StyleField::SeriesNames,
        StyleField::ShowLegend,
        StyleField::LegendFontsize,
        StyleField::FontName,
        StyleField::Figsize,
        StyleField::ShowXaxis,
        StyleField::ShowYaxis,
        StyleField::TickLabelsize,
        StyleField::TickRotation,
        StyleField::XtickFormat,
        StyleField::YtickFormat,
        StyleField::Xlim,
        StyleField::Ylim,
        StyleField::BackgroundColor,
        StyleField::BarEdgeColor,
    ];

    /// Fields honored by pie charts.
    pub const PIE: &'static [StyleField] = &[
        StyleField::Title,
        StyleField::TitleFontsize,
        StyleField::LegendTitle,
        StyleField::SeriesNames,
        StyleField::ShowLegend,
        StyleField::LegendFontsize,
        StyleField::FontName,
        StyleField::Figsize,
    ];

    /// Fields honored by heatmaps.
    pub const HEATMAP: &'static [StyleField] = &[
        StyleField::Title,
        StyleField::TitleFontsize,
        StyleField::FontName,
        StyleField::Figsize,
        StyleField::Xlim,
        StyleField::Ylim,
        StyleField::BackgroundColor,
    ];

    /// Everything except data labels; scatter plots and box plots have no bars to label.
    pub const NO_DATA_LABELS: &'static [StyleField] = &[
        StyleField::Title,
        StyleField::TitleFontsize,
        StyleField::Xlabel,
        StyleField::Ylabel,
        StyleField::LabelFontsize,
        StyleField::Grid,
        StyleField::LegendTitle,
        StyleField::SeriesNames,
        StyleField::ShowLegend,
        StyleField::LegendFontsize,
        StyleField::FontName,
        StyleField::Figsize,
        StyleField::ShowXaxis,
        StyleField::ShowYaxis,
        StyleField::TickLabelsize,
        StyleField::TickRotation,
        StyleField::XtickFormat,
        StyleField::YtickFormat,
        StyleField::Xlim,
        StyleField::Ylim,
        StyleField::BackgroundColor,
        StyleField::BarEdgeColor,
    ];

    /// Fields honored by pair plots; the title becomes the figure suptitle, the rest go to
    /// every cell.
    pub const PAIRPLOT: &'static [StyleField] = &[
        StyleField::Title,
        StyleField::TitleFontsize,
        StyleField::Grid,
        StyleField::FontName,
        StyleField::Figsize,
        StyleField::TickLabelsize,
        StyleField::TickRotation,
        StyleField::XtickFormat,
        StyleField::YtickFormat,
        StyleField::BackgroundColor,
        StyleField::BarEdgeColor,
    ];

    /// Fields honored by charts drawn without axes, where the title becomes the figure suptitle.
    pub const SUPTITLE: &'static [StyleField] = &[
        StyleField::Title,
        StyleField::TitleFontsize,
        StyleField::FontName,
        StyleField::Figsize,
    ];

    /// Everything except the y label; combo charts take both y labels explicitly.
    pub const COMBO: &'static [StyleField] = &[
        StyleField::Title,
        StyleField::TitleFontsize,
        StyleField::Xlabel,
        StyleField::LabelFontsize,
        StyleField::Grid,
        StyleField::DataLabels,
        StyleField::DataLabelFormat,
        StyleField::LegendTitle,
        StyleField::SeriesNames,
        StyleField::ShowLegend,
        StyleField::LegendFontsize,
        StyleField::FontName,
        StyleField::Figsize,
        StyleField::ShowXaxis,
        StyleField::ShowYaxis,
        StyleField::TickLabelsize,
        StyleField::TickRotation,
        StyleField::XtickFormat,
        StyleField::YtickFormat,
        StyleField::Xlim,
        StyleField::Ylim,
        StyleField::BackgroundColor,
        StyleField::BarEdgeColor,
    ];
}

impl StyleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn labels(mut self, xlabel: impl Into<String>, ylabel: impl Into<String>) -> Self {
        self.xlabel = Some(xlabel.into());
        self.ylabel = Some(ylabel.into());
        self
    }

    pub fn data_labels(mut self, on: bool) -> Self {
        self.data_labels = Some(on);
        self
    }

    pub fn show_legend(mut self, on: bool) -> Self {
        self.show_legend = Some(on);
        self
    }

    pub fn xlim(mut self, min: f64, max: f64) -> Self {
        self.xlim = Some((min, max));
        self
    }

    pub fn ylim(mut self, min: f64, max: f64) -> Self {
        self.ylim = Some((min, max));
        self
    }

    pub fn figsize(mut self, width: f64, height: f64) -> Self {
        self.figsize = Some((width, height));
        self
    }

    /// Numeric pass-through option from [`StyleConfig::extra`].
    pub fn extra_f64(&self, key: &str) -> Option<f64> {
        self.extra.get(key).and_then(Value::as_f64)
    }

    /// Copy of this config keeping only `allowed` fields; `extra` always survives.
    pub fn retain(&self, allowed: &[StyleField]) -> StyleConfig {
        let keep = |f: StyleField| allowed.contains(&f);
        let mut out = StyleConfig {
            extra: self.extra.clone(),
            ..StyleConfig::default()
        };

        macro_rules! carry {
            ($($variant:ident => $field:ident),* $(,)?) => {
                $(
                    if keep(StyleField::$variant) {
                        out.$field = self.$field.clone();
                    } else if self.$field.is_some() {
                        log::debug!("ignoring style field '{}' for this chart kind", stringify!($field));
                    }
                )*
            };
        }

        carry!(
            Title => title,
            TitleFontsize => title_fontsize,
            Xlabel => xlabel,
            Ylabel => ylabel,
            LabelFontsize => label_fontsize,
            Grid => grid,
            DataLabels => data_labels,
            DataLabelFormat => data_label_format,
            LegendTitle => legend_title,
            SeriesNames => series_names,
            ShowLegend => show_legend,
            LegendFontsize => legend_fontsize,
            FontName => font_name,
            Figsize => figsize,
            ShowXaxis => show_xaxis,
            ShowYaxis => show_yaxis,
            TickLabelsize => tick_labelsize,
            TickRotation => tick_rotation,
            XtickFormat => xtick_format,
            YtickFormat => ytick_format,
            Xlim => xlim,
            Ylim => ylim,
            BackgroundColor => background_color,
            BarEdgeColor => bar_edge_color,
        );
        out
    }
}
