use super::config::StyleConfig;
use crate::chart::{Anchor, Annotation, Axes, Chart, Figure, Label};
use crate::palette::Rgb;

/// Defaults the applier falls back to when a size is not given.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefaults {
    pub title_size: f64,
    pub data_label_size: f64,
    /// Pixel gap between a bar top and its data label
    pub data_label_offset: i32,
    pub text_color: Rgb,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            title_size: 14.0,
            data_label_size: 10.0,
            data_label_offset: 10,
            text_color: Rgb::hex(0x000000),
        }
    }
}

/// Applies a [`StyleConfig`] to a chart's presentation without touching its data.
///
/// Every setting is scoped to the chart it is applied to; nothing is written to process-wide
/// state, so styling one chart never leaks into the next.
#[derive(Debug, Clone, Default)]
pub struct StyleApplier {
    defaults: StyleDefaults,
}

impl StyleApplier {
    pub fn new(defaults: StyleDefaults) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &StyleDefaults {
        &self.defaults
    }

    /// Style the primary axes and the figure.
    pub fn apply(&self, chart: &mut Chart, config: &StyleConfig) {
        if let Some((figure, axes)) = chart.split_mut(0) {
            self.apply_axes(figure, axes, config);
        }
    }

    /// Style one axes; figure-wide fields (font, size) go to `figure`.
    pub fn apply_axes(&self, figure: &mut Figure, axes: &mut Axes, config: &StyleConfig) {
        if let Some(font) = &config.font_name {
            figure.font_family = font.clone();
        }
        if let Some(size) = config.figsize {
            figure.size = size;
        }

        if let Some(title) = &config.title {
            let size = config.title_fontsize.unwrap_or(self.defaults.title_size);
            axes.title = Some(Label {
                color: self.defaults.text_color,
                ..Label::new(title.clone(), size)
            });
        }
        if let Some(xlabel) = &config.xlabel {
            axes.x.label = Some(xlabel.clone());
            axes.x.label_size = config.label_fontsize;
        }
        if let Some(ylabel) = &config.ylabel {
            axes.y.label = Some(ylabel.clone());
            axes.y.label_size = config.label_fontsize;
        }
        if let Some(grid) = config.grid {
            axes.grid = grid;
        }

        if config.data_labels == Some(true) {
            self.add_data_labels(axes, config);
        }

        self.apply_legend(axes, config);

        if let Some(limits) = config.xlim {
            axes.x.limits = Some(limits);
        }
        if let Some(limits) = config.ylim {
            axes.y.limits = Some(limits);
        }
        if let Some(rotation) = config.tick_rotation {
            axes.x.tick_rotation = rotation;
        }
        if let Some(color) = config.background_color {
            axes.facecolor = Some(color);
        }
        if let Some(fmt) = &config.xtick_format {
            axes.x.tick_format = Some(fmt.clone());
        }
        if let Some(fmt) = &config.ytick_format {
            axes.y.tick_format = Some(fmt.clone());
        }
        if let Some(size) = config.tick_labelsize {
            axes.x.tick_label_size = Some(size);
            axes.y.tick_label_size = Some(size);
        }
        if let Some(edge) = config.bar_edge_color {
            for patch in &mut axes.patches {
                patch.edge = Some(edge);
            }
        }
        if config.show_xaxis == Some(false) {
            axes.x.visible = false;
        }
        if config.show_yaxis == Some(false) {
            axes.y.visible = false;
        }
    }

    fn add_data_labels(&self, axes: &mut Axes, config: &StyleConfig) {
        let format = config.data_label_format.clone().unwrap_or_default();
        let labels: Vec<Annotation> = axes
            .bar_patches()
            .map(|p| {
                let value = p.height();
                let mut note = Annotation::new(
                    format.format(value),
                    (p.center().0, p.y1),
                    self.defaults.data_label_size,
                    self.defaults.text_color,
                );
                let offset = self.defaults.data_label_offset;
                note.offset = (0, if value < 0.0 { -offset } else { offset });
                note.anchor = Anchor::Center;
                note
            })
            .collect();
        axes.annotations.extend(labels);
    }

    fn apply_legend(&self, axes: &mut Axes, config: &StyleConfig) {
        if let Some(size) = config.legend_fontsize {
            axes.legend.font_size = Some(size);
        }
        if config.show_legend == Some(false) {
            axes.legend.visible = false;
            return;
        }
        if config.legend_title.is_none() && config.series_names.is_none() {
            if config.show_legend == Some(true) {
                axes.legend.visible = true;
            }
            return;
        }
        if let Some(title) = &config.legend_title {
            axes.legend.title = Some(title.clone());
        }
        if let Some(names) = &config.series_names {
            for (entry, name) in axes.legend.entries.iter_mut().zip(names) {
                entry.label = name.clone();
            }
        }
        axes.legend.visible = true;
    }
}
