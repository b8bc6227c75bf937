use plotters::style::RGBAColor;

/// Colors of the chart furniture; data colors come from the palettes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartTheme {
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    pub legend_background: RGBAColor,
    pub legend_border: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            text_color: RGBAColor(0, 0, 0, 1.0),
            grid_color: RGBAColor(176, 176, 176, 0.6),
            axis_color: RGBAColor(0, 0, 0, 0.9),
            legend_background: RGBAColor(255, 255, 255, 0.8),
            legend_border: RGBAColor(204, 204, 204, 1.0),
        }
    }
}

/// Sizes, in points unless noted, used when a chart does not set its own.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub tick_font_size: f64,
    pub label_font_size: f64,
    pub legend_font_size: f64,
    /// Outer margin of each axes, in pixels
    pub margin: u32,
    /// Room reserved for tick labels and axis titles, in pixels
    pub label_area_size: u32,
    /// Extra room below rotated x tick labels, in pixels
    pub rotated_label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            tick_font_size: 10.0,
            label_font_size: 11.0,
            legend_font_size: 10.0,
            margin: 10,
            label_area_size: 50,
            rotated_label_area_size: 80,
        }
    }
}
