use image::{ImageFormat, RgbImage};
use log::{debug, warn};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_backend::text_anchor::{HPos, Pos, VPos};
use plotters_backend::{FontStyle, FontTransform};
use std::io::Cursor;
use std::path::Path;

use super::styles::{ChartStyle, ChartTheme};
use crate::chart::{Align, Anchor, Axes, Chart, Edges, Figure, Label, Legend, LegendKind, Table, Ticks, Wedge};
use crate::error::{ChartError, Result};
use crate::palette::Rgb;

type Cartesian = Cartesian2d<RangedCoordf64, RangedCoordf64>;

/// Draws [`Chart`]s with plotters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Renderer {
    pub theme: ChartTheme,
    pub style: ChartStyle,
}

impl Renderer {
    pub fn new(theme: ChartTheme, style: ChartStyle) -> Self {
        Self { theme, style }
    }

    /// Write `chart` to `path`: SVG for `.svg`, otherwise a bitmap encoded from the extension
    /// (png, jpg/jpeg, bmp).
    pub fn save(&self, chart: &Chart, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        if ext.as_deref() == Some("svg") {
            let root = SVGBackend::new(path, chart.figure.pixel_size()).into_drawing_area();
            self.draw(chart, &root)?;
            root.present()?;
        } else {
            self.render_rgb(chart)?.save(path)?;
        }
        debug!("Saved chart to {}", path.display());
        Ok(())
    }

    /// Render into an RGB bitmap of the figure's pixel size.
    pub fn render_rgb(&self, chart: &Chart) -> Result<RgbImage> {
        let (width, height) = chart.figure.pixel_size();
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw(chart, &root)?;
            root.present()?;
        }
        RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ChartError::Render("bitmap buffer does not match the figure size".into()))
    }

    pub fn to_png_bytes(&self, chart: &Chart) -> Result<Vec<u8>> {
        let image = self.render_rgb(chart)?;
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    pub fn render_svg(&self, chart: &Chart) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, chart.figure.pixel_size()).into_drawing_area();
            self.draw(chart, &root)?;
            root.present()?;
        }
        Ok(svg)
    }

    /// Draw the whole figure onto `root`.
    pub fn draw<'a, DB: DrawingBackend + 'a>(&self, chart: &Chart, root: &'a DrawingArea<DB, Shift>) -> Result<()> {
        let figure = &chart.figure;
        root.fill(&rgb(figure.facecolor))?;
        let body = match &figure.suptitle {
            Some(title) => {
                let style = self.text(figure, title.size, title.bold, &rgb(title.color));
                root.titled(&title.text, style)?
            }
            None => root.clone(),
        };

        let (rows, cols) = figure.grid;
        let cells = body.split_evenly((rows, cols));
        for (index, axes) in chart.axes().iter().enumerate() {
            if axes.twin_of.is_some() {
                continue;
            }
            let Some(cell) = cells.get(axes.cell.0 * cols + axes.cell.1) else {
                warn!("Axes at {:?} is outside the {}x{} grid", axes.cell, rows, cols);
                continue;
            };
            self.draw_axes(figure, axes, chart.twin_of(index), cell)?;
        }
        Ok(())
    }

    fn draw_axes<'a, DB: DrawingBackend + 'a>(
        &self,
        figure: &Figure,
        axes: &Axes,
        twin: Option<&Axes>,
        cell: &'a DrawingArea<DB, Shift>,
    ) -> Result<()> {
        let area = match &axes.title {
            Some(title) => self.draw_title(figure, title, cell)?,
            None => cell.clone(),
        };
        if let Some(table) = &axes.table {
            return self.draw_table(figure, table, &area);
        }
        // Pies stay round.
        let area = if axes.is_decorative() { square(area) } else { area };

        let (x0, x1) = usable(axes.x_bounds());
        let (y0, y1) = usable(axes.y_bounds());
        let mut builder = ChartBuilder::on(&area);
        builder.margin(self.style.margin);
        if axes.x.visible {
            let rotated = quarter_turns(axes.x.tick_rotation) % 2 == 1;
            builder.x_label_area_size(if rotated {
                self.style.rotated_label_area_size
            } else {
                self.style.label_area_size
            });
        }
        if axes.y.visible {
            builder.y_label_area_size(self.style.label_area_size);
        }
        if twin.is_some() {
            builder.right_y_label_area_size(self.style.label_area_size);
        }
        let mut ctx = builder.build_cartesian_2d(x0..x1, y0..y1)?;

        if let Some(color) = axes.facecolor {
            ctx.plotting_area().fill(&rgb(color))?;
        }
        if axes.x.visible || axes.y.visible || axes.grid {
            self.draw_mesh(figure, axes, &mut ctx)?;
        }
        self.draw_elements(figure, axes, ctx.plotting_area())?;

        let Some(twin) = twin else {
            return self.draw_legend(figure, &axes.legend, &mut ctx);
        };
        let (ty0, ty1) = usable(twin.y_bounds());
        let mut dual = ctx.set_secondary_coord(x0..x1, ty0..ty1);
        {
            let fmt = |v: &f64| twin.y.tick_label(*v);
            let tick_size = twin.y.tick_label_size.unwrap_or(self.style.tick_font_size);
            let desc_size = twin.y.label_size.unwrap_or(self.style.label_font_size);
            let mut secondary = dual.configure_secondary_axes();
            secondary
                .axis_style(self.axis_line(twin))
                .label_style(self.text(figure, tick_size, false, &self.theme.text_color))
                .axis_desc_style(self.text(figure, desc_size, false, &self.theme.text_color))
                .y_label_formatter(&fmt);
            if let Some(desc) = &twin.y.label {
                secondary.y_desc(desc.as_str());
            }
            secondary.draw()?;
        }
        self.draw_elements(figure, twin, dual.secondary_plotting_area())?;
        self.draw_legend(figure, &axes.legend, &mut *dual)
    }

    /// Title band above an axes; returns the area left below it.
    fn draw_title<DB: DrawingBackend>(
        &self,
        figure: &Figure,
        title: &Label,
        cell: &DrawingArea<DB, Shift>,
    ) -> Result<DrawingArea<DB, Shift>> {
        let band = (points_to_px(title.size, figure) * 2.0).ceil() as u32;
        let (top, rest) = cell.split_vertically(band);
        let (width, _) = top.dim_in_pixel();
        let margin = self.style.margin as i32;
        let (x, hpos) = match title.align {
            Anchor::Left => (margin, HPos::Left),
            Anchor::Center => (width as i32 / 2, HPos::Center),
            Anchor::Right => (width as i32 - margin, HPos::Right),
        };
        let style = self
            .text(figure, title.size, title.bold, &rgb(title.color))
            .pos(Pos::new(hpos, VPos::Center));
        top.draw_text(&title.text, &style, (x, band as i32 / 2))?;
        Ok(rest)
    }

    fn draw_mesh<DB: DrawingBackend>(
        &self,
        figure: &Figure,
        axes: &Axes,
        ctx: &mut ChartContext<'_, DB, Cartesian>,
    ) -> Result<()> {
        let x_fmt = |v: &f64| axes.x.tick_label(*v);
        let y_fmt = |v: &f64| axes.y.tick_label(*v);
        let x_size = axes.x.tick_label_size.unwrap_or(self.style.tick_font_size);
        let y_size = axes.y.tick_label_size.unwrap_or(self.style.tick_font_size);
        let desc_size = axes
            .x
            .label_size
            .or(axes.y.label_size)
            .unwrap_or(self.style.label_font_size);
        let x_style = rotate(
            self.text(figure, x_size, false, &self.theme.text_color),
            axes.x.tick_rotation,
        );

        let mut mesh = ctx.configure_mesh();
        mesh.light_line_style(TRANSPARENT)
            .bold_line_style(if axes.grid { self.theme.grid_color } else { TRANSPARENT })
            .axis_style(self.axis_line(axes))
            .x_label_formatter(&x_fmt)
            .y_label_formatter(&y_fmt)
            .x_label_style(x_style)
            .y_label_style(self.text(figure, y_size, false, &self.theme.text_color))
            .axis_desc_style(self.text(figure, desc_size, false, &self.theme.text_color));
        if let Ticks::Categories(names) = &axes.x.ticks {
            mesh.x_labels(names.len().max(1));
        }
        if let Ticks::Categories(names) = &axes.y.ticks {
            mesh.y_labels(names.len().max(1));
        }
        if let Some(label) = &axes.x.label {
            mesh.x_desc(label.as_str());
        }
        if let Some(label) = &axes.y.label {
            mesh.y_desc(label.as_str());
        }
        if !axes.x.visible {
            mesh.disable_x_axis();
        }
        if !axes.y.visible {
            mesh.disable_y_axis();
        }
        mesh.draw()?;
        Ok(())
    }

    /// Every data element of `axes` in drawing order: patches, wedges, lines, markers, text.
    fn draw_elements<DB: DrawingBackend>(
        &self,
        figure: &Figure,
        axes: &Axes,
        area: &DrawingArea<DB, Cartesian>,
    ) -> Result<()> {
        let scale = figure.dpi as f64 / 100.0;
        for p in &axes.patches {
            let corners = [(p.x0, p.y0), (p.x1, p.y1)];
            area.draw(&Rectangle::new(corners, rgb(p.fill).mix(p.alpha).filled()))?;
            if let Some(edge) = p.edge {
                area.draw(&Rectangle::new(corners, rgb(edge).stroke_width(1)))?;
            }
        }
        for wedge in &axes.wedges {
            let outline = wedge_outline(wedge);
            area.draw(&Polygon::new(outline.clone(), rgb(wedge.color).filled()))?;
            area.draw(&PathElement::new(outline, WHITE.stroke_width(1)))?;
        }
        for line in &axes.lines {
            let width = ((line.width as f64 * scale).round() as u32).max(1);
            for run in finite_runs(&line.points) {
                area.draw(&PathElement::new(run, rgb(line.color).stroke_width(width)))?;
            }
        }
        for set in &axes.markers {
            let radius = ((set.size as f64 * scale).round() as i32).max(1);
            let style = rgb(set.color).mix(set.alpha).filled();
            for &point in set.points.iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
                area.draw(&Circle::new(point, radius, style))?;
            }
        }

        // Annotation offsets are in pixels, so text goes through the pixel view of the area.
        let pixels = area.strip_coord_spec();
        let (base_x, base_y) = area.get_base_pixel();
        for note in &axes.annotations {
            if !note.at.0.is_finite() || !note.at.1.is_finite() {
                continue;
            }
            let hpos = match note.anchor {
                Anchor::Left => HPos::Left,
                Anchor::Center => HPos::Center,
                Anchor::Right => HPos::Right,
            };
            let style = self
                .text(figure, note.size, note.bold, &rgb(note.color))
                .pos(Pos::new(hpos, VPos::Center));
            let (x, y) = area.map_coordinate(&note.at);
            let at = (
                x - base_x + note.offset.0,
                y - base_y - note.offset.1,
            );
            pixels.draw_text(&note.text, &style, at)?;
        }
        Ok(())
    }

    fn draw_legend<'a, DB: DrawingBackend + 'a>(
        &self,
        figure: &Figure,
        legend: &Legend,
        ctx: &mut ChartContext<'a, DB, Cartesian>,
    ) -> Result<()> {
        if !legend.is_shown() {
            return Ok(());
        }
        if let Some(title) = &legend.title {
            ctx.draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
                .label(title.as_str())
                .legend(|(x, y)| Rectangle::new([(x, y), (x, y)], TRANSPARENT.filled()));
        }
        for entry in &legend.entries {
            let color = rgb(entry.color);
            let anno = ctx
                .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
                .label(entry.label.as_str());
            match entry.kind {
                LegendKind::Swatch => {
                    anno.legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
                }
                LegendKind::Line => {
                    anno.legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], color.stroke_width(2)));
                }
                LegendKind::Marker => {
                    anno.legend(move |(x, y)| Circle::new((x + 7, y), 4, color.filled()));
                }
            }
        }
        let size = legend.font_size.unwrap_or(self.style.legend_font_size);
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(self.theme.legend_background)
            .border_style(self.theme.legend_border)
            .label_font(self.text(figure, size, false, &self.theme.text_color))
            .draw()?;
        Ok(())
    }

    /// Tables are laid out in pixels, centered in the area.
    fn draw_table<DB: DrawingBackend>(
        &self,
        figure: &Figure,
        table: &Table,
        area: &DrawingArea<DB, Shift>,
    ) -> Result<()> {
        let n_rows = table.n_rows();
        if n_rows == 0 || table.col_widths.is_empty() {
            return Ok(());
        }
        let (w, h) = area.dim_in_pixel();
        let (w, h) = (w as f64, h as f64);
        let row_h = (table.row_height * h).min(h / n_rows as f64);
        let widths: Vec<f64> = table.col_widths.iter().map(|f| f * w).collect();
        let total_w: f64 = widths.iter().sum();
        let left = ((w - total_w) / 2.0).max(0.0);
        let top = ((h - row_h * n_rows as f64) / 2.0).max(0.0);
        let bottom = top + row_h * n_rows as f64;
        let mut lefts = Vec::with_capacity(widths.len() + 1);
        let mut x = left;
        for cw in &widths {
            lefts.push(x);
            x += cw;
        }
        lefts.push(x);

        let px = |v: f64| v.round() as i32;
        let edge = rgb(table.edge_color).stroke_width(1);
        let pad = 6.0;
        let rows = table
            .header
            .iter()
            .map(|cells| (true, cells))
            .chain(table.rows.iter().map(|cells| (false, cells)));
        for (r, (is_header, cells)) in rows.enumerate() {
            let y0 = top + r as f64 * row_h;
            let y1 = y0 + row_h;
            if is_header {
                area.draw(&Rectangle::new(
                    [(px(left), px(y0)), (px(left + total_w), px(y1))],
                    rgb(table.header_fill).filled(),
                ))?;
            }
            for (c, text) in cells.iter().enumerate().take(widths.len()) {
                let (x0, cw) = (lefts[c], widths[c]);
                let align = if is_header { table.header_align } else { table.cell_align };
                let (x, hpos) = match align {
                    Align::Left => (x0 + pad, HPos::Left),
                    Align::Center => (x0 + cw / 2.0, HPos::Center),
                    Align::Right => (x0 + cw - pad, HPos::Right),
                };
                let bold = is_header || (table.emphasize_first_column && c == 0);
                let ink = if is_header { rgb(table.header_text) } else { rgb(Rgb::hex(0x000000)) };
                let style = self
                    .text(figure, table.font_size, bold, &ink)
                    .pos(Pos::new(hpos, VPos::Center));
                area.draw_text(text, &style, (px(x), px((y0 + y1) / 2.0)))?;
            }
            if matches!(table.edges, Edges::Horizontal | Edges::Closed) {
                if r == 0 {
                    area.draw(&PathElement::new(vec![(px(left), px(y0)), (px(left + total_w), px(y0))], edge))?;
                }
                area.draw(&PathElement::new(vec![(px(left), px(y1)), (px(left + total_w), px(y1))], edge))?;
            }
        }
        if matches!(table.edges, Edges::Vertical | Edges::Closed) {
            for x in &lefts {
                area.draw(&PathElement::new(vec![(px(*x), px(top)), (px(*x), px(bottom))], edge))?;
            }
        }
        Ok(())
    }

    /// Axis line color; frameless axes keep their ticks but drop the lines.
    fn axis_line(&self, axes: &Axes) -> RGBAColor {
        if axes.frame_on {
            self.theme.axis_color
        } else {
            TRANSPARENT
        }
    }

    fn text<'a, C: Color>(&self, figure: &'a Figure, size: f64, bold: bool, color: &C) -> TextStyle<'a> {
        let weight = if bold { FontStyle::Bold } else { FontStyle::Normal };
        FontDesc::new(
            FontFamily::from(figure.font_family.as_str()),
            points_to_px(size, figure),
            weight,
        )
        .color(color)
    }
}

impl Chart {
    /// Save with the default renderer; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        Renderer::default().save(self, path)
    }

    pub fn render_rgb(&self) -> Result<RgbImage> {
        Renderer::default().render_rgb(self)
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        Renderer::default().to_png_bytes(self)
    }

    pub fn render_svg(&self) -> Result<String> {
        Renderer::default().render_svg(self)
    }
}

/// Render a chart to PNG bytes on the blocking thread pool.
pub async fn render_png_async(chart: Chart) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || chart.to_png_bytes()).await?
}

fn rgb(color: Rgb) -> RGBColor {
    color.into()
}

fn points_to_px(size: f64, figure: &Figure) -> f64 {
    size * figure.dpi as f64 / 72.0
}

/// Rotation rounded to the nearest quarter turn, in `0..4`.
fn quarter_turns(degrees: f64) -> u32 {
    ((degrees.rem_euclid(360.0) / 90.0).round() as u32) % 4
}

fn rotate(style: TextStyle<'_>, degrees: f64) -> TextStyle<'_> {
    match quarter_turns(degrees) {
        1 | 3 => style
            .transform(FontTransform::Rotate90)
            .pos(Pos::new(HPos::Right, VPos::Center)),
        2 => style.transform(FontTransform::Rotate180),
        _ => style,
    }
}

/// Axis range plotters can draw: finite and non-empty.
fn usable((lo, hi): (f64, f64)) -> (f64, f64) {
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        return (lo - 0.5, hi + 0.5);
    }
    (lo, hi)
}

fn square<DB: DrawingBackend>(area: DrawingArea<DB, Shift>) -> DrawingArea<DB, Shift> {
    let (w, h) = area.dim_in_pixel();
    let side = w.min(h);
    area.shrink(((w - side) / 2, (h - side) / 2), (side, side))
}

/// Closed outline of a unit-radius wedge, sampled every two degrees.
fn wedge_outline(wedge: &Wedge) -> Vec<(f64, f64)> {
    let span = wedge.end - wedge.start;
    let steps = ((span / 2.0).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 3);
    points.push((0.0, 0.0));
    for i in 0..=steps {
        let theta = (wedge.start + span * i as f64 / steps as f64).to_radians();
        points.push((theta.cos(), theta.sin()));
    }
    points.push((0.0, 0.0));
    points
}

/// Split a polyline at non-finite points so gaps are not bridged.
fn finite_runs(points: &[(f64, f64)]) -> Vec<Vec<(f64, f64)>> {
    points
        .split(|(x, y)| !x.is_finite() || !y.is_finite())
        .filter(|run| !run.is_empty())
        .map(<[(f64, f64)]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_usable_ranges() {
        assert_eq!(usable((0.0, 10.0)), (0.0, 10.0));
        assert_eq!(usable((3.0, 3.0)), (2.5, 3.5));
        assert_eq!(usable((f64::NAN, 1.0)), (0.0, 1.0));
    }

    #[test]
    fn test_finite_runs_split_on_gaps() {
        let runs = finite_runs(&[(0.0, 1.0), (1.0, 2.0), (2.0, f64::NAN), (3.0, 4.0)]);
        assert_eq!(runs, vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(3.0, 4.0)]]);
    }

    #[test]
    fn test_wedge_outline_is_closed_at_center() {
        let wedge = Wedge {
            start: 0.0,
            end: 90.0,
            color: Rgb::hex(0),
            label: "a".into(),
            value: 1.0,
        };
        let outline = wedge_outline(&wedge);
        assert_eq!(outline.first(), Some(&(0.0, 0.0)));
        assert_eq!(outline.last(), Some(&(0.0, 0.0)));
        let (x, y) = outline[outline.len() - 2];
        assert!(x.abs() < 1e-9 && (y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_quarter_turns() {
        assert_eq!(quarter_turns(0.0), 0);
        assert_eq!(quarter_turns(90.0), 1);
        assert_eq!(quarter_turns(-90.0), 3);
        assert_eq!(quarter_turns(44.0), 0);
        assert_eq!(quarter_turns(360.0), 0);
    }
}
