#[cfg(test)]
mod tests {
    use crate::chart::{Anchor, Edges, LegendKind, PatchKind, Ticks};
    use crate::charts::basic::BoxStats;
    use crate::charts::{ChartKind, HeatmapOptions, PlotOptions, Plotter, TableOptions, TitleLoc, WordCloudOptions};
    use crate::error::ChartError;
    use crate::palette::{PaletteRegistry, Rgb, DEFAULT_CYCLE};
    use crate::style::{StyleApplier, StyleConfig};
    use crate::types::{DataFrame, Series};
    use ndarray::array;
    use pretty_assertions::assert_eq;

    fn quarters() -> DataFrame {
        DataFrame::new(vec!["Q1".into(), "Q2".into(), "Q3".into()])
            .with_column("revenue", vec![10.0, 20.0, 15.0])
            .unwrap()
    }

    fn two_columns() -> DataFrame {
        quarters().with_column("cost", vec![4.0, 6.0, 5.0]).unwrap()
    }

    fn shares() -> Series {
        Series::from_pairs(Some("share"), [("a", 50.0), ("b", 30.0), ("c", 20.0)])
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ChartKind::ALL {
            assert_eq!(ChartKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(ChartKind::Combo.to_string(), "combo_chart");
        assert_eq!(ChartKind::from_name("radar"), None);
    }

    #[test]
    fn test_bar_groups_and_legend() {
        let plotter = Plotter::default();
        let single = plotter.bar(&quarters(), &PlotOptions::new()).unwrap();
        let axes = single.primary();
        assert_eq!(axes.patches.len(), 3);
        assert!(!axes.legend.is_shown());
        assert_eq!(axes.x.ticks, Ticks::Categories(vec!["Q1".into(), "Q2".into(), "Q3".into()]));
        assert!((axes.patches[0].width() - 0.8).abs() < 1e-9);

        let grouped = plotter.bar(&two_columns(), &PlotOptions::new()).unwrap();
        let axes = grouped.primary();
        assert_eq!(axes.patches.len(), 6);
        assert!(axes.legend.is_shown());
        assert!((axes.patches[0].width() - 0.4).abs() < 1e-9);
        // Both columns share a color each; the first bar of each group differs.
        assert_ne!(axes.patches[0].fill, axes.patches[3].fill);
    }

    #[test]
    fn test_bar_rejects_empty_frame() {
        let empty = DataFrame::new(vec![]);
        assert!(matches!(
            Plotter::default().bar(&empty, &PlotOptions::new()),
            Err(ChartError::EmptyData(_))
        ));
    }

    #[test]
    fn test_bar_extra_options() {
        let mut style = StyleConfig::new();
        style.extra.insert("width".into(), serde_json::json!(0.5));
        style.extra.insert("alpha".into(), serde_json::json!(0.3));
        let chart = Plotter::default()
            .bar(&quarters(), &PlotOptions::new().style(style))
            .unwrap();
        let patch = &chart.primary().patches[0];
        assert!((patch.width() - 0.5).abs() < 1e-9);
        assert_eq!(patch.alpha, 0.3);
    }

    #[test]
    fn test_hist_bins() {
        let plotter = Plotter::default();
        assert!(matches!(
            plotter.hist(&quarters(), 0, &PlotOptions::new()),
            Err(ChartError::InvalidInput(_))
        ));
        let chart = plotter.hist(&two_columns(), 5, &PlotOptions::new()).unwrap();
        let axes = chart.primary();
        assert_eq!(axes.patches.len(), 10);
        assert!(axes.patches.iter().all(|p| p.kind == PatchKind::Bin && p.alpha == 0.5));
        let total: f64 = axes.patches.iter().map(|p| p.value).sum();
        assert_eq!(total, 6.0);
        assert_eq!(axes.y.label.as_deref(), Some("Frequency"));
    }

    #[test]
    fn test_pie_wedges_and_percentages() {
        let chart = Plotter::default().pie(&shares(), &PlotOptions::new()).unwrap();
        let axes = chart.primary();
        assert_eq!(axes.wedges.len(), 3);
        assert_eq!(axes.wedges[0].start, 0.0);
        assert!((axes.wedges[2].end - 360.0).abs() < 1e-9);
        assert!((axes.wedges[0].end - 180.0).abs() < 1e-9);

        let texts: Vec<&str> = axes.annotations.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "50.0%", "b", "30.0%", "c", "20.0%"]);
        // "a" spans the top half, so its bisector points straight up.
        assert_eq!(axes.annotations[0].anchor, Anchor::Left);
        assert!(!axes.x.visible && !axes.y.visible && !axes.frame_on);
        assert!(!axes.legend.is_shown());
    }

    #[test]
    fn test_pie_rejects_bad_values() {
        let plotter = Plotter::default();
        let negative = Series::from_pairs(None, [("a", 1.0), ("b", -1.0)]);
        assert!(matches!(
            plotter.pie(&negative, &PlotOptions::new()),
            Err(ChartError::InvalidInput(_))
        ));
        let zeros = Series::from_pairs(None, [("a", 0.0), ("b", 0.0)]);
        assert!(matches!(
            plotter.pie(&zeros, &PlotOptions::new()),
            Err(ChartError::EmptyData(_))
        ));
    }

    #[test]
    fn test_pie_ignores_axis_fields() {
        let style = StyleConfig::new()
            .title("Market share")
            .labels("x", "y")
            .show_legend(true);
        let chart = Plotter::default()
            .pie(&shares(), &PlotOptions::new().style(style))
            .unwrap();
        let axes = chart.primary();
        assert_eq!(axes.title.as_ref().map(|t| t.text.as_str()), Some("Market share"));
        assert_eq!(axes.x.label, None);
        assert_eq!(axes.y.label, None);
        assert!(axes.legend.is_shown());
    }

    #[test]
    fn test_timeseries_dates() {
        let frame = DataFrame::new(vec!["2024-01-03".into(), "2024-01-01".into(), "2024-01-02".into()])
            .with_column("close", vec![3.0, 1.0, 2.0])
            .unwrap();
        let chart = Plotter::default().timeseries(&frame, &PlotOptions::new()).unwrap();
        let axes = chart.primary();
        assert_eq!(axes.lines[0].points, vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
        assert_eq!(axes.lines[0].width, 2);
        assert_eq!(axes.x.tick_label(1.0), "2024-01-02");

        let intraday = DataFrame::new(vec!["2024-01-01 09:30:00".into(), "2024-01-01 15:00:00".into()])
            .with_column("price", vec![1.0, 2.0])
            .unwrap();
        let chart = Plotter::default().timeseries(&intraday, &PlotOptions::new()).unwrap();
        assert_eq!(chart.primary().x.tick_label(0.0), "2024-01-01 09:30");
    }

    #[test]
    fn test_timeseries_invalid_date() {
        let frame = DataFrame::new(vec!["yesterday".into()])
            .with_column("v", vec![1.0])
            .unwrap();
        let err = Plotter::default().timeseries(&frame, &PlotOptions::new()).unwrap_err();
        assert!(matches!(err, ChartError::InvalidDate(s) if s == "yesterday"));
    }

    #[test]
    fn test_scatter_columns() {
        let frame = two_columns().with_column("noise", vec![f64::NAN, 1.0, 2.0]).unwrap();
        let plotter = Plotter::default();
        let chart = plotter.scatter(&frame, "revenue", "cost", &PlotOptions::new()).unwrap();
        let axes = chart.primary();
        assert_eq!(axes.markers[0].points.len(), 3);
        assert_eq!(axes.x.label.as_deref(), Some("revenue"));
        assert_eq!(axes.y.label.as_deref(), Some("cost"));

        let chart = plotter.scatter(&frame, "noise", "cost", &PlotOptions::new()).unwrap();
        assert_eq!(chart.primary().markers[0].points.len(), 2);

        assert!(matches!(
            plotter.scatter(&frame, "revenue", "profit", &PlotOptions::new()),
            Err(ChartError::ColumnNotFound(c)) if c == "profit"
        ));
    }

    #[test]
    fn test_scatter_ignores_data_labels() {
        let chart = Plotter::default()
            .scatter(&two_columns(), "revenue", "cost", &PlotOptions::new().style(StyleConfig::new().data_labels(true)))
            .unwrap();
        assert!(chart.primary().annotations.is_empty());
    }

    #[test]
    fn test_box_stats() {
        let mut values: Vec<f64> = (1..=9).map(f64::from).collect();
        values.push(100.0);
        let stats = BoxStats::compute(values);
        assert_eq!(stats.outliers, vec![100.0]);
        assert_eq!(stats.low, 1.0);
        assert_eq!(stats.high, 9.0);
        assert!(stats.q1 < stats.median && stats.median < stats.q3);
        assert!((5.0..=6.0).contains(&stats.median));
    }

    #[test]
    fn test_boxplot_elements() {
        let frame = DataFrame::new((0..5).map(|i| i.to_string()).collect())
            .with_column("a", vec![1.0, 2.0, 3.0, 4.0, 50.0])
            .unwrap()
            .with_column("empty", vec![f64::NAN; 5])
            .unwrap();
        let chart = Plotter::default().boxplot(&frame, &PlotOptions::new()).unwrap();
        let axes = chart.primary();
        assert_eq!(axes.patches.len(), 1);
        assert_eq!(axes.patches[0].kind, PatchKind::Box);
        assert_eq!(axes.lines.len(), 5);
        assert_eq!(axes.markers.len(), 1);
        assert_eq!(axes.x.ticks, Ticks::Categories(vec!["a".into(), "empty".into()]));

        let blank = DataFrame::new(vec!["0".into()]).with_column("x", vec![f64::NAN]).unwrap();
        assert!(matches!(
            Plotter::default().boxplot(&blank, &PlotOptions::new()),
            Err(ChartError::EmptyData(_))
        ));
    }

    #[test]
    fn test_combo_merged_legend() {
        let bars = Series::from_pairs(Some("volume"), [("Mon", 100.0), ("Tue", 120.0)]);
        let line = Series::from_pairs(None, [("Mon", 10.5), ("Tue", 11.0)]);
        let style = StyleConfig::new().title("Volume and price");
        let chart = Plotter::default()
            .combo_chart(&bars, &line, "Volume", "Price", &PlotOptions::new().style(style))
            .unwrap();

        assert_eq!(chart.axes().len(), 2);
        let primary = chart.primary();
        let twin = chart.twin_of(0).unwrap();
        assert_eq!(primary.patches.len(), 2);
        assert_eq!(twin.lines[0].points, vec![(0.0, 10.5), (1.0, 11.0)]);
        assert_eq!(primary.y.label.as_deref(), Some("Volume"));
        assert_eq!(twin.y.label.as_deref(), Some("Price"));

        let labels: Vec<(&str, LegendKind)> = primary
            .legend
            .entries
            .iter()
            .map(|e| (e.label.as_str(), e.kind))
            .collect();
        assert_eq!(labels, vec![("volume", LegendKind::Swatch), ("line", LegendKind::Line)]);
        assert!(primary.legend.is_shown());
        assert!(!twin.legend.is_shown());
    }

    #[test]
    fn test_combo_label_fontsize_reaches_both_y_labels() {
        let bars = Series::from_pairs(Some("volume"), [("Mon", 100.0), ("Tue", 120.0)]);
        let line = Series::from_pairs(Some("close"), [("Mon", 10.5), ("Tue", 11.0)]);
        let style = StyleConfig {
            label_fontsize: Some(16.0),
            ..StyleConfig::default()
        };
        let chart = Plotter::default()
            .combo_chart(&bars, &line, "Volume", "Price", &PlotOptions::new().style(style))
            .unwrap();
        assert_eq!(chart.primary().y.label_size, Some(16.0));
        assert_eq!(chart.twin_of(0).unwrap().y.label_size, Some(16.0));

        let plain = Plotter::default()
            .combo_chart(&bars, &line, "Volume", "Price", &PlotOptions::new())
            .unwrap();
        assert_eq!(plain.twin_of(0).unwrap().y.label_size, None);
    }

    #[test]
    fn test_combo_length_mismatch() {
        let bars = Series::from_values(None, vec![1.0, 2.0, 3.0]);
        let line = Series::from_values(None, vec![1.0]);
        assert!(matches!(
            Plotter::default().combo_chart(&bars, &line, "l", "r", &PlotOptions::new()),
            Err(ChartError::LengthMismatch { expected: 3, found: 1 })
        ));
    }

    #[test]
    fn test_heatmap_cells() {
        let data = array![[0.0, 1.0], [2.0, 3.0]];
        let rows = vec!["r0".to_string(), "r1".to_string()];
        let heat = HeatmapOptions {
            annotate: true,
            annot_format: None,
        };
        let chart = Plotter::default()
            .heatmap(&data, &rows, &[], &heat, &PlotOptions::new())
            .unwrap();
        let axes = chart.primary();
        assert_eq!(axes.patches.len(), 4);
        // Row 0 is drawn at the top.
        assert_eq!(axes.patches[0].center(), (0.0, 1.0));
        assert_eq!(axes.y.ticks, Ticks::Categories(vec!["r1".into(), "r0".into()]));
        assert_eq!(axes.x.ticks, Ticks::Categories(vec!["0".into(), "1".into()]));
        assert_eq!(axes.annotations[3].text, "3.00");
        assert_ne!(axes.patches[0].fill, axes.patches[3].fill);
    }

    #[test]
    fn test_heatmap_label_mismatch() {
        let data = array![[1.0, 2.0]];
        let cols = vec!["only".to_string()];
        assert!(matches!(
            Plotter::default().heatmap(&data, &[], &cols, &HeatmapOptions::default(), &PlotOptions::new()),
            Err(ChartError::LengthMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_pairplot_grid() {
        let frame = two_columns().with_column("margin", vec![0.6, 0.7, 0.66]).unwrap();
        let style = StyleConfig::new().title("Pairs").labels("ignored", "ignored");
        let chart = Plotter::default()
            .pairplot(&frame, &PlotOptions::new().style(style))
            .unwrap();
        assert_eq!(chart.figure.grid, (3, 3));
        assert_eq!(chart.axes().len(), 9);
        assert_eq!(chart.figure.size, (7.5, 7.5));
        assert_eq!(chart.figure.suptitle.as_ref().map(|l| l.text.as_str()), Some("Pairs"));

        let diagonal = &chart.axes()[4];
        assert!(diagonal.markers.is_empty());
        assert!(diagonal.patches.iter().all(|p| p.kind == PatchKind::Bin));
        let corner = &chart.axes()[6];
        assert_eq!(corner.x.label.as_deref(), Some("revenue"));
        assert_eq!(corner.y.label.as_deref(), Some("margin"));
        assert_eq!(corner.markers[0].points[0], (10.0, 0.6));
        assert!(chart.axes().iter().all(|a| a.title.is_none()));
    }

    #[test]
    fn test_treemap_tiles() {
        let data = Series::from_pairs(None, [("small", 10.0), ("big", 60.0), ("none", 0.0), ("mid", 30.0)]);
        let chart = Plotter::default()
            .treemap(&data, &PlotOptions::new().style(StyleConfig::new().title("Holdings")))
            .unwrap();
        let axes = chart.primary();
        assert_eq!(axes.patches.len(), 3);
        let labels: Vec<&str> = axes.annotations.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(labels, vec!["big", "mid", "small"]);
        assert!(axes.annotations.iter().all(|a| a.color == Rgb::hex(0xFFFFFF)));
        // Padding shrinks tiles slightly but keeps their ordering by area.
        let areas: Vec<f64> = axes.patches.iter().map(|p| p.width() * p.height()).collect();
        assert!(areas[0] > areas[1] && areas[1] > areas[2]);
        assert!(areas[0] / areas[2] > 4.0);
        assert_eq!(chart.figure.size, (10.0, 8.0));
        assert_eq!(chart.figure.suptitle.as_ref().map(|l| l.text.as_str()), Some("Holdings"));
        assert!(axes.title.is_none());
    }

    #[test]
    fn test_treemap_needs_positive_values() {
        let data = Series::from_pairs(None, [("a", 0.0), ("b", -3.0)]);
        assert!(matches!(
            Plotter::default().treemap(&data, &PlotOptions::new()),
            Err(ChartError::EmptyData(_))
        ));
    }

    #[test]
    fn test_wordcloud_sizes_by_frequency() {
        let text = "market market market stock stock bond the and";
        let opts = WordCloudOptions {
            max_words: 10,
            ..WordCloudOptions::default()
        };
        let chart = Plotter::default().wordcloud(text, &opts, &PlotOptions::new()).unwrap();
        let words = &chart.primary().annotations;
        assert_eq!(words[0].text, "market");
        assert!(words.iter().all(|w| w.text != "the" && w.text != "and"));
        assert!(words[0].size > words[words.len() - 1].size);
        assert_eq!(chart.figure.suptitle.as_ref().map(|l| l.text.as_str()), Some("Word Cloud"));

        assert!(matches!(
            Plotter::default().wordcloud("   ", &opts, &PlotOptions::new()),
            Err(ChartError::EmptyData(_))
        ));
    }

    #[test]
    fn test_table_header_and_layout() {
        let tbl = TableOptions {
            title: "Summary".into(),
            title_loc: TitleLoc::Right,
            edges: Edges::Closed,
            float_format: Some(crate::style::NumberFormat::parse("{:,.1f}").unwrap()),
            ..TableOptions::default()
        };
        let chart = Plotter::default().table(&two_columns(), &tbl).unwrap();
        let axes = chart.primary();
        let table = axes.table.as_ref().unwrap();
        assert_eq!(table.header, Some(vec!["revenue".to_string(), "cost".to_string()]));
        assert_eq!(table.rows[0], vec!["10.0".to_string(), "4.0".to_string()]);
        assert_eq!(table.edges, Edges::Closed);
        assert_eq!(table.col_widths, vec![0.5, 0.5]);
        assert_eq!(table.n_rows(), 4);
        let title = axes.title.as_ref().unwrap();
        assert!(title.bold);
        assert_eq!(title.align, Anchor::Right);
        assert_eq!(chart.figure.size, (5.5, 6.0));
    }

    #[test]
    fn test_table_options() {
        let plotter = Plotter::default();
        let tbl = TableOptions {
            header: false,
            col_labels: Some(vec!["A".into(), "B".into()]),
            columns: Some(vec!["x".into(), "y".into()]),
            vertical: true,
            ..TableOptions::default()
        };
        let table = plotter.table(&two_columns(), &tbl).unwrap().primary().table.clone().unwrap();
        assert_eq!(table.header, Some(vec!["A".to_string(), "B".to_string()]));
        assert!(table.emphasize_first_column);

        let bad = TableOptions {
            col_widths: Some(vec![1.0]),
            ..TableOptions::default()
        };
        assert!(matches!(
            plotter.table(&two_columns(), &bad),
            Err(ChartError::LengthMismatch { expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_unknown_palette_falls_back() {
        let chart = Plotter::default()
            .bar(&two_columns(), &PlotOptions::new().palette("no-such-palette"))
            .unwrap();
        assert_eq!(chart.primary().patches[0].fill, DEFAULT_CYCLE[0]);
        assert_eq!(chart.primary().patches[3].fill, DEFAULT_CYCLE[1]);

        let chart = Plotter::default()
            .bar(&quarters(), &PlotOptions::new().palette(Vec::<Rgb>::new()))
            .unwrap();
        assert_eq!(chart.primary().patches[0].fill, DEFAULT_CYCLE[0]);
    }

    #[test]
    fn test_injected_registry() {
        let registry = PaletteRegistry::new().with_palette("mono", vec![Rgb::hex(0x123456)]);
        let plotter = Plotter::new(registry, StyleApplier::default());
        let chart = plotter
            .bar(&two_columns(), &PlotOptions::new().palette("mono"))
            .unwrap();
        assert!(chart.primary().patches.iter().all(|p| p.fill == Rgb::hex(0x123456)));
    }

    #[test]
    fn test_data_labels_on_bars() {
        let chart = Plotter::default()
            .bar(&quarters(), &PlotOptions::new().style(StyleConfig::new().data_labels(true)))
            .unwrap();
        let texts: Vec<&str> = chart.primary().annotations.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["10.0", "20.0", "15.0"]);
    }
}
