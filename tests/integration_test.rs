use ezchart::palette::DEFAULT_CYCLE;
use ezchart::{
    help, readable_format, ChartError, ChartKind, DataFrame, PaletteRegistry, PlotOptions, Plotter, Series, StyleConfig,
    TableOptions, WordCloudOptions,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn setup_quarters() -> (TempDir, DataFrame) {
    let temp_dir = TempDir::new().unwrap();
    let frame = DataFrame::new(["Q1", "Q2", "Q3", "Q4", "Q5"].iter().map(|s| s.to_string()).collect())
        .with_column("revenue", vec![1_234_567.0, 2_345_678.0, 3_456_789.0, 4_567_890.0, 5_678_901.0])
        .unwrap();
    (temp_dir, frame)
}

#[test]
fn test_bar_with_data_labels_end_to_end() {
    let (temp_dir, frame) = setup_quarters();
    let style = StyleConfig::from_json_str(
        r#"{
            "title": "Revenue",
            "xlabel": "Quarter",
            "ylabel": "VND",
            "data_labels": true,
            "ytick_format": "{:,.0}",
            "grid": true
        }"#,
    )
    .unwrap();
    let opts = PlotOptions::new().palette("vnstock").style(style);
    let chart = Plotter::default().bar(&frame, &opts).unwrap();

    let axes = chart.primary();
    let vnstock = PaletteRegistry::builtin().get("vnstock").unwrap().to_vec();
    assert!(axes.patches.iter().all(|p| p.fill == vnstock[0]));

    let labels: Vec<&str> = axes.annotations.iter().map(|a| a.text.as_str()).collect();
    assert_eq!(labels, vec!["1.2M", "2.3M", "3.5M", "4.6M", "5.7M"]);
    let expected: Vec<String> = frame.column("revenue").unwrap().iter().map(|v| readable_format(*v)).collect();
    assert_eq!(labels, expected);

    assert_eq!(axes.y.tick_label(1_500_000.0), "1,500,000");
    assert!(axes.grid);
    assert_eq!(axes.y_bounds().0, 0.0);

    let path = temp_dir.path().join("revenue.png");
    chart.save(&path).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_unknown_palette_still_renders() {
    let (temp_dir, frame) = setup_quarters();
    let chart = Plotter::default()
        .bar(&frame, &PlotOptions::new().palette("no-such-palette"))
        .unwrap();
    assert_eq!(chart.primary().patches[0].fill, DEFAULT_CYCLE[0]);

    let err = PaletteRegistry::builtin().resolve(&"no-such-palette".into()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("no-such-palette"));
    assert!(message.contains("vnstock"));

    let path = temp_dir.path().join("fallback.svg");
    chart.save(&path).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("<svg"));
}

#[test]
fn test_every_kind_renders() {
    let (temp_dir, frame) = setup_quarters();
    let frame = frame.with_column("cost", vec![1.0e6, 1.5e6, 2.5e6, 3.0e6, 4.2e6]).unwrap();
    let series = Series::from_pairs(Some("weight"), [("Banks", 40.0), ("Steel", 25.0), ("Retail", 35.0)]);
    let dates = DataFrame::new((1..=6).map(|d| format!("2024-05-{:02}", d)).collect())
        .with_column("close", vec![10.0, 10.5, 10.2, 11.0, 11.4, 11.1])
        .unwrap();
    let plotter = Plotter::default();
    let opts = PlotOptions::new().style(StyleConfig::new().title("Gallery"));

    let charts = vec![
        (ChartKind::Bar, plotter.bar(&frame, &opts).unwrap()),
        (ChartKind::Hist, plotter.hist(&frame, 5, &opts).unwrap()),
        (ChartKind::Pie, plotter.pie(&series, &opts).unwrap()),
        (ChartKind::Timeseries, plotter.timeseries(&dates, &opts).unwrap()),
        (
            ChartKind::Heatmap,
            plotter
                .heatmap(
                    &ndarray::array![[1.0, 0.3], [0.3, 1.0]],
                    &[],
                    &[],
                    &Default::default(),
                    &opts,
                )
                .unwrap(),
        ),
        (ChartKind::Scatter, plotter.scatter(&frame, "revenue", "cost", &opts).unwrap()),
        (ChartKind::Treemap, plotter.treemap(&series, &opts).unwrap()),
        (ChartKind::Boxplot, plotter.boxplot(&frame, &opts).unwrap()),
        (
            ChartKind::Wordcloud,
            plotter
                .wordcloud("banks banks steel retail growth growth growth", &WordCloudOptions::default(), &opts)
                .unwrap(),
        ),
        (ChartKind::Pairplot, plotter.pairplot(&frame, &opts).unwrap()),
        (ChartKind::Table, plotter.table(&frame, &TableOptions::default()).unwrap()),
        (
            ChartKind::Combo,
            plotter
                .combo_chart(&series, &series, "left", "right", &opts)
                .unwrap(),
        ),
    ];
    assert_eq!(charts.len(), ChartKind::ALL.len());

    for (kind, chart) in charts {
        let path = temp_dir.path().join(format!("{}.png", kind));
        chart.save(&path).unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0, "{} wrote an empty file", kind);
    }
}

#[test]
fn test_style_is_scoped_per_chart() {
    let (_temp_dir, frame) = setup_quarters();
    let plotter = Plotter::default();
    let styled = PlotOptions::new().style(StyleConfig {
        font_name: Some("DejaVu Sans".into()),
        tick_rotation: Some(45.0),
        ..StyleConfig::default()
    });
    let first = plotter.bar(&frame, &styled).unwrap();
    let second = plotter.bar(&frame, &PlotOptions::new()).unwrap();

    assert_eq!(first.figure.font_family, "DejaVu Sans");
    assert_eq!(first.primary().x.tick_rotation, 45.0);
    assert_eq!(second.figure.font_family, ezchart::chart::DEFAULT_FONT);
    assert_eq!(second.primary().x.tick_rotation, 90.0);
}

#[test]
fn test_wordcloud_savefig() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cloud.svg");
    let wc = WordCloudOptions {
        savefig: Some(path.clone()),
        ..WordCloudOptions::default()
    };
    Plotter::default()
        .wordcloud("liquidity liquidity margin rates", &wc, &PlotOptions::new())
        .unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}

#[test]
fn test_help_lookup() {
    assert!(help("MPlot.bar").unwrap().contains("grouped bar chart"));
    assert!(matches!(help("nope"), Err(ChartError::UnknownTopic(_))));
}
