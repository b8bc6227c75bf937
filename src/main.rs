//! Chart gallery
//!
//! Renders one chart of each kind into an output directory (`ezchart-gallery` by default, or
//! the first argument).

use anyhow::{Context, Result};
use log::info;
use ndarray::Array2;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

use ezchart::{
    render_png_async, ChartKind, DataFrame, HeatmapOptions, PlotOptions, Plotter, Series, StyleConfig, TableOptions,
    TitleLoc, WordCloudOptions,
};

const SAMPLE_TEXT: &str = "Stocks rallied as banks led the market higher. Bank earnings beat \
    forecasts while steel and property stocks lagged. Investors watched interest rates, credit \
    growth and foreign flows as the market index closed at a record high.";

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("ezchart-gallery"));
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let rt = Runtime::new().context("starting the tokio runtime")?;
    rt.block_on(render_gallery(&out_dir))?;
    info!("Gallery written to {}", out_dir.display());
    Ok(())
}

async fn render_gallery(out_dir: &Path) -> Result<()> {
    let plotter = Plotter::default();
    let quarters = DataFrame::new(vec!["Q1".into(), "Q2".into(), "Q3".into(), "Q4".into(), "Q5".into()])
        .with_column("revenue", vec![1_234_567.0, 2_345_678.0, 3_456_789.0, 4_567_890.0, 5_678_901.0])?
        .with_column("profit", vec![234_567.0, 345_678.0, 456_789.0, 567_890.0, 678_901.0])?;
    let prices = DataFrame::new((1..=20).map(|d| format!("2024-03-{:02}", d)).collect())
        .with_column("close", (0..20).map(|i| 25.0 + (i as f64 * 0.7).sin() * 3.0 + i as f64 * 0.2).collect())?
        .with_column("open", (0..20).map(|i| 25.5 + (i as f64 * 0.6).cos() * 2.5 + i as f64 * 0.2).collect())?;
    let shares = Series::from_pairs(
        Some("weight"),
        [("Banks", 38.0), ("Real estate", 17.0), ("Steel", 9.0), ("Retail", 8.0), ("Energy", 6.0)],
    );

    let titled = |title: &str| PlotOptions::new().style(StyleConfig::new().title(title));
    let mut charts = Vec::new();
    charts.push((
        ChartKind::Bar,
        plotter.bar(
            &quarters,
            &PlotOptions::new().style(StyleConfig::new().title("Revenue and profit").data_labels(true)),
        )?,
    ));
    charts.push((ChartKind::Hist, plotter.hist(&prices, 8, &titled("Price distribution"))?));
    charts.push((ChartKind::Pie, plotter.pie(&shares, &titled("Index weights"))?));
    charts.push((
        ChartKind::Timeseries,
        plotter.timeseries(&prices, &PlotOptions::new().palette("stock").style(StyleConfig::new().title("Prices")))?,
    ));
    let matrix = Array2::from_shape_fn((4, 4), |(i, j)| if i == j { 1.0 } else { 0.2 * (i + j) as f64 - 0.5 });
    let names: Vec<String> = ["VCB", "FPT", "HPG", "MWG"].iter().map(|s| s.to_string()).collect();
    charts.push((
        ChartKind::Heatmap,
        plotter.heatmap(
            &matrix,
            &names,
            &names,
            &HeatmapOptions {
                annotate: true,
                ..HeatmapOptions::default()
            },
            &PlotOptions::new().palette("percentage").style(StyleConfig::new().title("Correlation")),
        )?,
    ));
    charts.push((ChartKind::Scatter, plotter.scatter(&prices, "open", "close", &titled("Open vs close"))?));
    charts.push((ChartKind::Treemap, plotter.treemap(&shares, &titled("Index weights"))?));
    charts.push((ChartKind::Boxplot, plotter.boxplot(&prices, &titled("Price spread"))?));
    charts.push((
        ChartKind::Wordcloud,
        plotter.wordcloud(SAMPLE_TEXT, &WordCloudOptions::default(), &PlotOptions::new().palette("amount"))?,
    ));
    charts.push((ChartKind::Pairplot, plotter.pairplot(&quarters, &titled("Pairs"))?));
    charts.push((
        ChartKind::Table,
        plotter.table(
            &quarters,
            &TableOptions {
                title: "Quarterly results".into(),
                title_loc: TitleLoc::Left,
                ..TableOptions::default()
            },
        )?,
    ));
    let volume = Series::from_pairs(Some("Volume"), prices.index().iter().cloned().zip((0..20).map(|i| 1e6 + i as f64 * 5e4)));
    let close = Series::new(Some("Close"), prices.index().to_vec(), prices.column("close")?.to_vec())?;
    charts.push((
        ChartKind::Combo,
        plotter.combo_chart(&volume, &close, "Volume", "Price", &titled("Volume and close"))?,
    ));

    for (kind, chart) in charts {
        let path = out_dir.join(format!("{}.png", kind));
        let bytes = render_png_async(chart.clone()).await?;
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        chart.save(out_dir.join(format!("{}.svg", kind)))?;
        info!("Rendered {}", path.display());
    }
    Ok(())
}
