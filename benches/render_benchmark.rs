/// Benchmark module for chart construction and rendering.
/// Measures building the chart model, layout helpers, and bitmap/SVG output.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ezchart::charts::layout::{place_words, squarify, word_frequencies, Rect};
use ezchart::utils::aggregate_points;
use ezchart::{render_png_async, DataFrame, PlotOptions, Plotter, Series, StyleConfig};
use tokio::runtime::Runtime;

/// Daily prices over a long index for time series benchmarks
fn setup_price_frame(days: usize) -> DataFrame {
    let start = chrono::NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let index = (0..days)
        .map(|d| (start + chrono::Duration::days(d as i64)).format("%Y-%m-%d").to_string())
        .collect();
    DataFrame::new(index)
        .with_column("close", (0..days).map(|i| 100.0 + (i as f64 * 0.05).sin() * 10.0).collect())
        .unwrap()
        .with_column("open", (0..days).map(|i| 100.0 + (i as f64 * 0.04).cos() * 10.0).collect())
        .unwrap()
}

/// Benchmark building chart models
///
/// # Arguments
/// * `c` - Criterion benchmark configuration
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let plotter = Plotter::default();
    let prices = setup_price_frame(3_000);
    let opts = PlotOptions::new().style(StyleConfig::new().title("Prices").data_labels(true));

    group.bench_function("timeseries_3000_days", |b| {
        b.iter(|| plotter.timeseries(black_box(&prices), &opts).unwrap())
    });
    group.bench_function("hist_50_bins", |b| {
        b.iter(|| plotter.hist(black_box(&prices), 50, &opts).unwrap())
    });
    group.bench_function("boxplot", |b| b.iter(|| plotter.boxplot(black_box(&prices), &opts).unwrap()));

    let points: Vec<(f64, f64)> = (0..100_000).map(|i| (i as f64, (i as f64).sqrt())).collect();
    group.bench_function("aggregate_100k_points", |b| {
        b.iter(|| aggregate_points(black_box(&points), 500))
    });
    group.finish();
}

/// Benchmark the treemap and word cloud layouts
///
/// # Arguments
/// * `c` - Criterion benchmark configuration
fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let sizes: Vec<f64> = (1..=200).rev().map(f64::from).collect();
    let canvas = Rect {
        x: 0.0,
        y: 0.0,
        dx: 100.0,
        dy: 100.0,
    };
    group.bench_function("squarify_200", |b| b.iter(|| squarify(black_box(&sizes), canvas)));

    let text = "market stocks banks rates credit growth earnings property steel retail energy "
        .repeat(50);
    let freqs = word_frequencies(&text);
    group.bench_function("word_frequencies", |b| b.iter(|| word_frequencies(black_box(&text))));
    group.bench_function("place_words", |b| {
        b.iter(|| place_words(black_box(&freqs), 100, 800.0, 400.0))
    });
    group.finish();
}

/// Benchmark rendering to bitmap and SVG
///
/// # Arguments
/// * `c` - Criterion benchmark configuration
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let rt = Runtime::new().unwrap();
    let plotter = Plotter::default();
    let prices = setup_price_frame(365);
    let line = plotter.timeseries(&prices, &PlotOptions::new()).unwrap();
    let pie = plotter
        .pie(
            &Series::from_pairs(None, [("a", 5.0), ("b", 3.0), ("c", 2.0)]),
            &PlotOptions::new(),
        )
        .unwrap();

    group.bench_function("timeseries_rgb", |b| b.iter(|| line.render_rgb().unwrap()));
    group.bench_function("timeseries_svg", |b| b.iter(|| line.render_svg().unwrap()));
    group.bench_function("pie_png_bytes", |b| b.iter(|| pie.to_png_bytes().unwrap()));
    group.bench_function("timeseries_png_async", |b| {
        b.iter(|| rt.block_on(async { render_png_async(line.clone()).await.unwrap() }))
    });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_build, bench_layout, bench_render
);
criterion_main!(benches);
