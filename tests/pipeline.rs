//! Integration tests: records → charts → pages and document
//!
//! These tests drive the public API the way the command line tool does,
//! from result files on disk to rendered output.

use std::fs;
use std::path::PathBuf;

use benchplot::chart::{assemble, BarSpec, ChartSpec, SeriesSpec};
use benchplot::extract::{expected_cross_partition_pct, XAxis, YAxis};
use benchplot::filter::Predicate;
use benchplot::output::{PanelDocument, PlotConfig, PlottersRenderer};
use benchplot::records::load::write_records;
use benchplot::records::{JsonDirectory, RecordSource};
use benchplot::report::{run_report, OutputFormat, ReportConfig};
use benchplot::Error;
use approx::assert_abs_diff_eq;
use tempfile::tempdir;

mod common;
use common::{abc_records, expect_bars, expect_lines, multipart_record, relative_error, scale_record, tpcc_record};

fn small_plots() -> PlotConfig {
    PlotConfig::default().size(480, 360)
}

// =================================================================================================
// Assembly through the public API
// =================================================================================================

#[test]
fn test_three_records_three_series() {
    let records = abc_records();
    let series = ["A", "B", "C"]
        .iter()
        .map(|db| {
            SeriesSpec::new(
                db,
                Predicate::and(vec![Predicate::name("X"), Predicate::db(db)]),
            )
        })
        .collect();
    let spec = ChartSpec::lines("abc", "abc.json", "abc.svg", XAxis::Threads, YAxis::Metric { index: 0 }, series);

    let chart = expect_lines(assemble(&spec, &records).unwrap());
    assert_eq!(chart.series.len(), 3);
    for (series, record) in chart.series.iter().zip(&records) {
        assert_eq!(series.points.len(), 1);
        let point = &series.points[0];
        assert_eq!(point.x, record.threads().unwrap() as f64);
        assert_eq!(point.summary.mid, YAxis::Metric { index: 0 }.extract(record).unwrap().values()[0]);
    }
}

#[test]
fn test_cross_partition_axis_end_to_end() {
    let records: Vec<_> = [0, 10, 50, 100]
        .iter()
        .map(|&pct| multipart_record("kvdb-st", pct, 1000.0))
        .collect();
    let spec = ChartSpec::lines(
        "multipart",
        "m.json",
        "m.svg",
        XAxis::CrossPartitionPct,
        YAxis::Metric { index: 0 },
        vec![SeriesSpec::new("Partition-Store", Predicate::db("kvdb-st"))],
    );

    let chart = expect_lines(assemble(&spec, &records).unwrap());
    let xs = chart.series[0].xs();
    assert_eq!(xs[0], 0.0);
    assert_eq!(xs[3], 100.0);
    assert!(relative_error(xs[1], expected_cross_partition_pct(10.0)) < 1e-12);
    assert!(xs.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(chart.series[0].points[0].summary.mid, 1000.0);
}

#[test]
fn test_per_core_series() {
    let records = vec![scale_record("X", "A", 1, 900.0), scale_record("X", "A", 3, 2000.0)];
    let spec = ChartSpec::lines(
        "percore",
        "r.json",
        "p.svg",
        XAxis::Threads,
        YAxis::MetricPerCore { index: 0 },
        vec![SeriesSpec::new("A", Predicate::db("A"))],
    );
    let chart = expect_lines(assemble(&spec, &records).unwrap());
    let mids: Vec<f64> = chart.series[0].points.iter().map(|p| p.summary.mid).collect();
    assert_abs_diff_eq!(mids[0], 900.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mids[1], 2000.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn test_bar_positions() {
    let records = vec![
        tpcc_record("persist-none", "45,43,4,4,4", 8, 100.0),
        tpcc_record("persist-temp", "45,43,4,4,4", 8, 90.0),
        tpcc_record("persist-real", "45,43,4,4,4", 8, 80.0),
    ];
    let bars = ["persist-none", "persist-temp", "persist-real"]
        .iter()
        .map(|p| BarSpec::new(p, Predicate::persist(p)))
        .collect();
    let spec = ChartSpec::bars("persist", "r.json", "b.svg", YAxis::Metric { index: 0 }, bars);

    let chart = expect_bars(assemble(&spec, &records).unwrap());
    let positions: Vec<f64> = chart.bars.iter().map(|b| b.position).collect();
    assert_eq!(positions.len(), 3);
    assert!((positions[2] - 0.30).abs() < 1e-12);
    assert_eq!(chart.bars[1].summary.mid, 90.0);
}

// =================================================================================================
// Full report runs
// =================================================================================================

const REPORT: &str = r#"
    results_dir = "unused"
    output = "report.svg"

    [[charts]]
    name = "tpcc"
    source = "tpcc.json"
    outfile = "tpcc.svg"
    x = "threads"
    y = { kind = "metric", index = 0 }
    x_label = "nthreads"
    y_label = "throughput (txns/sec)"
    y_format = "thousands"
    legend = "upper left"
    title = "TPC-C scale (standard mix)"

    [[charts.series]]
    label = "Silo"
    [charts.series.predicate]
    kind = "and"
    all = [
        { kind = "equals", field = "name", value = "scale_tpcc" },
        { kind = "equals_if_present", field = "persist", value = "persist-none" },
        { kind = "workload_mix", mix = [45, 43, 4, 4, 4] },
    ]

    [[charts.series]]
    label = "Silo+Persist"
    [charts.series.predicate]
    kind = "and"
    all = [
        { kind = "equals", field = "name", value = "scale_tpcc" },
        { kind = "equals_if_present", field = "persist", value = "persist-real" },
        { kind = "workload_mix", mix = [45, 43, 4, 4, 4] },
    ]

    [[charts]]
    name = "persist"
    source = "tpcc.json"
    outfile = "persist.svg"
    y = { kind = "metric", index = 0 }
    y_label = "throughput (txns/sec)"

    [[charts.bars]]
    label = "none@8"
    [charts.bars.predicate]
    kind = "and"
    all = [
        { kind = "equals_if_present", field = "persist", value = "persist-none" },
        { kind = "equals", field = "threads", value = 8 },
        { kind = "workload_mix", mix = [45, 43, 4, 4, 4] },
    ]
"#;

fn write_tpcc(dir: &std::path::Path) {
    let mut records = Vec::new();
    for threads in [1, 4, 8] {
        for (persist, rate) in [("persist-none", 33000.0), ("persist-real", 29000.0)] {
            records.push(tpcc_record(persist, "45,43,4,4,4", threads, rate * threads as f64));
            records.push(tpcc_record(persist, "39,37,4,10,10", threads, rate * 0.9 * threads as f64));
        }
    }
    write_records(&records, dir.join("tpcc.json")).unwrap();
}

#[test]
fn test_json_directory_roundtrip() {
    let dir = tempdir().unwrap();
    write_tpcc(dir.path());
    let records = JsonDirectory::new(dir.path()).load("tpcc.json").unwrap();
    assert_eq!(records.len(), 12);
    assert_eq!(records[0].options.int_list("workload-mix").unwrap(), vec![45, 43, 4, 4, 4]);
}

#[test]
fn test_report_writes_pages_csv_and_document() {
    let dir = tempdir().unwrap();
    write_tpcc(dir.path());

    let mut config = ReportConfig::from_toml_str(REPORT).unwrap();
    config.results_dir = dir.path().to_path_buf();
    config.output = dir.path().join("out").join("report.svg");
    config.export_csv = true;

    let summary = run_report(
        &config,
        &JsonDirectory::new(&config.results_dir),
        &PlottersRenderer::new(small_plots()),
        &PanelDocument::new(small_plots()),
    )
    .unwrap();

    let out = dir.path().join("out");
    assert_eq!(
        summary.pages.iter().map(|p| p.path.clone()).collect::<Vec<PathBuf>>(),
        vec![out.join("tpcc.svg"), out.join("persist.svg")]
    );
    for page in &summary.pages {
        assert!(page.path.exists());
    }
    assert!(summary.document.exists());

    let csv = fs::read_to_string(out.join("tpcc.csv")).unwrap();
    assert!(csv.contains("# Source: tpcc.json"));
    assert!(csv.contains("series,x,low,mid,high"));
    // 3 thread counts for each of the 2 series
    assert_eq!(csv.lines().filter(|l| l.starts_with("Silo")).count(), 6);

    let bars = fs::read_to_string(out.join("persist.csv")).unwrap();
    assert!(bars.contains("none@8,0.000000,264000.000000,264000.000000,264000.000000"));
}

#[test]
fn test_report_png_format() {
    let dir = tempdir().unwrap();
    write_tpcc(dir.path());

    let mut config = ReportConfig::from_toml_str(REPORT).unwrap();
    config.output = dir.path().join("report.svg");
    config.format = OutputFormat::Png;

    let summary = run_report(
        &config,
        &JsonDirectory::new(dir.path()),
        &PlottersRenderer::new(small_plots()),
        &PanelDocument::new(small_plots()),
    )
    .unwrap();
    assert_eq!(summary.document, dir.path().join("report.png"));
    assert!(summary.document.exists());
    assert!(dir.path().join("tpcc.png").exists());
}

#[test]
fn test_report_fails_fast_without_document() {
    let dir = tempdir().unwrap();
    write_tpcc(dir.path());

    let mut config = ReportConfig::from_toml_str(REPORT).unwrap();
    config.output = dir.path().join("report.svg");
    // Both mixes match now: two records for the bar
    config.charts[1].bars[0].predicate = Predicate::and(vec![
        Predicate::persist("persist-none"),
        Predicate::equals("threads", 8),
    ]);

    let err = run_report(
        &config,
        &JsonDirectory::new(dir.path()),
        &PlottersRenderer::new(small_plots()),
        &PanelDocument::new(small_plots()),
    )
    .unwrap_err();

    match err {
        Error::Cardinality { chart, matched, .. } => {
            assert_eq!(chart, "persist");
            assert_eq!(matched.len(), 2);
            assert!(matched[0].contains("threads=8"));
        }
        other => panic!("unexpected error {other}"),
    }
    assert!(!dir.path().join("report.svg").exists());
    assert!(!dir.path().join("tpcc.svg").exists());
}

#[test]
fn test_report_missing_results_file() {
    let dir = tempdir().unwrap();
    let mut config = ReportConfig::from_toml_str(REPORT).unwrap();
    config.output = dir.path().join("report.svg");

    let err = run_report(
        &config,
        &JsonDirectory::new(dir.path()),
        &PlottersRenderer::default(),
        &PanelDocument::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
