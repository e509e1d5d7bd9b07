//! Example: full report from synthetic results
//!
//! Generates result files shaped like the camera-ready experiments (YCSB and
//! TPC-C scaling, cross-partition sweep, factor analysis), writes them as
//! JSON, then runs the builtin camera-ready report over them.
//!
//! ## Output (`demo_output/`)
//!
//! - `results/*.json`: the generated result files
//! - one page per chart, plus a CSV with the plotted numbers
//! - `istc3-cameraready.svg`: every chart stacked in one document

use benchplot::{
    output::{PanelDocument, PlotConfig, PlottersRenderer},
    records::{load::write_records, JsonDirectory, Measurement, Record, RunConfig},
    report::{run_report, ReportConfig},
};

use std::error::Error;
use std::path::Path;

const OUT_DIR: &str = "demo_output";
const THREADS: [i64; 6] = [1, 4, 8, 16, 24, 32];

// =============================================================================
// Synthetic data
// =============================================================================

/// Three trials around `rate`, spread by ±3%
fn trials(rate: f64) -> Measurement {
    Measurement::Trials(
        [0.97, 1.0, 1.03]
            .iter()
            .map(|f| vec![rate * f, 0.0])
            .collect(),
    )
}

/// Throughput of `threads` workers with per-core rate `per_core` and a scaling loss
fn scaled(per_core: f64, threads: i64, loss: f64) -> f64 {
    let t = threads as f64;
    per_core * t * (1.0 - loss * (t - 1.0) / 32.0)
}

fn ycsb() -> Vec<Record> {
    let dbs = [("kvdb", 720_000.0, 0.05), ("ndb-proto2", 690_000.0, 0.08), ("ndb-proto1", 680_000.0, 0.6)];
    dbs.iter()
        .flat_map(|&(db, rate, loss)| {
            THREADS.iter().map(move |&t| {
                Record::new(
                    RunConfig::new()
                        .with("name", "scale_rmw")
                        .with("db", db)
                        .with("threads", t),
                    trials(scaled(rate, t, loss)),
                )
            })
        })
        .collect()
}

fn tpcc() -> Vec<Record> {
    let mut records = Vec::new();
    for (mix, rate) in [("45,43,4,4,4", 33_000.0), ("39,37,4,10,10", 30_000.0)] {
        for (persist, loss) in [("persist-none", 0.05), ("persist-temp", 0.12), ("persist-real", 0.2)] {
            for &t in &THREADS {
                records.push(Record::new(
                    RunConfig::new()
                        .with("name", "scale_tpcc")
                        .with("db", "ndb-proto2")
                        .with("threads", t)
                        .with("persist", persist)
                        .with("bench_opts", format!("--workload-mix {}", mix)),
                    trials(scaled(rate, t, loss)),
                ));
            }
        }
    }
    records
}

fn multipart() -> Vec<Record> {
    let mut records = Vec::new();
    for pct in [0, 1, 2, 5, 10, 20, 50, 100] {
        let remote = format!("--new-order-remote-item-pct {}", pct);
        let drop = 1.0 / (1.0 + pct as f64 / 10.0);
        let configs = [
            ("kvdb-st", false, false, 1_200_000.0 * drop * drop),
            ("ndb-proto2", false, false, 900_000.0),
            ("ndb-proto2", true, false, 950_000.0),
            ("ndb-proto2", true, true, 1_000_000.0 * (0.6 + 0.4 * drop)),
        ];
        for (db, no_snapshots, sep_trees, rate) in configs {
            let opts = if sep_trees {
                format!("{} --enable-separate-tree-per-partition", remote)
            } else {
                remote.clone()
            };
            records.push(Record::new(
                RunConfig::new()
                    .with("name", "multipart:pct")
                    .with("db", db)
                    .with("threads", 28)
                    .with("disable_snapshots", no_snapshots)
                    .with("bench_opts", opts),
                trials(rate),
            ));
        }
    }
    records
}

fn factors() -> Vec<Record> {
    let base = "../out-factor-gc-nowriteinplace/benchmarks/dbtest";
    let overwrites = "../out-factor-gc/benchmarks/dbtest";
    let runs = [
        (base, false, false, false, 560_000.0),
        (base, true, false, false, 620_000.0),
        (overwrites, true, false, false, 640_000.0),
        (overwrites, true, true, false, 655_000.0),
        (overwrites, true, true, true, 665_000.0),
    ];
    runs.iter()
        .map(|&(binary, numa, no_snapshots, no_gc, rate)| {
            let numa_memory = if numa { "112G".into() } else { benchplot::records::ConfigValue::Null };
            Record::new(
                RunConfig::new()
                    .with("name", "factoranalysis")
                    .with("db", "ndb-proto2")
                    .with("threads", 28)
                    .with("binary", binary)
                    .with("numa_memory", numa_memory)
                    .with("disable_snapshots", no_snapshots)
                    .with("disable_gc", no_gc),
                trials(rate),
            )
        })
        .collect()
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let results_dir = Path::new(OUT_DIR).join("results");
    std::fs::create_dir_all(&results_dir)?;

    write_records(&ycsb(), results_dir.join("istc3-8-21-13_cameraready-1.json"))?;
    write_records(&tpcc(), results_dir.join("istc3-8-22-13_cameraready.json"))?;
    write_records(&multipart(), results_dir.join("istc3-8-22-13_cameraready_2.json"))?;
    write_records(&factors(), results_dir.join("istc3-8-23-13_cameraready.json"))?;

    let mut config = ReportConfig::camera_ready();
    config.results_dir = results_dir.clone();
    config.output = Path::new(OUT_DIR).join("istc3-cameraready.svg");
    config.export_csv = true;

    let plot_config = PlotConfig::default();
    let summary = run_report(
        &config,
        &JsonDirectory::new(&results_dir),
        &PlottersRenderer::new(plot_config.clone()),
        &PanelDocument::new(plot_config),
    )?;

    println!("\n{} pages:", summary.pages.len());
    for page in &summary.pages {
        println!("  {}", page.path.display());
    }
    println!("document: {}", summary.document.display());

    Ok(())
}
