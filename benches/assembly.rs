//! Performance benchmarks for chart assembly
//!
//! Measures the two hot paths of a report run over synthetic result sets:
//!
//! 1. **Predicate selection**: one AND predicate evaluated over every record
//! 2. **Line chart assembly**: selection, extraction and median/min/max for
//!    every series, including a broadcast reference line
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --bench assembly
//!
//! # Only selection
//! cargo bench --bench assembly select
//! ```
//!
//! Both should scale linearly with the number of records: every series scans
//! the whole record list once.

use benchplot::chart::{assemble, ChartSpec, SeriesSpec};
use benchplot::extract::{XAxis, YAxis};
use benchplot::filter::Predicate;
use benchplot::records::{Measurement, Record, RunConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const DBS: [&str; 4] = ["kvdb", "ndb-proto1", "ndb-proto2", "kvdb-st"];
const MIXES: [&str; 2] = ["45,43,4,4,4", "39,37,4,10,10"];

// =================================================================================================
// Synthetic records
// =================================================================================================

/// `threads_per_db` thread counts for every db and mix, five trials each
fn records(threads_per_db: i64) -> Vec<Record> {
    let mut records = Vec::new();
    for db in DBS {
        for mix in MIXES {
            for threads in 1..=threads_per_db {
                let rate = 30_000.0 * threads as f64;
                records.push(Record::new(
                    RunConfig::new()
                        .with("name", "scale_tpcc")
                        .with("db", db)
                        .with("threads", threads)
                        .with("persist", "persist-none")
                        .with("bench_opts", format!("--workload-mix {}", mix)),
                    Measurement::Trials((0..5).map(|i| vec![rate * (0.98 + 0.01 * i as f64), 0.0]).collect()),
                ));
            }
        }
    }
    records
}

fn series_predicate(db: &str) -> Predicate {
    Predicate::and(vec![
        Predicate::name("scale_tpcc"),
        Predicate::db(db),
        Predicate::persist("persist-none"),
        Predicate::workload_mix(&[45, 43, 4, 4, 4]),
    ])
}

fn chart() -> ChartSpec {
    let mut series: Vec<SeriesSpec> = DBS[..3]
        .iter()
        .map(|db| SeriesSpec::new(db, series_predicate(db)))
        .collect();
    series.push(
        SeriesSpec::new(
            "single core",
            Predicate::and(vec![series_predicate("kvdb-st"), Predicate::equals("threads", 1)]),
        )
        .broadcast(),
    );
    ChartSpec::lines(
        "scale_tpcc",
        "bench.json",
        "scale_tpcc.svg",
        XAxis::Threads,
        YAxis::Metric { index: 0 },
        series,
    )
}

// =================================================================================================
// Benchmarks
// =================================================================================================

fn benchmark_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    let predicate = series_predicate("ndb-proto2");

    for threads in [8, 32, 128].iter() {
        let records = records(*threads);
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(records.len()), &records, |b, records| {
            b.iter(|| predicate.select(black_box(records)).unwrap().len());
        });
    }

    group.finish();
}

fn benchmark_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    let spec = chart();

    for threads in [8, 32, 128].iter() {
        let records = records(*threads);
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(records.len()), &records, |b, records| {
            b.iter(|| assemble(black_box(&spec), black_box(records)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_select, benchmark_assemble);
criterion_main!(benches);
