//! Builtin chart catalog
//!
//! The eight charts of the camera-ready evaluation: YCSB and TPC-C scaling
//! (absolute and per core), the cross-partition experiment and the factor
//! analysis bars.

use crate::chart::{BarSpec, ChartSpec, LegendPosition, SeriesSpec, TickFormat};
use crate::extract::{XAxis, YAxis};
use crate::filter::Predicate;

const YCSB_RESULTS: &str = "istc3-8-21-13_cameraready-1.json";
const TPCC_RESULTS: &str = "istc3-8-22-13_cameraready.json";
const MULTIPART_RESULTS: &str = "istc3-8-22-13_cameraready_2.json";
const FACTOR_RESULTS: &str = "istc3-8-23-13_cameraready.json";

/// Name of the combined document
pub const CAMERA_READY_OUTPUT: &str = "istc3-cameraready.svg";

const STANDARD_MIX: [u32; 5] = [45, 43, 4, 4, 4];
const REALISTIC_MIX: [u32; 5] = [39, 37, 4, 10, 10];

const THROUGHPUT: &str = "throughput (txns/sec)";
const THROUGHPUT_PER_CORE: &str = "throughput/core (txns/sec/core)";

const FACTOR_BINARY_BASE: &str = "../out-factor-gc-nowriteinplace/benchmarks/dbtest";
const FACTOR_BINARY_OVERWRITES: &str = "../out-factor-gc/benchmarks/dbtest";

/// Every builtin chart, in document order
pub fn camera_ready() -> Vec<ChartSpec> {
    vec![
        ycsb_scale(false),
        ycsb_scale(true),
        tpcc_scale("standard", &STANDARD_MIX, false),
        tpcc_scale("standard", &STANDARD_MIX, true),
        tpcc_scale("realistic", &REALISTIC_MIX, false),
        tpcc_scale("realistic", &REALISTIC_MIX, true),
        multipart_pct(),
        factor_analysis(),
    ]
}

/// Absolute throughput or per-core throughput, with the matching label and legend
fn scale_axes(per_core: bool) -> (YAxis, &'static str, LegendPosition) {
    if per_core {
        (YAxis::MetricPerCore { index: 0 }, THROUGHPUT_PER_CORE, LegendPosition::LowerLeft)
    } else {
        (YAxis::Metric { index: 0 }, THROUGHPUT, LegendPosition::UpperLeft)
    }
}

fn ycsb_scale(per_core: bool) -> ChartSpec {
    let (y, y_label, legend) = scale_axes(per_core);
    let line = |label: &str, db: &str| {
        SeriesSpec::new(label, Predicate::and(vec![Predicate::name("scale_rmw"), Predicate::db(db)]))
    };
    let (name, title, format) = if per_core {
        ("scale_rmw_percore", "YCSB scale per-core", TickFormat::Thousands)
    } else {
        ("scale_rmw", "YCSB scale", TickFormat::Millions)
    };

    ChartSpec::lines(
        name,
        YCSB_RESULTS,
        format!("istc3-8-21-13_cameraready-1-{}.svg", name.replace("_percore", "-percore")),
        XAxis::Threads,
        y,
        vec![
            line("Key-Value", "kvdb"),
            line("Silo", "ndb-proto2"),
            line("Silo+GlobalTID", "ndb-proto1"),
        ],
    )
    .labels("nthreads", y_label)
    .title(title)
    .legend(legend)
    .y_format(format)
}

fn tpcc_scale(mix_name: &str, mix: &[u32], per_core: bool) -> ChartSpec {
    let (y, y_label, legend) = scale_axes(per_core);
    let line = |label: &str, persist: &str| {
        SeriesSpec::new(
            label,
            Predicate::and(vec![
                Predicate::name("scale_tpcc"),
                Predicate::persist(persist),
                Predicate::workload_mix(mix),
            ]),
        )
    };
    let suffix = if per_core { "_percore" } else { "" };
    let name = format!("scale_tpcc_{mix_name}{suffix}");
    let short = if mix_name == "standard" { "reg" } else { mix_name };
    let outfile = format!(
        "istc3-8-22-13_cameraready-scale_tpcc-{short}{}.svg",
        if per_core { "-percore" } else { "" }
    );
    let title = if per_core {
        format!("TPC-C scale per-core ({mix_name} mix)")
    } else {
        format!("TPC-C scale ({mix_name} mix)")
    };

    ChartSpec::lines(
        &name,
        TPCC_RESULTS,
        outfile,
        XAxis::Threads,
        y,
        vec![
            line("Silo", "persist-none"),
            line("Silo+PersistTemp", "persist-temp"),
            line("Silo+Persist", "persist-real"),
        ],
    )
    .labels("nthreads", y_label)
    .title(&title)
    .legend(legend)
    .y_format(TickFormat::Thousands)
}

fn multipart_pct() -> ChartSpec {
    let line = |label: &str, mut extra: Vec<Predicate>| {
        let mut all = vec![Predicate::name("multipart:pct")];
        all.append(&mut extra);
        SeriesSpec::new(label, Predicate::and(all))
    };

    ChartSpec::lines(
        "multipart_pct",
        MULTIPART_RESULTS,
        "istc3-8-22-13_cameraready_2-multipart_pct.svg",
        XAxis::CrossPartitionPct,
        YAxis::Metric { index: 0 },
        vec![
            line("Partition-Store", vec![Predicate::db("kvdb-st")]),
            line("Maflingo", vec![Predicate::db("ndb-proto2"), Predicate::snapshots(true)]),
            line(
                "Maflingo+NoSS",
                vec![
                    Predicate::db("ndb-proto2"),
                    Predicate::snapshots(false),
                    Predicate::separate_trees(false),
                ],
            ),
            line(
                "Partition-Maflingo+NoSS",
                vec![
                    Predicate::db("ndb-proto2"),
                    Predicate::snapshots(false),
                    Predicate::separate_trees(true),
                ],
            ),
        ],
    )
    .labels("% cross-partition", THROUGHPUT)
    .legend(LegendPosition::UpperRight)
    .y_format(TickFormat::Millions)
}

fn factor_analysis() -> ChartSpec {
    let bar = |label: &str, binary: &str, mut extra: Vec<Predicate>| {
        let mut all = vec![
            Predicate::name("factoranalysis"),
            Predicate::db("ndb-proto2"),
            Predicate::binary(binary),
        ];
        all.append(&mut extra);
        BarSpec::new(label, Predicate::and(all))
    };

    ChartSpec::bars(
        "factor_analysis",
        FACTOR_RESULTS,
        "istc3-8-23-13_cameraready-factor-analysis.svg",
        YAxis::Metric { index: 0 },
        vec![
            bar(
                "Baseline",
                FACTOR_BINARY_BASE,
                vec![Predicate::snapshots(true), Predicate::numa(false)],
            ),
            bar(
                "+NumaAllocator",
                FACTOR_BINARY_BASE,
                vec![Predicate::snapshots(true), Predicate::numa(true)],
            ),
            bar(
                "+Overwrites",
                FACTOR_BINARY_OVERWRITES,
                vec![Predicate::snapshots(true), Predicate::numa(true)],
            ),
            bar(
                "-Snapshots",
                FACTOR_BINARY_OVERWRITES,
                vec![Predicate::snapshots(false), Predicate::gc(true), Predicate::numa(true)],
            ),
            bar(
                "-GC",
                FACTOR_BINARY_OVERWRITES,
                vec![Predicate::snapshots(false), Predicate::gc(false), Predicate::numa(true)],
            ),
        ],
    )
    .labels("", THROUGHPUT)
    .y_format(TickFormat::Thousands)
}
