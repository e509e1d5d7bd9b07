//! Synthetic result records

use benchplot::records::{ConfigValue, Measurement, Record, RunConfig};

/// One scaling run with a single metric tuple
pub fn scale_record(name: &str, db: &str, threads: i64, throughput: f64) -> Record {
    Record::new(
        RunConfig::new()
            .with("name", name)
            .with("db", db)
            .with("threads", threads),
        Measurement::Single(vec![throughput, 0.0]),
    )
}

/// One scaling run with repeated trials
pub fn trial_record(name: &str, db: &str, threads: i64, trials: &[f64]) -> Record {
    Record::new(
        RunConfig::new()
            .with("name", name)
            .with("db", db)
            .with("threads", threads),
        Measurement::Trials(trials.iter().map(|t| vec![*t, 0.0]).collect()),
    )
}

/// TPC-C run with a workload mix and persistence mode
pub fn tpcc_record(persist: &str, mix: &str, threads: i64, throughput: f64) -> Record {
    Record::new(
        RunConfig::new()
            .with("name", "scale_tpcc")
            .with("db", "ndb-proto2")
            .with("threads", threads)
            .with("persist", persist)
            .with("numa_memory", ConfigValue::Null)
            .with("bench_opts", format!("--workload-mix {}", mix)),
        Measurement::Single(vec![throughput]),
    )
}

/// Cross-partition sweep point
pub fn multipart_record(db: &str, remote_pct: u32, throughput: f64) -> Record {
    Record::new(
        RunConfig::new()
            .with("name", "multipart:pct")
            .with("db", db)
            .with("threads", 28)
            .with("bench_opts", format!("--new-order-remote-item-pct {}", remote_pct)),
        Measurement::Trials(vec![vec![throughput * 0.98], vec![throughput], vec![throughput * 1.01]]),
    )
}

/// The three-record set: name "X", dbs A/B/C at 1/2/4 threads
pub fn abc_records() -> Vec<Record> {
    vec![
        scale_record("X", "A", 1, 100.0),
        scale_record("X", "B", 2, 250.0),
        scale_record("X", "C", 4, 600.0),
    ]
}
