//! Extractors: record → plotted value
//!
//! Charts name their axes with data, not closures, so chart descriptions can be
//! written in a report file.
//!
//! | Axis | Extractor | Value |
//! |------|-----------|-------|
//! | x | [`XAxis::Threads`] | declared thread count |
//! | x | [`XAxis::CrossPartitionPct`] | expected % of cross-partition transactions |
//! | y | [`YAxis::Metric`] | metric at a tuple position, per trial |
//! | y | [`YAxis::MetricPerCore`] | same, divided by the thread count |

pub mod cross_partition;

pub use cross_partition::{expected_cross_partition_pct, fsum};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::records::{Measurement, Record};
use crate::stats::Summary;

/// Bench option carrying the per-item remote percentage
pub const REMOTE_ITEM_PCT_OPTION: &str = "new-order-remote-item-pct";

// =================================================================================================
// Observations
// =================================================================================================

/// Y value of one point: a single measurement or one value per trial
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    Single(f64),
    Trials(Vec<f64>),
}

impl Observation {
    /// All values, a one-element slice for `Single`
    pub fn values(&self) -> &[f64] {
        match self {
            Observation::Single(v) => std::slice::from_ref(v),
            Observation::Trials(vs) => vs,
        }
    }

    /// Median with min/max spread
    pub fn summary(&self) -> Result<Summary> {
        match self {
            Observation::Single(v) => Ok(Summary::point(*v)),
            Observation::Trials(vs) => Summary::of(vs),
        }
    }
}

// =================================================================================================
// Axes
// =================================================================================================

/// X-axis extractors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxis {
    /// Declared worker thread count, unchanged
    Threads,
    /// Expected cross-partition percentage derived from `--new-order-remote-item-pct`
    CrossPartitionPct,
}

impl XAxis {
    pub fn extract(&self, record: &Record) -> Result<f64> {
        match self {
            XAxis::Threads => record.config.require_number("threads"),
            XAxis::CrossPartitionPct => {
                let pct = record.options.int(REMOTE_ITEM_PCT_OPTION)?;
                if !(0..=100).contains(&pct) {
                    return Err(Error::OutOfRange {
                        field: REMOTE_ITEM_PCT_OPTION.to_string(),
                        value: pct,
                        min: 0,
                        max: 100,
                    });
                }
                Ok(expected_cross_partition_pct(pct as f64))
            }
        }
    }
}

/// Y-axis extractors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum YAxis {
    /// Metric at `index` of the run tuple
    Metric { index: usize },
    /// Metric at `index` divided by the thread count
    MetricPerCore { index: usize },
}

impl YAxis {
    pub fn extract(&self, record: &Record) -> Result<Observation> {
        match self {
            YAxis::Metric { index } => metric(&record.measurement, *index),
            YAxis::MetricPerCore { index } => {
                let threads = record.threads()? as f64;
                Ok(match metric(&record.measurement, *index)? {
                    Observation::Single(v) => Observation::Single(v / threads),
                    Observation::Trials(vs) => {
                        Observation::Trials(vs.into_iter().map(|v| v / threads).collect())
                    }
                })
            }
        }
    }
}

/// Positional metric lookup, per trial for repeated runs
fn metric(measurement: &Measurement, index: usize) -> Result<Observation> {
    let at = |run: &[f64]| {
        run.get(index).copied().ok_or(Error::MetricIndex {
            index,
            len: run.len(),
        })
    };

    match measurement {
        Measurement::Single(run) => at(run.as_slice()).map(Observation::Single),
        Measurement::Trials(runs) => runs
            .iter()
            .map(|run| at(run.as_slice()))
            .collect::<Result<Vec<_>>>()
            .map(Observation::Trials),
    }
}

// =================================================================================================
// Tests
// =================================================================================================
