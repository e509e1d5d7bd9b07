//! Error type shared by the whole pipeline
//!
//! Every failure is fatal for the report being built: the batch stops at the
//! first chart that cannot be assembled or rendered and no combined document
//! is written.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while turning result files into charts
#[derive(Debug, Error)]
pub enum Error {
    /// A predicate or extractor needed a configuration field the record lacks
    #[error("record has no `{field}` field")]
    MissingField { field: String },

    /// A configuration field holds a value of the wrong kind
    #[error("field `{field}` is {found}, expected {expected}")]
    FieldType {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// A bench option is absent or cannot be decoded
    #[error("bench option `--{option}` missing or malformed in {text:?}")]
    MalformedOption { option: String, text: String },

    /// A decoded value lies outside its allowed range
    #[error("`{field}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Positional metric lookup beyond the recorded tuple
    #[error("metric index {index} out of range for a run with {len} metrics")]
    MetricIndex { index: usize, len: usize },

    /// A series or bar did not match the number of records it must match
    #[error("chart `{chart}`: `{label}` expects {expected} matching record(s), found {}: [{}]", .matched.len(), .matched.join("; "))]
    Cardinality {
        chart: String,
        label: String,
        expected: &'static str,
        matched: Vec<String>,
    },

    /// Aggregation over no values
    #[error("cannot aggregate an empty sample")]
    EmptySample,

    /// Chart description that can never produce a chart
    #[error("invalid chart `{chart}`: {reason}")]
    InvalidChart { chart: String, reason: String },

    /// Result file could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Result file is not a valid record list
    #[error("cannot parse results in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Report configuration is not valid TOML for a report
    #[error("invalid report configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Drawing backend or output file failure
    #[error("cannot render {path}: {message}")]
    Render { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn missing(field: &str) -> Self {
        Error::MissingField {
            field: field.to_string(),
        }
    }

    pub(crate) fn render(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Error::Render {
            path: path.into(),
            message: err.to_string(),
        }
    }
}
