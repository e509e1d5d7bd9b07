//! Result records
//!
//! A result record is one captured benchmark run: the configuration it was
//! launched with plus the metrics it produced.
//!
//! # Storage Types
//!
//! - **ConfigValue**: one scalar configuration value (bool, int, float, text, null)
//! - **RunConfig**: the configuration map; an absent key is not the same as a
//!   `null` or `false` value
//! - **Measurement**: either a single metric tuple or one tuple per repeated trial,
//!   decided once when the record is loaded
//! - **BenchOptions**: the free-text `bench_opts` field decoded into options
//!
//! # On-disk layout
//!
//! A result file is a JSON array of `[config, payload]` pairs:
//!
//! ```json
//! [
//!   [{"db": "ndb-proto2", "name": "scale_rmw", "threads": 8}, [412345.0, 0.0]],
//!   [{"db": "kvdb", "name": "scale_rmw", "threads": 8}, [[1.0, 0.0], [1.2, 0.0]]]
//! ]
//! ```

pub mod load;
pub mod options;

pub use load::{JsonDirectory, RecordSource};
pub use options::BenchOptions;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// =================================================================================================
// Configuration values
// =================================================================================================

/// One configuration value
///
/// Integers and floats compare equal when they denote the same number, so a
/// chart description written with `threads = 8` matches a record saved as `8.0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Explicit `null` (e.g. `numa_memory` when no NUMA allocator was used)
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ConfigValue {
    /// Short name of the variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "a boolean",
            ConfigValue::Int(_) => "an integer",
            ConfigValue::Float(_) => "a float",
            ConfigValue::Text(_) => "a string",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Truthiness of an optional flag field
    ///
    /// Only `true`, non-zero numbers and non-empty strings count as set.
    pub fn is_truthy(&self) -> bool {
        match self {
            ConfigValue::Null => false,
            ConfigValue::Bool(b) => *b,
            ConfigValue::Int(i) => *i != 0,
            ConfigValue::Float(f) => *f != 0.0,
            ConfigValue::Text(s) => !s.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            ConfigValue::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }
}

impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        use ConfigValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => *a as f64 == *b,
            (Text(a), Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => write!(f, "null"),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Int(i) => write!(f, "{}", i),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Int(value as i64)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}

// =================================================================================================
// Run configuration
// =================================================================================================

/// Configuration a benchmark run was launched with
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunConfig {
    fields: BTreeMap<String, ConfigValue>,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: add a field
    pub fn with(mut self, field: &str, value: impl Into<ConfigValue>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&ConfigValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Get a field every record is required to carry
    pub fn require(&self, field: &str) -> Result<&ConfigValue> {
        self.get(field).ok_or_else(|| Error::missing(field))
    }

    /// Get a required text field
    pub fn require_str(&self, field: &str) -> Result<&str> {
        let value = self.require(field)?;
        value.as_str().ok_or_else(|| Error::FieldType {
            field: field.to_string(),
            expected: "a string",
            found: value.kind().to_string(),
        })
    }

    /// Get a required integer field
    pub fn require_int(&self, field: &str) -> Result<i64> {
        let value = self.require(field)?;
        value.as_int().ok_or_else(|| Error::FieldType {
            field: field.to_string(),
            expected: "an integer",
            found: value.kind().to_string(),
        })
    }

    /// Get a required numeric field, integer or float
    pub fn require_number(&self, field: &str) -> Result<f64> {
        match self.require(field)? {
            ConfigValue::Int(i) => Ok(*i as f64),
            ConfigValue::Float(f) => Ok(*f),
            other => Err(Error::FieldType {
                field: field.to_string(),
                expected: "a number",
                found: other.kind().to_string(),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.fields.iter()
    }
}

// =================================================================================================
// Measurements
// =================================================================================================

/// Metrics captured for one configuration
///
/// The payload shape is decided at load time so extractors never inspect it
/// again: a bare tuple is a single run, a list of tuples is repeated trials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measurement {
    /// One metric tuple per trial
    Trials(Vec<Vec<f64>>),

    /// A single metric tuple
    Single(Vec<f64>),
}

impl Measurement {
    /// Number of trials (1 for a single run)
    pub fn trials(&self) -> usize {
        match self {
            Measurement::Single(_) => 1,
            Measurement::Trials(runs) => runs.len(),
        }
    }

    pub fn is_trials(&self) -> bool {
        matches!(self, Measurement::Trials(_))
    }
}

// =================================================================================================
// Records
// =================================================================================================

/// One captured benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRecord", into = "RawRecord")]
pub struct Record {
    pub config: RunConfig,
    pub measurement: Measurement,
    /// Decoded `bench_opts` (empty when the field is absent)
    pub options: BenchOptions,
}

#[derive(Serialize, Deserialize)]
struct RawRecord(RunConfig, Measurement);

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Record::new(raw.0, raw.1)
    }
}

impl From<Record> for RawRecord {
    fn from(record: Record) -> Self {
        RawRecord(record.config, record.measurement)
    }
}

impl Record {
    pub fn new(config: RunConfig, measurement: Measurement) -> Self {
        let options = match config.get("bench_opts") {
            Some(ConfigValue::Text(text)) => BenchOptions::parse(text),
            _ => BenchOptions::default(),
        };
        Self {
            config,
            measurement,
            options,
        }
    }

    /// Worker thread count, as a divisor for per-core values
    ///
    /// # Errors
    ///
    /// `MissingField` / `FieldType` if the field is absent or not an integer,
    /// `OutOfRange` if it is below 1.
    pub fn threads(&self) -> Result<i64> {
        let threads = self.config.require_int("threads")?;
        if threads < 1 {
            return Err(Error::OutOfRange {
                field: "threads".to_string(),
                value: threads,
                min: 1,
                max: i64::MAX,
            });
        }
        Ok(threads)
    }

    /// Compact description used in cardinality diagnostics
    pub fn describe(&self) -> String {
        const KEYS: [&str; 5] = ["name", "db", "threads", "persist", "bench_opts"];

        KEYS.iter()
            .filter_map(|k| self.config.get(k).map(|v| format!("{}={}", k, v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_value_int_float_equality() {
        assert_eq!(ConfigValue::Int(8), ConfigValue::Float(8.0));
        assert_ne!(ConfigValue::Int(8), ConfigValue::Float(8.5));
        assert_ne!(ConfigValue::Bool(false), ConfigValue::Null);
        assert_ne!(ConfigValue::Text("8".into()), ConfigValue::Int(8));
    }

    #[test]
    fn test_record_from_json_single() {
        let json = r#"[{"db": "kvdb", "threads": 4, "numa_memory": null}, [100.0, 2.5]]"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.measurement, Measurement::Single(vec![100.0, 2.5]));
        assert_eq!(record.threads().unwrap(), 4);
        assert!(record.config.get("numa_memory").unwrap().is_null());
        assert!(!record.config.contains("persist"));
    }

    #[test]
    fn test_record_from_json_trials() {
        let json = r#"[{"threads": 2}, [[1, 2], [3, 4], [5, 6]]]"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert!(record.measurement.is_trials());
        assert_eq!(record.measurement.trials(), 3);
    }

    #[test]
    fn test_record_json_layout_is_a_pair() {
        let record = Record::new(
            RunConfig::new().with("db", "A").with("threads", 1),
            Measurement::Single(vec![1.0]),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["db"], "A");
    }

    #[test]
    fn test_bench_opts_decoded_on_load() {
        let record = Record::new(
            RunConfig::new().with("bench_opts", "--workload-mix 45,43,4,4,4"),
            Measurement::Single(vec![1.0]),
        );
        assert_eq!(record.options.value("workload-mix"), Some("45,43,4,4,4"));
    }

    #[test]
    fn test_threads_missing_and_invalid() {
        let record = Record::new(RunConfig::new(), Measurement::Single(vec![1.0]));
        assert!(matches!(record.threads(), Err(Error::MissingField { .. })));

        let record = Record::new(
            RunConfig::new().with("threads", "eight"),
            Measurement::Single(vec![1.0]),
        );
        assert!(matches!(record.threads(), Err(Error::FieldType { .. })));

        let record = Record::new(
            RunConfig::new().with("threads", 0),
            Measurement::Single(vec![1.0]),
        );
        assert!(matches!(record.threads(), Err(Error::OutOfRange { .. })));
    }

    #[test]
    fn test_describe_lists_identifying_fields() {
        let record = Record::new(
            RunConfig::new().with("db", "kvdb").with("threads", 8).with("other", 1),
            Measurement::Single(vec![1.0]),
        );
        let text = record.describe();
        assert!(text.contains("db=\"kvdb\""));
        assert!(text.contains("threads=8"));
        assert!(!text.contains("other"));
    }
}
