//! Record predicates
//!
//! A [`Predicate`] selects the records that make up one series or bar. Leaf
//! predicates test one configuration field or bench option; [`Predicate::And`]
//! and [`Predicate::Or`] combine them and short-circuit left to right.
//!
//! # Missing fields
//!
//! Leaves that test a field every record must carry (`Equals`, `IsNull`) fail
//! with [`MissingField`](crate::Error::MissingField) when the field is absent. Leaves that test an
//! optional flag (`EqualsIfPresent`, `Flag`) treat absence as "not set".
//!
//! # Example
//!
//! ```rust
//! use benchplot::filter::Predicate;
//!
//! let silo_tpcc = Predicate::and(vec![
//!     Predicate::name("scale_tpcc"),
//!     Predicate::persist("persist-none"),
//!     Predicate::workload_mix(&[45, 43, 4, 4, 4]),
//! ]);
//! # let _ = silo_tpcc;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::records::{ConfigValue, Record};

/// Bench option selecting the transaction mix
pub const WORKLOAD_MIX_OPTION: &str = "workload-mix";

/// Bench option enabling one index tree per partition
pub const SEPARATE_TREES_OPTION: &str = "enable-separate-tree-per-partition";

/// Boolean test over a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// `config[field] == value`; the field must exist
    Equals { field: String, value: ConfigValue },

    /// `config[field] == value`; false when the field is absent
    EqualsIfPresent { field: String, value: ConfigValue },

    /// Optional flag field: set iff present and truthy, matches iff that equals `set`
    Flag { field: String, set: bool },

    /// `config[field]` is null iff `null`; the field must exist
    IsNull { field: String, null: bool },

    /// Presence of `--flag` in the bench options
    OptionFlag { flag: String, present: bool },

    /// Decoded `--workload-mix` equals `mix`
    WorkloadMix { mix: Vec<u32> },

    /// Every predicate holds (true when empty)
    And { all: Vec<Predicate> },

    /// Some predicate holds (false when empty)
    Or { any: Vec<Predicate> },
}

impl Predicate {
    // ======================================= constructors =======================================

    pub fn equals(field: &str, value: impl Into<ConfigValue>) -> Self {
        Predicate::Equals {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn and(all: Vec<Predicate>) -> Self {
        Predicate::And { all }
    }

    pub fn or(any: Vec<Predicate>) -> Self {
        Predicate::Or { any }
    }

    /// Database engine under test
    pub fn db(db: &str) -> Self {
        Self::equals("db", db)
    }

    /// Experiment name
    pub fn name(name: &str) -> Self {
        Self::equals("name", name)
    }

    /// Benchmark binary path
    pub fn binary(binary: &str) -> Self {
        Self::equals("binary", binary)
    }

    /// Persistence mode; runs without a `persist` field never match
    pub fn persist(mode: &str) -> Self {
        Predicate::EqualsIfPresent {
            field: "persist".to_string(),
            value: mode.into(),
        }
    }

    /// Snapshots enabled (`disable_snapshots` absent or false) or disabled
    pub fn snapshots(enabled: bool) -> Self {
        Predicate::Flag {
            field: "disable_snapshots".to_string(),
            set: !enabled,
        }
    }

    /// Garbage collection enabled (`disable_gc` absent or false) or disabled
    pub fn gc(enabled: bool) -> Self {
        Predicate::Flag {
            field: "disable_gc".to_string(),
            set: !enabled,
        }
    }

    /// NUMA-aware allocation (`numa_memory` not null) or not
    pub fn numa(enabled: bool) -> Self {
        Predicate::IsNull {
            field: "numa_memory".to_string(),
            null: !enabled,
        }
    }

    /// Separate index tree per partition
    pub fn separate_trees(enabled: bool) -> Self {
        Predicate::OptionFlag {
            flag: SEPARATE_TREES_OPTION.to_string(),
            present: enabled,
        }
    }

    pub fn workload_mix(mix: &[u32]) -> Self {
        Predicate::WorkloadMix { mix: mix.to_vec() }
    }

    // ======================================== evaluation ========================================

    /// Evaluate against one record
    ///
    /// # Errors
    ///
    /// `MissingField` when a required field is absent.
    pub fn matches(&self, record: &Record) -> Result<bool> {
        match self {
            Predicate::Equals { field, value } => Ok(record.config.require(field)? == value),

            Predicate::EqualsIfPresent { field, value } => {
                Ok(record.config.get(field).is_some_and(|v| v == value))
            }

            Predicate::Flag { field, set } => {
                let is_set = record.config.get(field).is_some_and(ConfigValue::is_truthy);
                Ok(is_set == *set)
            }

            Predicate::IsNull { field, null } => Ok(record.config.require(field)?.is_null() == *null),

            Predicate::OptionFlag { flag, present } => Ok(record.options.has(flag) == *present),

            Predicate::WorkloadMix { mix } => match record.options.int_list(WORKLOAD_MIX_OPTION) {
                Ok(decoded) => Ok(&decoded == mix),
                Err(err) => {
                    log::debug!("workload mix not decodable ({}), record skipped", err);
                    Ok(false)
                }
            },

            Predicate::And { all } => {
                for p in all {
                    if !p.matches(record)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }

            Predicate::Or { any } => {
                for p in any {
                    if p.matches(record)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }

    /// Records matching this predicate, in input order
    pub fn select<'a>(&self, records: &'a [Record]) -> Result<Vec<&'a Record>> {
        let mut selected = Vec::new();
        for record in records {
            if self.matches(record)? {
                selected.push(record);
            }
        }
        Ok(selected)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
