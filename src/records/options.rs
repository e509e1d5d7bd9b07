//! Structured decoding of the `bench_opts` command line
//!
//! Benchmark drivers record the extra command line they passed to the
//! benchmark binary as free text, e.g.
//!
//! ```text
//! --workload-mix 45,43,4,4,4 --new-order-remote-item-pct 10 --enable-separate-tree-per-partition
//! ```
//!
//! The text is split once into `--key value` pairs and bare `--flag`s so that
//! predicates and extractors compare decoded values instead of searching for
//! substrings.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// `--key value`, `--key=value` or a bare `--flag`
static OPTION_RGX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"--([A-Za-z0-9][A-Za-z0-9_-]*)(?:=(\S+)|\s+([^\s-]\S*))?")
        .expect("option pattern is valid")
});

/// Decoded bench options, in command line order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchOptions {
    text: String,
    entries: Vec<(String, Option<String>)>,
}

impl BenchOptions {
    /// Decode an options string
    ///
    /// Never fails: text that does not look like `--options` simply yields no
    /// entries, and the error surfaces when something asks for a value.
    pub fn parse(text: &str) -> Self {
        let entries = OPTION_RGX
            .captures_iter(text)
            .map(|caps| {
                let key = caps[1].to_string();
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str().to_string());
                (key, value)
            })
            .collect();

        Self {
            text: text.to_string(),
            entries,
        }
    }

    /// Original text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `--name` appears at all (with or without a value)
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    /// Value of the last `--name value` occurrence
    pub fn value(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Integer value of `--name`
    ///
    /// # Errors
    ///
    /// `MalformedOption` if the option is absent or its value is not an integer.
    pub fn int(&self, name: &str) -> Result<i64> {
        self.value(name)
            .and_then(|v| v.parse::<i64>().ok())
            .ok_or_else(|| self.malformed(name))
    }

    /// Comma separated integer list of `--name` (e.g. `--workload-mix 45,43,4,4,4`)
    pub fn int_list(&self, name: &str) -> Result<Vec<u32>> {
        let value = self.value(name).ok_or_else(|| self.malformed(name))?;
        value
            .split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| self.malformed(name))
    }

    fn malformed(&self, name: &str) -> Error {
        Error::MalformedOption {
            option: name.to_string(),
            text: self.text.clone(),
        }
    }
}
