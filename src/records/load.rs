//! Loading result records
//!
//! The pipeline only needs "give me the records of source X". [`RecordSource`]
//! is that seam; [`JsonDirectory`] is the file-backed implementation used by
//! the command line tool.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use super::Record;

/// Anything that can produce the records of a named result source
pub trait RecordSource {
    /// Load every record of `source`
    fn load(&self, source: &str) -> Result<Vec<Record>>;
}

/// Result files stored as JSON under one directory
///
/// `load("istc3-8-22-13_cameraready.json")` reads
/// `<root>/istc3-8-22-13_cameraready.json`.
#[derive(Debug, Clone)]
pub struct JsonDirectory {
    root: PathBuf,
}

impl JsonDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl RecordSource for JsonDirectory {
    fn load(&self, source: &str) -> Result<Vec<Record>> {
        let path = self.root.join(source);
        let records = read_records(&path)?;
        log::info!("loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }
}

/// Read one JSON result file
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write records as a JSON result file
pub fn write_records(records: &[Record], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// In-memory source, handy for tests and generated data
impl RecordSource for std::collections::HashMap<String, Vec<Record>> {
    fn load(&self, source: &str) -> Result<Vec<Record>> {
        self.get(source).cloned().ok_or_else(|| Error::Io {
            path: PathBuf::from(source),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "unknown result source"),
        })
    }
}
