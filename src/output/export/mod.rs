//! Data export of assembled charts.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a
//! new format means a new file and no change to the report pipeline.
//!
//! | Format  | Module   |
//! |---------|----------|
//! | CSV     | [`csv`]  |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use benchplot::output::export::{CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::default();
//! exporter.export(&chart, Path::new("scale.csv"))?;
//! ```

pub mod csv;

pub use csv::{export_chart_csv, CsvConfig, CsvExporter, CsvMetadata};

use std::path::Path;

use crate::chart::AssembledChart;
use crate::error::Result;

/// Abstraction over data export formats
pub trait Exporter {
    /// File extension written by this format, without the dot
    fn extension(&self) -> &'static str;

    /// Write the numbers behind `chart` to `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the chart holds non-finite values or the file
    /// cannot be written.
    fn export(&self, chart: &AssembledChart, path: &Path) -> Result<()>;
}
