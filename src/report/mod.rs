//! Report pipeline
//!
//! A report is an ordered list of chart descriptions plus where to read
//! results and where to write pages. [`run_report`] turns it into one page per
//! chart and a combined document:
//!
//! ```text
//! ReportConfig ──► load sources ──► assemble charts ──► render pages ──► document
//!                  (RecordSource)   (chart::assemble)   (PageRenderer)   (DocumentAssembler)
//! ```
//!
//! The batch is fail-fast: the first chart that fails stops the run and no
//! document is written.
//!
//! # Report file
//!
//! ```toml
//! results_dir = "results"
//! output = "out/report.svg"
//! format = "svg"
//! export_csv = true
//!
//! [[charts]]
//! name = "scale"
//! # ... see `chart::spec`
//! ```

pub mod catalog;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chart::{assemble, AssembledChart, ChartSpec};
use crate::error::{Error, Result};
use crate::output::{CsvConfig, CsvExporter, CsvMetadata, DocumentAssembler, Exporter, Page, PageRenderer};
use crate::records::{Record, RecordSource};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// =================================================================================================
// Configuration
// =================================================================================================

/// Image format of pages and document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            other => Err(format!("unknown output format `{}` (expected svg or png)", other)),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output() -> PathBuf {
    PathBuf::from("report.svg")
}

/// Everything needed to build one report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory holding the result files named by each chart's `source`
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Combined document; pages are written next to it
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Format of pages and document, overriding the extensions in `outfile`
    #[serde(default)]
    pub format: OutputFormat,

    /// Also write a CSV file with the numbers behind each page
    #[serde(default)]
    pub export_csv: bool,

    pub charts: Vec<ChartSpec>,
}

impl ReportConfig {
    pub fn new(charts: Vec<ChartSpec>) -> Self {
        Self {
            results_dir: default_results_dir(),
            output: default_output(),
            format: OutputFormat::default(),
            export_csv: false,
            charts,
        }
    }

    /// The builtin camera-ready report
    pub fn camera_ready() -> Self {
        Self {
            output: PathBuf::from(catalog::CAMERA_READY_OUTPUT),
            ..Self::new(catalog::camera_ready())
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check every chart description, and that chart names and page paths are unique
    ///
    /// Page paths are compared after the format extension is applied, so
    /// `page.svg` and `page.png` collide, as does a page written over the
    /// combined document.
    pub fn validate(&self) -> Result<()> {
        let document = self.document_path();
        let mut names = HashSet::new();
        let mut pages = HashSet::new();
        for chart in &self.charts {
            chart.validate()?;
            let invalid = |reason: String| Error::InvalidChart {
                chart: chart.name.clone(),
                reason,
            };
            if !names.insert(chart.name.as_str()) {
                return Err(invalid("duplicate chart name".to_string()));
            }
            let page = self.page_path(chart);
            if page == document {
                return Err(invalid(format!("page {} overwrites the document", page.display())));
            }
            if !pages.insert(page.clone()) {
                return Err(invalid(format!("page {} is written by another chart", page.display())));
            }
        }
        Ok(())
    }

    fn output_dir(&self) -> PathBuf {
        self.output
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Where the page of `chart` is written
    pub fn page_path(&self, chart: &ChartSpec) -> PathBuf {
        self.output_dir()
            .join(&chart.outfile)
            .with_extension(self.format.extension())
    }

    /// Where the combined document is written
    pub fn document_path(&self) -> PathBuf {
        self.output.with_extension(self.format.extension())
    }
}

// =================================================================================================
// Pipeline
// =================================================================================================

/// What a successful run produced
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub pages: Vec<Page>,
    pub exports: Vec<PathBuf>,
    pub document: PathBuf,
}

/// Build every chart of `config`, then the combined document
///
/// Each distinct source is loaded once. With the `parallel` feature, charts
/// are assembled on the rayon pool; pages are always rendered in order.
///
/// # Errors
///
/// The first error of any stage. Nothing after the failing chart is rendered
/// and the document is not written.
pub fn run_report<S, R, D>(
    config: &ReportConfig,
    source: &S,
    renderer: &R,
    assembler: &D,
) -> Result<ReportSummary>
where
    S: RecordSource + ?Sized,
    R: PageRenderer + ?Sized,
    D: DocumentAssembler + ?Sized,
{
    config.validate()?;

    let mut records: BTreeMap<&str, Vec<Record>> = BTreeMap::new();
    for chart in &config.charts {
        if !records.contains_key(chart.source.as_str()) {
            records.insert(chart.source.as_str(), source.load(&chart.source)?);
        }
    }

    let charts = assemble_all(&config.charts, &records)?;

    let out_dir = config.output_dir();
    if !out_dir.as_os_str().is_empty() {
        fs::create_dir_all(&out_dir).map_err(|source| Error::Io {
            path: out_dir.clone(),
            source,
        })?;
    }

    let mut pages = Vec::with_capacity(charts.len());
    let mut exports = Vec::new();
    for (spec, chart) in config.charts.iter().zip(&charts) {
        let path = config.page_path(spec);
        pages.push(renderer.render_page(chart, &path)?);
        log::info!("chart {} rendered to {}", spec.name, path.display());

        if config.export_csv {
            let metadata = CsvMetadata::from_source(&spec.source, records_of(&records, spec).len());
            let exporter = CsvExporter::new(CsvConfig::default().with_metadata(metadata));
            let csv_path = path.with_extension(exporter.extension());
            exporter.export(chart, &csv_path)?;
            exports.push(csv_path);
        }
    }

    let document = config.document_path();
    assembler.assemble(&pages, &document)?;

    Ok(ReportSummary {
        pages,
        exports,
        document,
    })
}

fn records_of<'a>(records: &'a BTreeMap<&str, Vec<Record>>, spec: &ChartSpec) -> &'a [Record] {
    records
        .get(spec.source.as_str())
        .map(Vec::as_slice)
        .unwrap_or_default()
}

#[cfg(not(feature = "parallel"))]
fn assemble_all(specs: &[ChartSpec], records: &BTreeMap<&str, Vec<Record>>) -> Result<Vec<AssembledChart>> {
    specs
        .iter()
        .map(|spec| assemble(spec, records_of(records, spec)))
        .collect()
}

#[cfg(feature = "parallel")]
fn assemble_all(specs: &[ChartSpec], records: &BTreeMap<&str, Vec<Record>>) -> Result<Vec<AssembledChart>> {
    // Keep every outcome so the reported error is the first one in chart order
    let outcomes: Vec<Result<AssembledChart>> = specs
        .par_iter()
        .map(|spec| assemble(spec, records_of(records, spec)))
        .collect();
    outcomes.into_iter().collect()
}

// =================================================================================================
// Tests
// =================================================================================================
