//! CSV export of assembled charts
//!
//! Writes the numbers behind a chart so they can be checked or re-plotted with
//! other tools.
//!
//! # Layout
//!
//! Line charts get one row per point, bar charts one row per bar:
//!
//! ```csv
//! series,x,low,mid,high
//! Silo,1.000000,9500.000000,10000.000000,10400.000000
//! ```
//!
//! ```csv
//! bar,position,low,mid,high
//! Baseline,0.000000,612.000000,620.000000,633.000000
//! ```
//!
//! ## With Metadata
//!
//! ```csv
//! # Benchmark Chart Data
//! # Generated: 2026-02-11T15:30:00Z
//! # Chart: scale_rmw
//! # Source: istc3-8-21-13_cameraready-1.json
//! #
//! series,x,low,mid,high
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::Exporter;
use crate::chart::AssembledChart;
use crate::error::{Error, Result};
use crate::stats::Summary;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 2,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only non-None fields are written. The chart name is always written when
/// metadata is enabled.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Result source the chart was built from
    pub source: Option<String>,

    /// Number of records in the source
    pub records: Option<usize>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    pub fn from_source(source: &str, records: usize) -> Self {
        Self {
            source: Some(source.to_string()),
            records: Some(records),
            ..Default::default()
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header(
    out: &mut impl Write,
    chart: &str,
    metadata: &CsvMetadata,
) -> std::io::Result<()> {
    writeln!(out, "# Benchmark Chart Data")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;
    writeln!(out, "# Chart: {}", chart)?;

    if let Some(source) = &metadata.source {
        writeln!(out, "# Source: {}", source)?;
    }
    if let Some(records) = metadata.records {
        writeln!(out, "# Records: {}", records)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Quote a label if it contains the delimiter or a quote
fn format_label(label: &str, config: &CsvConfig) -> String {
    if label.contains(config.delimiter) || label.contains('"') {
        format!("\"{}\"", label.replace('"', "\"\""))
    } else {
        label.to_string()
    }
}

fn write_chart(out: &mut impl Write, chart: &AssembledChart, config: &CsvConfig) -> std::io::Result<()> {
    if config.include_metadata {
        if let Some(metadata) = &config.metadata {
            write_metadata_header(out, chart.name(), metadata)?;
        }
    }

    let d = config.delimiter;
    let (label_header, at_header) = match chart {
        AssembledChart::Lines(_) => ("series", "x"),
        AssembledChart::Bars(_) => ("bar", "position"),
    };
    writeln!(out, "{label_header}{d}{at_header}{d}low{d}mid{d}high")?;

    let mut row = |label: &str, at: f64, summary: &Summary| {
        writeln!(
            out,
            "{}{d}{}{d}{}{d}{}{d}{}",
            format_label(label, config),
            format_number(at, config),
            format_number(summary.low, config),
            format_number(summary.mid, config),
            format_number(summary.high, config),
        )
    };

    match chart {
        AssembledChart::Lines(lines) => {
            for series in &lines.series {
                for p in &series.points {
                    row(&series.label, p.x, &p.summary)?;
                }
            }
        }
        AssembledChart::Bars(bars) => {
            for bar in &bars.bars {
                row(&bar.label, bar.position, &bar.summary)?;
            }
        }
    }
    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export the points or bars of an assembled chart to CSV
///
/// # Errors
///
/// - Non-finite values (NaN or Inf) in the chart
/// - File creation or write errors
///
/// # Example
///
/// ```rust,ignore
/// export_chart_csv(&chart, Path::new("scale.csv"), None)?;
/// ```
pub fn export_chart_csv(
    chart: &AssembledChart,
    output_path: &Path,
    configuration: Option<&CsvConfig>,
) -> Result<()> {
    // ============================= Validation =============================

    let finite = |s: &Summary| s.low.is_finite() && s.mid.is_finite() && s.high.is_finite();
    let valid = match chart {
        AssembledChart::Lines(lines) => lines
            .series
            .iter()
            .flat_map(|s| &s.points)
            .all(|p| p.x.is_finite() && finite(&p.summary)),
        AssembledChart::Bars(bars) => bars.bars.iter().all(|b| finite(&b.summary)),
    };
    if !valid {
        return Err(Error::render(
            output_path,
            format!("NaN or Inf detected in chart {}", chart.name()),
        ));
    }

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    // ============================= Write ==================================

    let io_error = |source| Error::Io {
        path: output_path.to_path_buf(),
        source,
    };
    let file = File::create(output_path).map_err(io_error)?;
    let mut out = BufWriter::new(file);
    write_chart(&mut out, chart, configuration).map_err(io_error)?;
    out.flush().map_err(io_error)?;

    log::debug!("chart {} exported to {}", chart.name(), output_path.display());
    Ok(())
}

/// [`Exporter`] writing CSV files
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn export(&self, chart: &AssembledChart, path: &Path) -> Result<()> {
        export_chart_csv(chart, path, Some(&self.config))
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Bar, BarChart, Display, LegendPosition, LineChart, Point, Series, TickFormat};
    use crate::extract::Observation;
    use std::fs;
    use tempfile::NamedTempFile;

    fn display() -> Display {
        Display {
            title: None,
            x_label: "nthreads".to_string(),
            y_label: "throughput".to_string(),
            legend: LegendPosition::default(),
            y_format: TickFormat::Plain,
            error_bars: true,
        }
    }

    fn lines() -> AssembledChart {
        let point = |x: f64, values: Vec<f64>| {
            let y = Observation::Trials(values);
            Point {
                x,
                summary: y.summary().unwrap(),
                y,
            }
        };
        AssembledChart::Lines(LineChart {
            name: "scale".to_string(),
            display: display(),
            series: vec![
                Series {
                    label: "Silo".to_string(),
                    points: vec![point(1.0, vec![9.0, 10.0, 12.0]), point(2.0, vec![20.0])],
                    broadcast: false,
                },
                Series {
                    label: "Key, Value".to_string(),
                    points: vec![point(1.0, vec![5.0])],
                    broadcast: false,
                },
            ],
        })
    }

    fn bars() -> AssembledChart {
        AssembledChart::Bars(BarChart {
            name: "factors".to_string(),
            display: display(),
            bars: vec![Bar {
                label: "Baseline".to_string(),
                position: 0.0,
                y: Observation::Single(620.0),
                summary: Summary::point(620.0),
            }],
        })
    }

    #[test]
    fn test_export_lines() {
        let temp = NamedTempFile::new().unwrap();
        export_chart_csv(&lines(), temp.path(), Some(&CsvConfig::default().precision(1))).unwrap();

        let content = fs::read_to_string(temp.path()).unwrap();
        let rows: Vec<&str> = content.lines().collect();
        assert_eq!(rows[0], "series,x,low,mid,high");
        assert_eq!(rows[1], "Silo,1.0,9.0,10.0,12.0");
        assert_eq!(rows[2], "Silo,2.0,20.0,20.0,20.0");
        assert_eq!(rows[3], "\"Key, Value\",1.0,5.0,5.0,5.0");
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_export_bars() {
        let temp = NamedTempFile::new().unwrap();
        export_chart_csv(&bars(), temp.path(), Some(&CsvConfig::default().precision(0))).unwrap();

        let content = fs::read_to_string(temp.path()).unwrap();
        assert_eq!(content, "bar,position,low,mid,high\nBaseline,0,620,620,620\n");
    }

    #[test]
    fn test_export_european() {
        let temp = NamedTempFile::new().unwrap();
        let config = CsvConfig::european().precision(1);
        export_chart_csv(&bars(), temp.path(), Some(&config)).unwrap();

        let content = fs::read_to_string(temp.path()).unwrap();
        assert!(content.contains("Baseline;0,0;620,0;620,0;620,0"));
    }

    #[test]
    fn test_export_with_metadata() {
        let temp = NamedTempFile::new().unwrap();
        let mut metadata = CsvMetadata::from_source("results.json", 12);
        metadata.add_custom("Host".to_string(), "istc3".to_string());
        let config = CsvConfig::default().with_metadata(metadata);
        export_chart_csv(&lines(), temp.path(), Some(&config)).unwrap();

        let content = fs::read_to_string(temp.path()).unwrap();
        assert!(content.starts_with("# Benchmark Chart Data"));
        assert!(content.contains("# Generated: "));
        assert!(content.contains("# Chart: scale"));
        assert!(content.contains("# Source: results.json"));
        assert!(content.contains("# Records: 12"));
        assert!(content.contains("# Host: istc3"));
        assert!(content.contains("#\nseries,x,low,mid,high"));
    }

    #[test]
    fn test_export_rejects_non_finite() {
        let temp = NamedTempFile::new().unwrap();
        let mut chart = bars();
        if let AssembledChart::Bars(b) = &mut chart {
            b.bars[0].summary.high = f64::NAN;
        }
        assert!(matches!(
            export_chart_csv(&chart, temp.path(), None),
            Err(Error::Render { .. })
        ));
    }

    #[test]
    fn test_exporter_trait() {
        let temp = NamedTempFile::new().unwrap();
        let exporter = CsvExporter::default();
        assert_eq!(exporter.extension(), "csv");
        exporter.export(&bars(), temp.path()).unwrap();
        assert!(fs::read_to_string(temp.path()).unwrap().starts_with("bar,"));
    }
}
