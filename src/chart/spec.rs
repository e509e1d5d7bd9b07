//! Chart descriptions
//!
//! A chart is described entirely by data: which result source it reads, how
//! records map to axes, and which predicate selects each series or bar. The
//! same description can be built in code (see [`crate::report::catalog`]) or
//! read from a TOML report file:
//!
//! ```toml
//! [[charts]]
//! name = "scale_rmw"
//! source = "istc3-8-21-13_cameraready-1.json"
//! outfile = "scale_rmw.svg"
//! x = "threads"
//! y = { kind = "metric", index = 0 }
//! x_label = "nthreads"
//! y_label = "throughput (txns/sec)"
//! y_format = "millions"
//! legend = "upper left"
//! title = "YCSB scale"
//!
//! [[charts.series]]
//! label = "Key-Value"
//! [charts.series.predicate]
//! kind = "and"
//! all = [
//!     { kind = "equals", field = "name", value = "scale_rmw" },
//!     { kind = "equals", field = "db", value = "kvdb" },
//! ]
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::extract::{XAxis, YAxis};
use crate::filter::Predicate;

// =================================================================================================
// Display options
// =================================================================================================

/// Legend placement, named like the usual plotting-library locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LegendPosition {
    #[serde(rename = "upper left")]
    UpperLeft,
    #[default]
    #[serde(rename = "upper right")]
    UpperRight,
    #[serde(rename = "lower left")]
    LowerLeft,
    #[serde(rename = "lower right")]
    LowerRight,
    #[serde(rename = "upper middle")]
    UpperMiddle,
    #[serde(rename = "lower middle")]
    LowerMiddle,
}

/// Y-axis tick label format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickFormat {
    /// Plain number
    #[default]
    Plain,
    /// `12K`, `12.5K`
    Thousands,
    /// `3M`, `3.2M`
    Millions,
}

impl TickFormat {
    /// Format one tick value
    ///
    /// Zero is always `"0"`. Scaled values that are whole numbers drop the
    /// decimal (`2000 → "2K"`), others keep one (`2500 → "2.5K"`).
    pub fn format(&self, value: f64) -> String {
        if value == 0.0 {
            return "0".to_string();
        }
        let (scale, suffix) = match self {
            TickFormat::Plain => (1.0, ""),
            TickFormat::Thousands => (1e3, "K"),
            TickFormat::Millions => (1e6, "M"),
        };
        let v = value / scale;
        if v.ceil() == v {
            format!("{:.0}{}", v, suffix)
        } else if suffix.is_empty() {
            format!("{:.2}", v)
        } else {
            format!("{:.1}{}", v, suffix)
        }
    }
}

// =================================================================================================
// Series and bars
// =================================================================================================

/// One line of a line chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub label: String,
    pub predicate: Predicate,
    /// Stretch the single matching record over the x-domain of the longest
    /// other series, drawing a flat reference line
    #[serde(default)]
    pub broadcast: bool,
}

impl SeriesSpec {
    pub fn new(label: &str, predicate: Predicate) -> Self {
        Self {
            label: label.to_string(),
            predicate,
            broadcast: false,
        }
    }

    /// Builder pattern: make this a broadcast reference line
    pub fn broadcast(mut self) -> Self {
        self.broadcast = true;
        self
    }
}

/// One bar of a bar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSpec {
    pub label: String,
    pub predicate: Predicate,
}

impl BarSpec {
    pub fn new(label: &str, predicate: Predicate) -> Self {
        Self {
            label: label.to_string(),
            predicate,
        }
    }
}

// =================================================================================================
// Chart
// =================================================================================================

/// Which kind of chart a description produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Lines,
    Bars,
}

fn default_error_bars() -> bool {
    true
}

/// Complete description of one chart
///
/// Exactly one of `series` (line chart, needs `x`) and `bars` (bar chart) is
/// non-empty; [`ChartSpec::validate`] enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Identifier used in logs and diagnostics
    pub name: String,

    /// Result source the records come from
    pub source: String,

    /// Where the standalone page for this chart is written
    pub outfile: PathBuf,

    /// X extractor (line charts only)
    #[serde(default)]
    pub x: Option<XAxis>,

    /// Y extractor
    pub y: YAxis,

    #[serde(default)]
    pub series: Vec<SeriesSpec>,

    #[serde(default)]
    pub bars: Vec<BarSpec>,

    #[serde(default)]
    pub x_label: String,

    pub y_label: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub legend: LegendPosition,

    #[serde(default)]
    pub y_format: TickFormat,

    /// Draw min/max error bars around the median
    #[serde(default = "default_error_bars")]
    pub error_bars: bool,
}

impl ChartSpec {
    /// Line chart with default display options
    pub fn lines(
        name: &str,
        source: &str,
        outfile: impl Into<PathBuf>,
        x: XAxis,
        y: YAxis,
        series: Vec<SeriesSpec>,
    ) -> Self {
        Self {
            name: name.to_string(),
            source: source.to_string(),
            outfile: outfile.into(),
            x: Some(x),
            y,
            series,
            bars: Vec::new(),
            x_label: String::new(),
            y_label: String::new(),
            title: None,
            legend: LegendPosition::default(),
            y_format: TickFormat::default(),
            error_bars: true,
        }
    }

    /// Bar chart with default display options
    pub fn bars(
        name: &str,
        source: &str,
        outfile: impl Into<PathBuf>,
        y: YAxis,
        bars: Vec<BarSpec>,
    ) -> Self {
        Self {
            x: None,
            series: Vec::new(),
            bars,
            ..Self::lines(name, source, outfile, XAxis::Threads, y, Vec::new())
        }
    }

    /// Builder pattern: axis labels
    pub fn labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    /// Builder pattern: title
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Builder pattern: legend placement
    pub fn legend(mut self, legend: LegendPosition) -> Self {
        self.legend = legend;
        self
    }

    /// Builder pattern: y tick format
    pub fn y_format(mut self, format: TickFormat) -> Self {
        self.y_format = format;
        self
    }

    /// Builder pattern: error bars on or off
    pub fn error_bars(mut self, show: bool) -> Self {
        self.error_bars = show;
        self
    }

    /// Check the description can produce a chart and say which kind
    pub fn validate(&self) -> Result<ChartKind> {
        let invalid = |reason: &str| Error::InvalidChart {
            chart: self.name.clone(),
            reason: reason.to_string(),
        };

        match (self.series.is_empty(), self.bars.is_empty()) {
            (false, false) => Err(invalid("has both series and bars")),
            (true, true) => Err(invalid("has neither series nor bars")),
            (false, true) => {
                if self.x.is_none() {
                    return Err(invalid("line chart without an x extractor"));
                }
                if self.series.iter().all(|s| s.broadcast) {
                    return Err(invalid("every series is a broadcast series"));
                }
                Ok(ChartKind::Lines)
            }
            (true, false) => Ok(ChartKind::Bars),
        }
    }
}
