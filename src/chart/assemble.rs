//! Series and bar assembly
//!
//! Turns a [`ChartSpec`] plus the records of its source into fully aggregated
//! chart data: every point already carries its median and min/max spread, so
//! a renderer only has to draw.
//!
//! # Cardinality rules
//!
//! | Item | Matching records |
//! |------|------------------|
//! | line series | at least one |
//! | broadcast series | exactly one |
//! | bar | exactly one |
//!
//! Any other count is an [`Error::Cardinality`] listing the matched records,
//! so a chart never silently plots data it was not meant to.

use crate::error::{Error, Result};
use crate::extract::{Observation, XAxis, YAxis};
use crate::records::Record;
use crate::stats::Summary;

use super::spec::{BarSpec, ChartKind, ChartSpec, LegendPosition, SeriesSpec, TickFormat};

/// Distance between consecutive bars (bars are laid out at `i * BAR_WIDTH`)
pub const BAR_WIDTH: f64 = 0.15;

// =================================================================================================
// Assembled data
// =================================================================================================

/// One plotted point
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: Observation,
    pub summary: Summary,
}

impl Point {
    fn new(x: f64, y: Observation) -> Result<Self> {
        let summary = y.summary()?;
        Ok(Self { x, y, summary })
    }
}

/// One assembled line
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<Point>,
    pub broadcast: bool,
}

impl Series {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }
}

/// One assembled bar
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub position: f64,
    pub y: Observation,
    pub summary: Summary,
}

/// Display options carried from the description to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Display {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub legend: LegendPosition,
    pub y_format: TickFormat,
    pub error_bars: bool,
}

impl From<&ChartSpec> for Display {
    fn from(spec: &ChartSpec) -> Self {
        Self {
            title: spec.title.clone(),
            x_label: spec.x_label.clone(),
            y_label: spec.y_label.clone(),
            legend: spec.legend,
            y_format: spec.y_format,
            error_bars: spec.error_bars,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub name: String,
    pub display: Display,
    pub series: Vec<Series>,
}

impl LineChart {
    /// Largest upper bound over every point (0 when empty)
    pub fn y_max(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.summary.high))
            .fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub name: String,
    pub display: Display,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Largest upper bound over every bar (0 when empty)
    pub fn y_max(&self) -> f64 {
        self.bars.iter().map(|b| b.summary.high).fold(0.0, f64::max)
    }
}

/// Chart ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub enum AssembledChart {
    Lines(LineChart),
    Bars(BarChart),
}

impl AssembledChart {
    pub fn name(&self) -> &str {
        match self {
            AssembledChart::Lines(c) => &c.name,
            AssembledChart::Bars(c) => &c.name,
        }
    }

    pub fn display(&self) -> &Display {
        match self {
            AssembledChart::Lines(c) => &c.display,
            AssembledChart::Bars(c) => &c.display,
        }
    }

    /// Largest upper bound over all points, the top of the y range
    pub fn y_max(&self) -> f64 {
        match self {
            AssembledChart::Lines(c) => c.y_max(),
            AssembledChart::Bars(c) => c.y_max(),
        }
    }
}

// =================================================================================================
// Assembly
// =================================================================================================

/// Assemble any chart description
pub fn assemble(spec: &ChartSpec, records: &[Record]) -> Result<AssembledChart> {
    match spec.validate()? {
        ChartKind::Lines => assemble_lines(spec, records).map(AssembledChart::Lines),
        ChartKind::Bars => assemble_bars(spec, records).map(AssembledChart::Bars),
    }
}

/// Assemble a line chart
///
/// Points keep record order. A broadcast series takes the x values of the
/// longest non-broadcast series (the first one on ties) and repeats its single
/// y value at each of them.
///
/// # Errors
///
/// - `InvalidChart` if the description is not a line chart
/// - `Cardinality` on a series matching no record, or a broadcast series not
///   matching exactly one
/// - any predicate or extractor error
pub fn assemble_lines(spec: &ChartSpec, records: &[Record]) -> Result<LineChart> {
    if spec.validate()? != ChartKind::Lines {
        return Err(Error::InvalidChart {
            chart: spec.name.clone(),
            reason: "not a line chart".to_string(),
        });
    }
    let x_axis = spec.x.unwrap_or(XAxis::Threads);

    let mut series = Vec::with_capacity(spec.series.len());
    for series_spec in &spec.series {
        series.push(collect_series(spec, series_spec, x_axis, records)?);
    }

    // Domain of the longest regular series, for broadcast lines
    let domain: Vec<f64> = series
        .iter()
        .filter(|s| !s.broadcast)
        .fold(None::<&Series>, |best, s| match best {
            Some(b) if b.len() >= s.len() => Some(b),
            _ => Some(s),
        })
        .map(Series::xs)
        .unwrap_or_default();

    for line in series.iter_mut().filter(|s| s.broadcast) {
        let point = line.points[0].clone();
        line.points = domain
            .iter()
            .map(|&x| Point {
                x,
                ..point.clone()
            })
            .collect();
    }

    Ok(LineChart {
        name: spec.name.clone(),
        display: Display::from(spec),
        series,
    })
}

fn collect_series(
    chart: &ChartSpec,
    spec: &SeriesSpec,
    x_axis: XAxis,
    records: &[Record],
) -> Result<Series> {
    let matched = spec.predicate.select(records)?;
    log::debug!(
        "chart {}: series {:?} matched {} record(s)",
        chart.name,
        spec.label,
        matched.len()
    );

    let cardinality_ok = if spec.broadcast {
        matched.len() == 1
    } else {
        !matched.is_empty()
    };
    if !cardinality_ok {
        return Err(cardinality(
            chart,
            &spec.label,
            if spec.broadcast { "exactly one" } else { "at least one" },
            &matched,
        ));
    }

    let points = matched
        .iter()
        .map(|record| Point::new(x_axis.extract(record)?, chart.y.extract(record)?))
        .collect::<Result<Vec<_>>>()?;

    Ok(Series {
        label: spec.label.clone(),
        points,
        broadcast: spec.broadcast,
    })
}

/// Assemble a bar chart
///
/// # Errors
///
/// - `InvalidChart` if the description is not a bar chart
/// - `Cardinality` on a bar matching zero or several records
pub fn assemble_bars(spec: &ChartSpec, records: &[Record]) -> Result<BarChart> {
    if spec.validate()? != ChartKind::Bars {
        return Err(Error::InvalidChart {
            chart: spec.name.clone(),
            reason: "not a bar chart".to_string(),
        });
    }

    let bars = spec
        .bars
        .iter()
        .enumerate()
        .map(|(i, bar)| collect_bar(spec, bar, i, records))
        .collect::<Result<Vec<_>>>()?;

    Ok(BarChart {
        name: spec.name.clone(),
        display: Display::from(spec),
        bars,
    })
}

fn collect_bar(chart: &ChartSpec, spec: &BarSpec, index: usize, records: &[Record]) -> Result<Bar> {
    let matched = spec.predicate.select(records)?;
    let [record] = matched.as_slice() else {
        return Err(cardinality(chart, &spec.label, "exactly one", &matched));
    };

    let y = chart.y.extract(record)?;
    Ok(Bar {
        label: spec.label.clone(),
        position: index as f64 * BAR_WIDTH,
        summary: y.summary()?,
        y,
    })
}

fn cardinality(chart: &ChartSpec, label: &str, expected: &'static str, matched: &[&Record]) -> Error {
    let err = Error::Cardinality {
        chart: chart.name.clone(),
        label: label.to_string(),
        expected,
        matched: matched.iter().map(|r| r.describe()).collect(),
    };
    log::error!("{}", err);
    err
}

// =================================================================================================
// Tests
// =================================================================================================
