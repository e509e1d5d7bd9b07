//! benchplot: charts from captured benchmark results
//!
//! Turns result files (lists of `[config, metrics]` records produced by a
//! database benchmark driver) into throughput charts: scaling curves with
//! min/max error bars, per-core curves and bar charts, plus one combined
//! document for a report.
//!
//! # Architecture
//!
//! benchplot separates *what* to plot from *how* to draw it:
//!
//! 1. **Declarative charts**
//!    - A chart is data: a source, x/y extractors and one predicate per series or bar
//!    - The same description is built in code or read from a TOML report file
//!
//! 2. **Strict assembly**
//!    - Every series and bar must match the records it promises; anything
//!      else is an error naming the records that did match
//!    - Rendering only sees fully aggregated points
//!
//! # Quick Start
//!
//! ```rust
//! use benchplot::prelude::*;
//!
//! # fn main() -> benchplot::Result<()> {
//! let records = vec![
//!     Record::new(
//!         RunConfig::new().with("db", "kvdb").with("threads", 1),
//!         Measurement::Trials(vec![vec![980.0], vec![1010.0], vec![1000.0]]),
//!     ),
//!     Record::new(
//!         RunConfig::new().with("db", "kvdb").with("threads", 2),
//!         Measurement::Single(vec![1900.0]),
//!     ),
//! ];
//!
//! let spec = ChartSpec::lines(
//!     "scale",
//!     "results.json",
//!     "scale.svg",
//!     XAxis::Threads,
//!     YAxis::Metric { index: 0 },
//!     vec![SeriesSpec::new("Key-Value", Predicate::db("kvdb"))],
//! );
//!
//! let AssembledChart::Lines(chart) = assemble(&spec, &records)? else { unreachable!() };
//! assert_eq!(chart.series[0].points[0].summary.mid, 1000.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`records`]: result records and loading
//! - [`filter`]: predicates selecting records
//! - [`extract`]: x/y extractors
//! - [`stats`]: median and error spans
//! - [`chart`]: chart descriptions and assembly
//! - [`output`]: rendering, combined document, CSV export
//! - [`report`]: report configuration, builtin catalog, batch pipeline

pub mod chart;
pub mod error;
pub mod extract;
pub mod filter;
pub mod output;
pub mod records;
pub mod report;
pub mod stats;

pub use error::{Error, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use benchplot::prelude::*;
    //! ```
    pub use crate::chart::{
        assemble, AssembledChart, BarSpec, ChartSpec, LegendPosition, SeriesSpec, TickFormat,
    };
    pub use crate::error::{Error, Result};
    pub use crate::extract::{XAxis, YAxis};
    pub use crate::filter::Predicate;
    pub use crate::output::{DocumentAssembler, PageRenderer, PanelDocument, PlottersRenderer};
    pub use crate::records::{JsonDirectory, Measurement, Record, RecordSource, RunConfig};
    pub use crate::report::{run_report, ReportConfig};
}
